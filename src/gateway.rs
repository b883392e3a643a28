use reqwest::header::ACCEPT;
use reqwest::multipart;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::input::TranscriptInput;
use crate::summary::{ActionItem, ProcessingStats, SummaryResult};

/// How a request to the summarization service failed. The `Display`
/// text is what the upload screen shows the user.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never completed (DNS, connect, TLS, I/O).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
    },
    /// The requested summary does not exist on the server.
    #[error("summary not found")]
    NotFound,
    /// A success status carrying a body that is not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// JSON body for a pasted-text submission.
#[derive(serde::Serialize)]
struct SummarizeBody<'a> {
    transcript: &'a str,
}

/// The service's summary object as it appears on the wire. Every field
/// is optional; `normalize` turns this into a `SummaryResult` that has
/// no missing fields.
#[derive(Debug, Default, Deserialize)]
struct RawSummary {
    summary: Option<String>,
    action_items: Option<Vec<RawActionItem>>,
    topics: Option<Vec<String>>,
    #[serde(rename = "keyPoints")]
    key_points: Option<Vec<String>>,
    #[serde(rename = "keyInsights")]
    key_insights: Option<Vec<String>>,
    #[serde(rename = "wordsProcessed")]
    words_processed: Option<u64>,
    #[serde(rename = "compressionRate")]
    compression_rate: Option<u32>,
    #[serde(rename = "processingTime")]
    processing_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawActionItem {
    text: Option<String>,
    owner: Option<String>,
    due: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSummaryList {
    summaries: Option<Vec<RawSummary>>,
}

/// Collapse a raw wire summary into the canonical result shape.
fn normalize(raw: RawSummary) -> SummaryResult {
    let action_items: Vec<ActionItem> = raw
        .action_items
        .unwrap_or_default()
        .into_iter()
        .map(|item| ActionItem {
            text: item.text.unwrap_or_default(),
            owner: item.owner.unwrap_or_default(),
            due: item.due.unwrap_or_default(),
        })
        .collect();

    let stats = ProcessingStats {
        words_processed: raw.words_processed.unwrap_or(0),
        // The service's stats count action items under both names.
        key_points: action_items.len(),
        action_items: action_items.len(),
        compression_rate: raw.compression_rate.unwrap_or(85),
        processing_time: raw.processing_time.unwrap_or_else(|| "2.3s".into()),
    };

    SummaryResult {
        summary: raw.summary.unwrap_or_default(),
        topics: raw.topics.unwrap_or_default(),
        key_points: raw.key_points.unwrap_or_default(),
        key_insights: raw.key_insights.unwrap_or_default(),
        processing_stats: stats,
        action_items,
    }
}

/// Pull a human-readable message out of an error response body.
/// JSON bodies with a `message` or `error` field win; otherwise the
/// status line stands in.
fn upstream_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    format!("summarization service returned {status}")
}

/// Client for the remote summarization service.
pub struct SummarizeClient {
    http: reqwest::Client,
    base_url: String,
}

impl SummarizeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a transcript for summarization. A present file always wins
    /// over pasted text; the text value is then not sent at all.
    pub async fn create_summary(
        &self,
        input: &TranscriptInput,
    ) -> Result<SummaryResult, GatewayError> {
        let url = format!("{}/summarize", self.base_url);

        let request = if let Some(file) = &input.file {
            // Leave the content-type header to reqwest: the form boundary
            // only gets generated when nothing overrides it.
            let part = multipart::Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(file.media_type.essence())?;
            let form = multipart::Form::new().part("file", part);
            self.http.post(&url).multipart(form)
        } else {
            self.http
                .post(&url)
                .json(&SummarizeBody {
                    transcript: &input.text,
                })
        };

        let response = request.header(ACCEPT, "application/json").send().await?;
        let raw: RawSummary = Self::read_json(response).await?;
        Ok(normalize(raw))
    }

    /// All summaries stored server-side, in the order the service
    /// returns them. A missing `summaries` field is an empty list.
    /// Auxiliary endpoint; nothing in the UI calls it yet.
    #[allow(dead_code)]
    pub async fn list_summaries(&self) -> Result<Vec<SummaryResult>, GatewayError> {
        let url = format!("{}/summaries", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let raw: RawSummaryList = Self::read_json(response).await?;
        Ok(raw
            .summaries
            .unwrap_or_default()
            .into_iter()
            .map(normalize)
            .collect())
    }

    /// One stored summary by id; a 404 becomes `GatewayError::NotFound`.
    /// Auxiliary endpoint; nothing in the UI calls it yet.
    #[allow(dead_code)]
    pub async fn summary_by_id(&self, id: &str) -> Result<SummaryResult, GatewayError> {
        let url = format!("{}/summaries/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }
        let raw: RawSummary = Self::read_json(response).await?;
        Ok(normalize(raw))
    }

    /// Liveness probe. Any success status counts; the body is ignored.
    pub async fn health(&self) -> Result<(), GatewayError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream {
                status,
                message: upstream_message(status, &body),
            });
        }
        Ok(())
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status,
                message: upstream_message(status, &body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::AttachedFile;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn text_input(text: &str) -> TranscriptInput {
        TranscriptInput {
            text: text.into(),
            file: None,
        }
    }

    #[test]
    fn normalize_defaults_missing_sequences_to_empty() {
        let raw: RawSummary = serde_json::from_str(r#"{"summary":"S"}"#).unwrap();
        let result = normalize(raw);
        assert_eq!(result.summary, "S");
        assert!(result.action_items.is_empty());
        assert!(result.topics.is_empty());
        assert!(result.key_points.is_empty());
        assert!(result.key_insights.is_empty());
    }

    #[test]
    fn normalize_defaults_stats() {
        let result = normalize(RawSummary::default());
        assert_eq!(result.summary, "");
        assert_eq!(result.processing_stats.words_processed, 0);
        assert_eq!(result.processing_stats.compression_rate, 85);
        assert_eq!(result.processing_stats.processing_time, "2.3s");
    }

    #[test]
    fn stats_key_points_counts_action_items() {
        // The stats field named keyPoints reports the action item count,
        // not the length of the keyPoints list. That is the service's
        // contract; this test pins it so nobody "fixes" it by accident.
        let raw: RawSummary = serde_json::from_value(json!({
            "summary": "S",
            "action_items": [
                {"text": "a", "owner": "A", "due": "Mon"},
                {"text": "b", "owner": "B", "due": "Tue"},
            ],
            "keyPoints": ["one", "two", "three", "four", "five"],
        }))
        .unwrap();
        let result = normalize(raw);
        assert_eq!(result.key_points.len(), 5);
        assert_eq!(result.processing_stats.key_points, 2);
        assert_eq!(result.processing_stats.action_items, 2);
    }

    #[test]
    fn normalize_fills_partial_action_items() {
        let raw: RawSummary = serde_json::from_value(json!({
            "action_items": [{"text": "follow up"}],
        }))
        .unwrap();
        let result = normalize(raw);
        assert_eq!(result.action_items[0].text, "follow up");
        assert_eq!(result.action_items[0].owner, "");
        assert_eq!(result.action_items[0].due, "");
    }

    #[test]
    fn upstream_message_prefers_json_fields() {
        let status = StatusCode::BAD_GATEWAY;
        assert_eq!(
            upstream_message(status, r#"{"message":"model overloaded"}"#),
            "model overloaded"
        );
        assert_eq!(
            upstream_message(status, r#"{"error":"no transcript provided"}"#),
            "no transcript provided"
        );
        assert_eq!(
            upstream_message(status, "<html>Bad Gateway</html>"),
            "summarization service returned 502 Bad Gateway"
        );
        assert_eq!(
            upstream_message(status, r#"{"message":"  "}"#),
            "summarization service returned 502 Bad Gateway"
        );
    }

    #[tokio::test]
    async fn text_submission_posts_json_transcript() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/summarize")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(Matcher::Json(json!({"transcript": "hello"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "summary": "S",
                    "action_items": [{"text": "t", "owner": "o", "due": "d"}],
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        let result = client.create_summary(&text_input("hello")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.summary, "S");
        assert_eq!(result.action_items.len(), 1);
        assert!(result.topics.is_empty());
        assert_eq!(result.processing_stats.action_items, 1);
        assert_eq!(result.processing_stats.key_points, 1);
    }

    #[tokio::test]
    async fn file_submission_is_multipart_and_ignores_text() {
        let mut server = Server::new_async().await;
        let multipart_mock = server
            .mock("POST", "/api/summarize")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=.+".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file""#.into()),
                Matcher::Regex("minutes.txt".into()),
                Matcher::Regex("the full minutes".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"summary": "from file"}).to_string())
            .create_async()
            .await;
        // Would only match if the client fell back to the JSON text body.
        let json_mock = server
            .mock("POST", "/api/summarize")
            .match_header("content-type", "application/json")
            .expect(0)
            .create_async()
            .await;

        let input = TranscriptInput {
            text: "pasted text that must not be sent".into(),
            file: Some(
                AttachedFile::from_bytes("minutes.txt", b"the full minutes".to_vec()).unwrap(),
            ),
        };
        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        let result = client.create_summary(&input).await.unwrap();

        multipart_mock.assert_async().await;
        json_mock.assert_async().await;
        assert_eq!(result.summary, "from file");
    }

    #[tokio::test]
    async fn error_status_surfaces_body_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/summarize")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(json!({"error": "transcript is empty"}).to_string())
            .create_async()
            .await;

        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        let err = client.create_summary(&text_input("x")).await.unwrap_err();

        match err {
            GatewayError::Upstream { status, message } => {
                assert_eq!(status.as_u16(), 422);
                assert_eq!(message, "transcript is empty");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/summarize")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        let err = client.create_summary(&text_input("x")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn list_summaries_normalizes_each_entry() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/summaries")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"summaries": [
                    {"summary": "first"},
                    {"summary": "second", "topics": ["t"]},
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        let summaries = client.list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].summary, "first");
        assert!(summaries[0].topics.is_empty());
        assert_eq!(summaries[1].topics, vec!["t".to_string()]);
    }

    #[tokio::test]
    async fn list_summaries_tolerates_missing_field() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/summaries")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        assert!(client.list_summaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn summary_by_id_maps_404_to_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/summaries/nope")
            .with_status(404)
            .with_body(json!({"error": "not here"}).to_string())
            .create_async()
            .await;

        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        let err = client.summary_by_id("nope").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound));
    }

    #[tokio::test]
    async fn health_checks_status_only() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/health")
            .with_status(200)
            .with_body("ok, but not json")
            .create_async()
            .await;

        let client = SummarizeClient::new(&format!("{}/api", server.url()));
        assert!(client.health().await.is_ok());

        server
            .mock("GET", "/api/health")
            .with_status(503)
            .create_async()
            .await;
        assert!(client.health().await.is_err());
    }
}
