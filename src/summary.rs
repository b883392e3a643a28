use serde::{Deserialize, Serialize};

/// A single action item extracted from the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub text: String,
    pub owner: String,
    pub due: String,
}

/// Counters the service reports alongside a summary.
///
/// Field names mirror the wire format, so a serialized result matches
/// what the service itself would hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub words_processed: u64,
    /// Deliberately counts action items, matching the service contract.
    pub key_points: usize,
    pub action_items: usize,
    pub compression_rate: u32,
    pub processing_time: String,
}

/// Normalized output of one summarization request. Immutable once built;
/// the current-result slot and the history both reference the same data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub action_items: Vec<ActionItem>,
    pub topics: Vec<String>,
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<String>,
    #[serde(rename = "keyInsights")]
    pub key_insights: Vec<String>,
    #[serde(rename = "processingStats")]
    pub processing_stats: ProcessingStats,
}

/// A past summary kept in the session history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    #[serde(flatten)]
    pub result: SummaryResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> SummaryResult {
        SummaryResult {
            summary: "The team reviewed Q3 planning.".into(),
            action_items: vec![ActionItem {
                text: "Send the weekly report".into(),
                owner: "Alice".into(),
                due: "Monday".into(),
            }],
            topics: vec!["Q3 Planning".into()],
            key_points: vec![],
            key_insights: vec![],
            processing_stats: ProcessingStats {
                words_processed: 120,
                key_points: 1,
                action_items: 1,
                compression_rate: 85,
                processing_time: "2.3s".into(),
            },
        }
    }

    #[test]
    fn result_serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample_result()).unwrap();
        assert!(value.get("action_items").is_some());
        assert!(value.get("keyPoints").is_some());
        assert!(value.get("keyInsights").is_some());
        let stats = value.get("processingStats").unwrap();
        assert_eq!(stats.get("wordsProcessed").unwrap(), 120);
        assert_eq!(stats.get("compressionRate").unwrap(), 85);
        assert_eq!(stats.get("processingTime").unwrap(), "2.3s");
    }

    #[test]
    fn history_entry_flattens_its_result() {
        let entry = HistoryEntry {
            id: "1724668800000-0001".into(),
            timestamp: "2026-08-26T10:00:00+00:00".into(),
            result: sample_result(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        // id/timestamp sit alongside the result fields in one flat record.
        assert_eq!(value.get("id").unwrap(), "1724668800000-0001");
        assert!(value.get("summary").is_some());
        assert!(value.get("topics").is_some());
    }
}
