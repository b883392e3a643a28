use crate::summary::SummaryResult;

pub const TXT_FILENAME: &str = "transcript-summary.txt";
pub const JSON_FILENAME: &str = "transcript-summary.json";

/// Compact rendering used by the Copy Summary control. Section headings
/// stay in place even when a section is empty.
pub fn clipboard_text(result: &SummaryResult) -> String {
    let items = result
        .action_items
        .iter()
        .map(|item| format!("• {} (Owner: {}, Due: {})", item.text, item.owner, item.due))
        .collect::<Vec<_>>()
        .join("\n");
    let topics = result
        .topics
        .iter()
        .map(|topic| format!("• {topic}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Summary: {}\n\nAction Items:\n{}\n\nTopics:\n{}",
        result.summary, items, topics
    )
    .trim()
    .to_string()
}

/// Plain-text report written by the .txt download.
pub fn report_text(result: &SummaryResult) -> String {
    let items = result
        .action_items
        .iter()
        .map(|item| {
            format!(
                "• {}\n  Owner: {}\n  Due: {}",
                item.text, item.owner, item.due
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    let topics = result
        .topics
        .iter()
        .map(|topic| format!("• {topic}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "TRANSCRIPT SUMMARY\n==================\n\nSummary: {}\n\nACTION ITEMS\n============\n{}\n\nTOPICS COVERED\n==============\n{}",
        result.summary, items, topics
    )
    .trim()
    .to_string()
}

/// Pretty-printed JSON written by the .json download.
pub fn json_text(result: &SummaryResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
