use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_TITLE: &str = "Blog Summary";
const MAX_TITLE_LEN: usize = 50;

/// A persisted summary, keyed by the exact URL it was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub url: String,
    pub title: String,
    pub english_summary: String,
    pub urdu_summary: String,
    pub created_at: DateTime<Utc>,
}

impl SummaryRecord {
    pub fn new(url: &str, title: String, english_summary: String, urdu_summary: String) -> Self {
        Self {
            url: url.to_string(),
            title,
            english_summary,
            urdu_summary,
            // Millisecond precision survives the round trip through storage unchanged
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Picks a title from the first sentence of the raw text, or a generic one
/// when that sentence is missing or too long to read as a heading.
pub fn derive_title(raw_text: &str) -> String {
    let first = raw_text
        .split('.')
        .map(str::trim)
        .find(|candidate| !candidate.is_empty());

    match first {
        Some(sentence) if sentence.chars().count() <= MAX_TITLE_LEN => sentence.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}
