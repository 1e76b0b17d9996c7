use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::pipeline::PipelineOutcome;
use crate::record::SummaryRecord;

#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SummaryResponse {
    pub url: String,
    pub title: String,
    pub english_summary: String,
    pub urdu_summary: String,
    pub created_at: DateTime<Utc>,
    pub cached: bool,
}

impl SummaryResponse {
    pub fn from_record(record: SummaryRecord, cached: bool) -> Self {
        Self {
            url: record.url,
            title: record.title,
            english_summary: record.english_summary,
            urdu_summary: record.urdu_summary,
            created_at: record.created_at,
            cached,
        }
    }
}

impl From<PipelineOutcome> for SummaryResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        let cached = outcome.is_cached();
        Self::from_record(outcome.record, cached)
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub stored_summaries: u64,
}
