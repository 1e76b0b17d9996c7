use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::record::{derive_title, SummaryRecord};
use crate::scraper::ContentExtractor;
use crate::store::CacheStore;
use crate::summarizer::summarize;
use crate::translator::Translator;

const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a returned record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Cache,
    Fresh,
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub record: SummaryRecord,
    pub source: RecordSource,
}

impl PipelineOutcome {
    pub fn is_cached(&self) -> bool {
        self.source == RecordSource::Cache
    }
}

/// Lookup, then on a miss: extract, summarize, translate, persist.
pub struct Pipeline {
    store: Arc<dyn CacheStore>,
    extractor: Arc<dyn ContentExtractor>,
    translator: Translator,
    extract_timeout: Duration,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn CacheStore>,
        extractor: Arc<dyn ContentExtractor>,
        translator: Translator,
    ) -> Self {
        Self {
            store,
            extractor,
            translator,
            extract_timeout: DEFAULT_EXTRACT_TIMEOUT,
        }
    }

    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.extract_timeout = timeout;
        self
    }

    pub async fn summarize_url(&self, url: &str) -> Result<PipelineOutcome> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidInput("Please enter a valid blog URL".to_string()));
        }

        // A stored record is returned as-is, even if the translation table changed since.
        if let Some(record) = self.store.lookup(url).await? {
            info!(url, "Cache hit");
            return Ok(PipelineOutcome {
                record,
                source: RecordSource::Cache,
            });
        }

        debug!(url, "Cache miss, extracting content");
        let raw_text = self.extract(url).await?;

        let english_summary = summarize(&raw_text);
        let urdu_summary = self.translator.translate(&english_summary);
        let record = SummaryRecord::new(url, derive_title(&raw_text), english_summary, urdu_summary);
        debug!(url, title = %record.title, "Summary and translation ready");

        if let Err(err) = self.store.insert(&record).await {
            warn!(
                url,
                error = %err,
                english_summary = %record.english_summary,
                "Failed to persist summary; request aborted"
            );
            return Err(err);
        }

        info!(url, "Stored new summary");
        Ok(PipelineOutcome {
            record,
            source: RecordSource::Fresh,
        })
    }

    /// Reads a stored record without computing anything.
    pub async fn lookup(&self, url: &str) -> Result<Option<SummaryRecord>> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidInput("URL must not be empty".to_string()));
        }
        self.store.lookup(url).await
    }

    pub async fn stored_count(&self) -> Result<u64> {
        self.store.count().await
    }

    async fn extract(&self, url: &str) -> Result<String> {
        let start = Instant::now();

        let text = match tokio::time::timeout(self.extract_timeout, self.extractor.extract(url)).await {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                warn!(url, error = %err, "Extraction failed");
                return Err(match err {
                    AppError::Extraction(_) => err,
                    other => AppError::Extraction(other.to_string()),
                });
            }
            Err(_) => {
                warn!(url, timeout = ?self.extract_timeout, "Extraction timed out");
                return Err(AppError::Extraction(format!(
                    "Extraction timed out after {:?}",
                    self.extract_timeout
                )));
            }
        };

        if text.trim().is_empty() {
            return Err(AppError::Extraction(format!("{} returned no usable text", url)));
        }

        debug!(url, chars = text.len(), elapsed = ?start.elapsed(), "Extraction finished");
        Ok(text)
    }
}
