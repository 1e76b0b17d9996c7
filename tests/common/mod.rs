#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use blog_summariser::error::{AppError, Result};
use blog_summariser::pipeline::Pipeline;
use blog_summariser::record::SummaryRecord;
use blog_summariser::scraper::ContentExtractor;
use blog_summariser::store::CacheStore;
use blog_summariser::translator::{TranslationTable, Translator};

/// In-memory store with the same uniqueness rule as the SQLite one.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, SummaryRecord>>,
    /// When set, lookups always miss, as if keys were normalized differently.
    pub blind_lookups: bool,
    pub unavailable: bool,
    /// Lookups still work, but every insert fails as if the store went away.
    pub fail_inserts: bool,
}

impl MemoryStore {
    pub fn preloaded(record: SummaryRecord) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().insert(record.url.clone(), record);
        store
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn lookup(&self, url: &str) -> Result<Option<SummaryRecord>> {
        if self.unavailable {
            return Err(AppError::StoreUnavailable("connection refused".to_string()));
        }
        if self.blind_lookups {
            return Ok(None);
        }
        Ok(self.records.lock().unwrap().get(url).cloned())
    }

    async fn insert(&self, record: &SummaryRecord) -> Result<()> {
        if self.unavailable || self.fail_inserts {
            return Err(AppError::StoreUnavailable("connection refused".to_string()));
        }
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.url) {
            return Err(AppError::Conflict { url: record.url.clone() });
        }
        records.insert(record.url.clone(), record.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.lock().unwrap().len() as u64)
    }
}

/// Extractor serving fixed text per URL and counting calls.
#[derive(Default)]
pub struct ScriptedExtractor {
    pages: HashMap<String, String>,
    pub delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn with_page(url: &str, text: &str) -> Self {
        let mut extractor = Self::default();
        extractor.pages.insert(url.to_string(), text.to_string());
        extractor
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentExtractor for ScriptedExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Extraction(format!("404 for {}", url)))
    }
}

pub const POST_URL: &str = "https://example.com/blog/rust";
pub const POST_TEXT: &str = "The blog post is great. It covers software design. Data matters. Nothing else.";

pub fn translator() -> Translator {
    Translator::new(Arc::new(TranslationTable::built_in()))
}

pub fn pipeline(store: Arc<dyn CacheStore>, extractor: Arc<dyn ContentExtractor>) -> Pipeline {
    Pipeline::new(store, extractor, translator())
}
