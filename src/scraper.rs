use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;
use tracing::debug;
use crate::error::{AppError, Result};

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Yields the raw readable text behind a URL.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<String>;
}

/// Fetches the page over HTTP and keeps the visible text of its `<body>`.
#[derive(Clone)]
pub struct HttpExtractor {
    client: Client,
}

impl HttpExtractor {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Extraction(format!("{} responded with {}", url, status)));
        }

        let html = response.text().await?;
        Ok(html)
    }
}

#[async_trait]
impl ContentExtractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        let html = self.fetch_html(url).await?;
        debug!(url, bytes = html.len(), "Fetched HTML");

        let text = extract_body_text(&html)
            .ok_or_else(|| AppError::Extraction("No <body> tag found in the HTML".to_string()))?;
        let text = collapse_whitespace(&text);

        if text.is_empty() {
            return Err(AppError::Extraction(format!("{} has no readable text", url)));
        }

        Ok(text)
    }
}

/// Collects the text nodes under `<body>`, ignoring script and style content.
pub fn extract_body_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let body = document.select(&BODY_SELECTOR).next()?;

    let mut text = String::new();
    for node in body.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let skipped = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()));

        if !skipped {
            text.push_str(fragment);
            text.push('\n');
        }
    }

    Some(text)
}

/// Drops blank lines and trims the rest.
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(trimmed);
        }
    }

    result
}
