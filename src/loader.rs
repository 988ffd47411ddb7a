use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::analyzer::PageLoader;
use crate::data_models::Document;

const BODY_WIDTH: usize = 80;
const USER_AGENT: &str = "Mozilla/5.0 (compatible; geolens/0.1)";

/// Fetches pages over HTTP and reduces them to plain text. URLs that fail to
/// load or yield no text are skipped, never aborting the batch.
pub struct WebLoader {
    client: reqwest::Client,
}

impl WebLoader {
    pub fn new() -> Result<WebLoader> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(20))
            .build()
            .context("failed to build loader http client")?;
        Ok(WebLoader { client })
    }

    async fn load_one(&self, url: &str) -> Result<Document> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("{url} responded with status {}", response.status());
        }
        let html = response.text().await?;
        let content = html2text::from_read(html.as_bytes(), BODY_WIDTH)?;
        let content = content.trim().to_string();
        if content.is_empty() {
            anyhow::bail!("no text extracted from {url}");
        }
        Ok(Document {
            source: url.to_string(),
            content,
        })
    }
}

#[async_trait]
impl PageLoader for WebLoader {
    async fn load(&self, urls: &[String]) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(urls.len());
        for url in urls {
            match self.load_one(url).await {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!("skipping {url}: {e:#}");
                }
            }
        }
        Ok(documents)
    }
}
