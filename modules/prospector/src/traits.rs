// Trait abstractions over the three external collaborators.
//
// Each pipeline component takes Arc<dyn ...> instances, so tests swap in
// the map-backed mocks from `testing`: no network, no live model.

use anyhow::Result;
use async_trait::async_trait;

use prospector_common::SearchResult;
use searx_client::{SearchOptions, SearxClient};

// ---------------------------------------------------------------------------
// WebSearcher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Run one search query. Zero hits must be `Ok(empty)`, not an error.
    async fn search(&self, query: &str, opts: &SearchOptions) -> Result<Vec<SearchResult>>;
}

#[async_trait]
impl WebSearcher for SearxClient {
    async fn search(&self, query: &str, opts: &SearchOptions) -> Result<Vec<SearchResult>> {
        let hits = SearxClient::search(self, query, opts).await?;
        Ok(hits
            .into_iter()
            .map(|h| SearchResult {
                url: h.url,
                title: h.title,
                snippet: h.content,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page rendered to markdown-like text.
    async fn fetch_markdown(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl PageFetcher for firecrawl_client::FirecrawlClient {
    async fn fetch_markdown(&self, url: &str) -> Result<String> {
        Ok(self.scrape(url).await?)
    }
}

// ---------------------------------------------------------------------------
// ChatModel
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// One-shot completion. With `force_json` the endpoint is asked for a
    /// JSON object, but callers must re-validate the text regardless.
    async fn complete(&self, system: Option<&str>, user: &str, force_json: bool)
        -> Result<String>;
}

#[async_trait]
impl ChatModel for ai_client::OpenAi {
    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        force_json: bool,
    ) -> Result<String> {
        ai_client::OpenAi::complete(self, system, user, force_json).await
    }
}
