pub mod error;
mod types;

pub use error::{FirecrawlError, Result};

use std::time::Duration;

use types::{ScrapeRequest, ScrapeResponse};

const BASE_URL: &str = "https://api.firecrawl.dev/v1";

/// Client for the Firecrawl `/scrape` endpoint. One URL in, one markdown
/// rendering out; crawling is out of scope.
pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch one page rendered to markdown. An empty string means the page
    /// was reachable but yielded no content.
    pub async fn scrape(&self, url: &str) -> Result<String> {
        let request = ScrapeRequest {
            url: url.to_string(),
            formats: vec!["markdown".to_string()],
            only_main_content: true,
        };

        tracing::debug!(url, "Firecrawl scrape");

        let resp = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ScrapeResponse = resp.json().await?;
        if !body.success {
            return Err(FirecrawlError::Rejected {
                url: url.to_string(),
            });
        }

        Ok(body.data.and_then(|d| d.markdown).unwrap_or_default())
    }
}
