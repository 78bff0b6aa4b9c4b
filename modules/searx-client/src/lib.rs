pub mod error;
pub mod types;

pub use error::{Result, SearxError};
pub use types::{SearchOptions, SearxResult};

use std::time::Duration;

use types::SearxResponse;

/// Client for a SearXNG instance's JSON search API. Keyless; the instance
/// is expected to be self-hosted or otherwise trusted.
pub struct SearxClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearxClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run one search query. Zero hits is an empty Vec, not an error.
    pub async fn search(&self, query: &str, opts: &SearchOptions) -> Result<Vec<SearxResult>> {
        let url = format!("{}/search", self.base_url);
        let safesearch = if opts.safesearch { "1" } else { "0" };

        tracing::debug!(
            query,
            region = %opts.region,
            max_results = opts.max_results,
            "SearXNG query"
        );

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("language", opts.region.as_str()),
                ("safesearch", safesearch),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SearxError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearxResponse = resp.json().await?;

        let mut results = body.results;
        results.truncate(opts.max_results);
        Ok(results)
    }
}
