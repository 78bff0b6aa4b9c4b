use serde::Deserialize;

/// Options for one search call.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Language/region code, e.g. "en-US".
    pub region: String,
    /// Engage the engine-side safe-search filter.
    pub safesearch: bool,
    /// Cap on returned results. SearXNG has no limit parameter, so the
    /// client truncates the result list.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            region: "en-US".to_string(),
            safesearch: false,
            max_results: 10,
        }
    }
}

/// Top-level body of `/search?format=json`.
#[derive(Debug, Deserialize)]
pub struct SearxResponse {
    #[serde(default)]
    pub results: Vec<SearxResult>,
}

/// One search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearxResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Result snippet; SearXNG calls this field `content`.
    #[serde(default)]
    pub content: String,
}
