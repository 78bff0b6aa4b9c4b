use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Language model (any OpenAI-compatible endpoint; local Ollama by default)
    pub llm_base_url: String,
    pub llm_api_key: String,
    pub llm_model: String,

    // Scraping
    pub firecrawl_api_key: String,

    // Search
    pub searxng_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            llm_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            llm_api_key: env::var("OLLAMA_API_KEY").unwrap_or_else(|_| "ollama".to_string()),
            llm_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3".to_string()),
            firecrawl_api_key: required_env("FIRECRAWL_API_KEY"),
            searxng_base_url: env::var("SEARXNG_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
        }
    }

    /// Log the effective configuration without exposing credentials.
    pub fn log_redacted(&self) {
        tracing::info!(
            llm_base_url = %self.llm_base_url,
            llm_model = %self.llm_model,
            searxng_base_url = %self.searxng_base_url,
            firecrawl_api_key = %redact(&self.firecrawl_api_key),
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

/// Keep only the last four characters of a secret.
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_keeps_only_tail() {
        assert_eq!(redact("fc-1234567890"), "****7890");
    }

    #[test]
    fn redact_hides_short_secrets_entirely() {
        assert_eq!(redact("abcd"), "****");
        assert_eq!(redact(""), "****");
    }
}
