use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use ai_client::util::{strip_code_blocks, truncate_to_char_boundary};
use prospector_common::DecisionMakerRecord;
use searx_client::SearchOptions;

use crate::traits::{ChatModel, WebSearcher};

/// Max site text submitted to the extraction prompt, in bytes.
const MAX_SITE_CONTEXT_LEN: usize = 5000;

/// Result cap for the verification search. The model sees a short block of
/// snippets, not full pages.
const SEARCH_RESULT_CAP: usize = 5;

/// Resolves a company's decision-maker: name plus social profile URLs.
pub struct IdentityHunter {
    searcher: Arc<dyn WebSearcher>,
    model: Arc<dyn ChatModel>,
}

impl IdentityHunter {
    pub fn new(searcher: Arc<dyn WebSearcher>, model: Arc<dyn ChatModel>) -> Self {
        Self { searcher, model }
    }

    /// Two-stage lookup: try to read a name straight off the site text,
    /// then search the web and let the model resolve canonical profile
    /// URLs. Failures degrade to an `{error}` record; the caller treats
    /// that as "decision-maker unknown", never as fatal.
    pub async fn find_decision_maker(
        &self,
        company_name: &str,
        site_text: &str,
    ) -> DecisionMakerRecord {
        info!(company_name, "Hunting for decision-maker");

        let name_on_site = self.extract_name_from_site(company_name, site_text).await;
        match &name_on_site {
            Some(name) => info!(name = name.as_str(), "Verifying socials for name found on site"),
            None => info!(company_name, "No name on site, searching for leadership"),
        }

        let query = build_search_query(company_name, name_on_site.as_deref());

        match self.resolve_profiles(company_name, &query).await {
            Ok(record) => record,
            Err(e) => {
                warn!(company_name, error = %e, "Decision-maker resolution failed");
                let mut record = Map::new();
                record.insert("error".to_string(), Value::String(e.to_string()));
                record
            }
        }
    }

    /// Extraction stage: ask the model for a name from site text. Every
    /// failure mode collapses to None, identical to "no name found".
    async fn extract_name_from_site(&self, company_name: &str, site_text: &str) -> Option<String> {
        let prompt = format!(
            "Analyze this website text from {company_name}. Find the Full Name and Title \
             of the Founder, CEO, or Owner.\n\
             Text: {context}\n\
             Return JSON: {{\"name\": \"Name or null\", \"title\": \"Title or null\"}}",
            context = truncate_to_char_boundary(site_text, MAX_SITE_CONTEXT_LEN),
        );

        let raw = self.model.complete(None, &prompt, true).await.ok()?;
        let parsed: Value = serde_json::from_str(strip_code_blocks(&raw)).ok()?;
        let name = parsed.get("name")?.as_str()?.trim().to_string();

        if name.is_empty() || name.eq_ignore_ascii_case("null") {
            None
        } else {
            Some(name)
        }
    }

    /// Search-and-resolve stage: targeted search, snippet context block,
    /// model resolution of profile URLs, then URL sanitization.
    async fn resolve_profiles(
        &self,
        company_name: &str,
        query: &str,
    ) -> anyhow::Result<DecisionMakerRecord> {
        let opts = SearchOptions {
            region: "en-US".to_string(),
            safesearch: false,
            max_results: SEARCH_RESULT_CAP,
        };
        let results = self.searcher.search(query, &opts).await?;

        let context = results
            .iter()
            .map(|r| format!("{} - {}", r.url, r.snippet))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Identify the Founder/CEO LinkedIn and X.com URLs.\n\
             Company: {company_name}\n\
             Context: {context}\n\
             Return JSON: {{\"full_name\": \"Name\", \"linkedin_url\": \"URL\", \"x_url\": \"URL\"}}"
        );

        let raw = self.model.complete(None, &prompt, true).await?;
        let parsed: Value = serde_json::from_str(strip_code_blocks(&raw))?;
        let Value::Object(mut record) = parsed else {
            anyhow::bail!("model returned non-object JSON");
        };

        for key in ["linkedin_url", "x_url"] {
            let cleaned = record
                .get(key)
                .and_then(Value::as_str)
                .map(clean_url)
                .unwrap_or_default();
            record.insert(key.to_string(), Value::String(cleaned));
        }

        Ok(record)
    }
}

/// With a name in hand the search verifies that person; without one it
/// goes broad on leadership keywords, excluding the sports-franchise noise
/// that plagues common-surname queries.
fn build_search_query(company_name: &str, name_on_site: Option<&str>) -> String {
    match name_on_site {
        Some(name) => format!("\"{name}\" {company_name} LinkedIn X"),
        None => format!("{company_name} Founder CEO owner LinkedIn -NHL -Sports -Hockey"),
    }
}

/// Null out URLs that are empty, literal "null", or platform home/login
/// pages rather than actual profile pages.
fn clean_url(url: &str) -> String {
    if url.is_empty() || url.contains("null") || url.contains("home.x.com") || url.contains("login")
    {
        String::new()
    } else {
        url.to_string()
    }
}
