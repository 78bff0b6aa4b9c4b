use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use ai_client::util::{strip_code_blocks, truncate_to_char_boundary};
use prospector_common::{BusinessProfile, ScrapedContent};

use crate::traits::{ChatModel, PageFetcher};

/// Max content submitted to the model, in bytes. Truncation, not
/// summarization: enough signal for profiling at bounded request cost.
const MAX_CONTENT_LEN: usize = 5000;

/// Markdown links whose text names a leadership page. Only the first match
/// is followed.
static ABOUT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[([^\]]*?(?:About|Team|Leadership|Who we are|Staff)[^\]]*?)\]\(([^)]*?)\)")
        .unwrap()
});

fn analysis_system_prompt(fallback_name: &str) -> String {
    format!(
        r#"You are a Senior Sales Strategist. Analyze the provided website content.
Your output must be a single valid JSON object with exactly this structure:

{{
  "company_name": "Name of the entity",
  "core_services": "Brief description of what they sell",
  "target_audience": "Who they serve",
  "identified_inefficiencies": ["task 1", "task 2"],
  "automation_hypothesis": "One-sentence pitch for automating the inefficiencies"
}}

If you cannot find the company name, use "{fallback_name}".
The inefficiencies and the hypothesis must cover operational and
administrative overhead only (scheduling, intake, quoting, reporting,
follow-up, data entry). Never propose automating the company's own core
paid offering."#
    )
}

/// Gathers site content for a lead and turns it into a business profile.
pub struct ProspectScout {
    fetcher: Arc<dyn PageFetcher>,
    model: Arc<dyn ChatModel>,
}

impl ProspectScout {
    pub fn new(fetcher: Arc<dyn PageFetcher>, model: Arc<dyn ChatModel>) -> Self {
        Self { fetcher, model }
    }

    /// Fetch the primary page and, when the content links to a leadership
    /// page, that page too. Every failure degrades: a primary-fetch error
    /// yields empty content, an about-fetch error leaves `about_text`
    /// empty. Never errors; the caller treats "no content" as a
    /// recoverable outcome.
    pub async fn scrape(&self, url: &str) -> ScrapedContent {
        info!(url, "Gathering site content");

        let main_text = match self.fetcher.fetch_markdown(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url, error = %e, "Primary scrape failed");
                return ScrapedContent::default();
            }
        };
        if main_text.is_empty() {
            warn!(url, "Primary scrape returned no content");
            return ScrapedContent::default();
        }

        let mut about_text = String::new();
        if let Some(about_url) = find_about_link(&main_text, url) {
            info!(about_url = about_url.as_str(), "Found leadership page");
            match self.fetcher.fetch_markdown(&about_url).await {
                Ok(text) => about_text = text,
                Err(e) => {
                    warn!(about_url = about_url.as_str(), error = %e, "About page scrape failed");
                }
            }
        }

        ScrapedContent {
            main_text,
            about_text,
        }
    }

    /// Ask the model for a structured business profile. The model is an
    /// unreliable oracle: call errors and unusable output degrade to a
    /// minimal valid profile carrying `fallback_name` and an error
    /// sentinel. The returned profile always has a non-empty company name.
    pub async fn analyze(&self, content: &str, fallback_name: &str) -> BusinessProfile {
        info!(fallback_name, "Analyzing business model");

        let body = if content.is_empty() {
            "No content"
        } else {
            truncate_to_char_boundary(content, MAX_CONTENT_LEN)
        };
        let system = analysis_system_prompt(fallback_name);
        let user = format!("Website Content:\n{body}");

        let raw = match self.model.complete(Some(&system), &user, true).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Analysis model call failed");
                return BusinessProfile::fallback(fallback_name, e.to_string());
            }
        };

        parse_profile(&raw, fallback_name)
    }
}

/// Parse-or-fallback boundary for model output.
fn parse_profile(raw: &str, fallback_name: &str) -> BusinessProfile {
    let mut extra = match serde_json::from_str::<Value>(strip_code_blocks(raw)) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Model returned non-object JSON");
            return BusinessProfile::fallback(fallback_name, "model returned non-object JSON");
        }
        Err(e) => {
            warn!(error = %e, "Model returned unparsable output");
            return BusinessProfile::fallback(fallback_name, format!("unparsable model output: {e}"));
        }
    };

    let company_name = match extra.remove("company_name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name,
        _ => fallback_name.to_string(),
    };

    BusinessProfile {
        company_name,
        extra,
    }
}

/// Resolve the first leadership-page link in the markdown, if any.
/// Root-relative targets are resolved against the page's origin; absolute
/// http(s) targets are used as-is; anything else is skipped.
fn find_about_link(markdown: &str, page_url: &str) -> Option<String> {
    let captures = ABOUT_LINK_RE.captures(markdown)?;
    let target = captures.get(2)?.as_str().trim();

    if target.starts_with('/') {
        let base = Url::parse(page_url).ok()?;
        Some(format!("{}{}", base.origin().ascii_serialization(), target))
    } else if target.starts_with("http://") || target.starts_with("https://") {
        Some(target.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFetcher, ScriptedChat};

    #[test]
    fn about_link_resolves_root_relative_paths() {
        let markdown = "Welcome!\n[About Us](/about)\n[Contact](/contact)";
        assert_eq!(
            find_about_link(markdown, "https://foo.com/home"),
            Some("https://foo.com/about".to_string())
        );
    }

    #[test]
    fn about_link_keeps_absolute_urls() {
        let markdown = "[Our Team](https://cdn.foo.com/team)";
        assert_eq!(
            find_about_link(markdown, "https://foo.com"),
            Some("https://cdn.foo.com/team".to_string())
        );
    }

    #[test]
    fn about_link_skips_unresolvable_targets() {
        assert_eq!(find_about_link("[About](about.html)", "https://foo.com"), None);
        assert_eq!(find_about_link("no links here", "https://foo.com"), None);
    }

    #[test]
    fn about_link_takes_first_match_only() {
        let markdown = "[Who we are](/who)\n[Team](/team)";
        assert_eq!(
            find_about_link(markdown, "https://foo.com"),
            Some("https://foo.com/who".to_string())
        );
    }

    #[test]
    fn about_link_matches_case_insensitively() {
        assert_eq!(
            find_about_link("[ABOUT US](/about)", "https://foo.com"),
            Some("https://foo.com/about".to_string())
        );
    }

    #[tokio::test]
    async fn scrape_degrades_to_empty_on_primary_failure() {
        let scout = ProspectScout::new(
            Arc::new(MockFetcher::new()),
            Arc::new(ScriptedChat::new()),
        );
        assert!(scout.scrape("https://unreachable.com").await.is_empty());
    }

    #[tokio::test]
    async fn scrape_tolerates_about_page_failure() {
        let fetcher = MockFetcher::new().on_page("https://foo.com", "Hi [About](/about)");
        let scout = ProspectScout::new(Arc::new(fetcher), Arc::new(ScriptedChat::new()));

        let content = scout.scrape("https://foo.com").await;
        assert_eq!(content.main_text, "Hi [About](/about)");
        assert!(content.about_text.is_empty());
    }

    #[tokio::test]
    async fn scrape_fetches_about_page_when_linked() {
        let fetcher = MockFetcher::new()
            .on_page("https://foo.com", "Hi [About](/about)")
            .on_page("https://foo.com/about", "Founded by Jane Doe.");
        let scout = ProspectScout::new(Arc::new(fetcher), Arc::new(ScriptedChat::new()));

        let content = scout.scrape("https://foo.com").await;
        assert_eq!(content.about_text, "Founded by Jane Doe.");
    }

    #[tokio::test]
    async fn analyze_parses_model_profile() {
        let chat = ScriptedChat::new()
            .then_text(r#"{"company_name":"Acme","core_services":"widgets"}"#);
        let scout = ProspectScout::new(Arc::new(MockFetcher::new()), Arc::new(chat));

        let profile = scout.analyze("Acme makes widgets.", "fallback").await;
        assert_eq!(profile.company_name, "Acme");
        assert_eq!(profile.extra["core_services"], "widgets");
    }

    #[tokio::test]
    async fn analyze_strips_code_fences() {
        let chat = ScriptedChat::new().then_text("```json\n{\"company_name\":\"Acme\"}\n```");
        let scout = ProspectScout::new(Arc::new(MockFetcher::new()), Arc::new(chat));

        let profile = scout.analyze("content", "fallback").await;
        assert_eq!(profile.company_name, "Acme");
    }

    #[tokio::test]
    async fn analyze_backfills_missing_company_name() {
        let chat = ScriptedChat::new().then_text(r#"{"core_services":"widgets"}"#);
        let scout = ProspectScout::new(Arc::new(MockFetcher::new()), Arc::new(chat));

        let profile = scout.analyze("", "Acme").await;
        assert_eq!(profile.company_name, "Acme");
        assert_eq!(profile.extra["core_services"], "widgets");
    }

    #[tokio::test]
    async fn analyze_falls_back_on_model_failure() {
        let chat = ScriptedChat::new().then_error("model unavailable");
        let scout = ProspectScout::new(Arc::new(MockFetcher::new()), Arc::new(chat));

        let profile = scout.analyze("", "Acme").await;
        assert_eq!(profile.company_name, "Acme");
        assert!(profile.extra.contains_key("error"));
    }

    #[tokio::test]
    async fn analyze_falls_back_on_unparsable_output() {
        let chat = ScriptedChat::new().then_text("sorry, I can't help with that");
        let scout = ProspectScout::new(Arc::new(MockFetcher::new()), Arc::new(chat));

        let profile = scout.analyze("content", "Acme").await;
        assert_eq!(profile.company_name, "Acme");
        assert!(profile.extra.contains_key("error"));
    }
}
