use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single web search hit as returned by the search collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// A discovered company candidate, before any enrichment.
/// Unique by `url` within a single discovery batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub url: String,
}

/// Page text gathered for one lead. Empty strings mean "no content
/// available", never None. `about_text` is only populated when a
/// secondary leadership page was found and fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedContent {
    pub main_text: String,
    pub about_text: String,
}

impl ScrapedContent {
    pub fn is_empty(&self) -> bool {
        self.main_text.is_empty() && self.about_text.is_empty()
    }

    /// Main and about text joined for model consumption.
    pub fn combined(&self) -> String {
        if self.about_text.is_empty() {
            self.main_text.clone()
        } else {
            format!("{}\n\n{}", self.main_text, self.about_text)
        }
    }
}

/// Model-inferred profile of a target business.
///
/// `company_name` is always present and non-empty after analysis: the
/// analyzer back-fills it from the lead's display name when the model
/// omits it. Everything else is model-defined and lives in `extra`
/// (core_services, target_audience, identified_inefficiencies,
/// automation_hypothesis, source_url, error, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub company_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BusinessProfile {
    /// Minimal valid profile produced when analysis fails.
    pub fn fallback(name: &str, error: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("error".to_string(), Value::String(error.into()));
        Self {
            company_name: name.to_string(),
            extra,
        }
    }
}

/// Resolved decision-maker details (typically full_name, linkedin_url,
/// x_url, or an error sentinel). Every field is optional by contract;
/// consumers must treat the record as free-form.
pub type DecisionMakerRecord = Map<String, Value>;

/// One fully-processed lead: unmasked profile plus decision-maker lookup.
/// Appended in run order; the whole batch is persisted at run end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub business: BusinessProfile,
    pub decision_maker: DecisionMakerRecord,
}
