//! End-to-end pipeline run against mock collaborators: one discovered
//! lead, no about-page link, a clean analysis, and a failed decision-maker
//! lookup. Checks the persisted batch and the masked preview transform.

use std::sync::Arc;
use std::time::Duration;

use prospector::discovery::LeadDiscoverer;
use prospector::identity::IdentityHunter;
use prospector::pipeline::Pipeline;
use prospector::privacy;
use prospector::scout::ProspectScout;
use prospector::testing::{FailingSearcher, MockFetcher, MockSearcher, ScriptedChat};
use prospector_common::{CampaignRecord, SearchResult};

#[tokio::test]
async fn full_run_persists_unmasked_records_and_masks_previews() {
    let searcher = Arc::new(MockSearcher::returning(vec![SearchResult {
        url: "https://acme.com".to_string(),
        title: "Acme".to_string(),
        snippet: "Acme homepage".to_string(),
    }]));
    let fetcher = Arc::new(
        MockFetcher::new().on_page("https://acme.com", "Welcome to Acme. We make widgets."),
    );
    // Call order: analysis, identity extraction, identity resolution.
    let chat = Arc::new(
        ScriptedChat::new()
            .then_text(r#"{"company_name": "Acme", "core_services": "widgets"}"#)
            .then_error("model unavailable")
            .then_error("model unavailable"),
    );

    let dir = tempfile::tempdir().expect("tempdir");
    let output_path = dir.path().join("campaign_records.json");

    let pipeline = Pipeline::new(
        LeadDiscoverer::new(searcher.clone()),
        ProspectScout::new(fetcher, chat.clone()),
        IdentityHunter::new(searcher, chat),
    )
    .with_output_path(&output_path)
    .with_lead_delay(Duration::ZERO);

    let stats = pipeline.run("widget makers austin", 1).await.expect("run");
    assert_eq!(stats.leads_discovered, 1);
    assert_eq!(stats.leads_skipped, 0);
    assert_eq!(stats.records_written, 1);

    let raw = std::fs::read_to_string(&output_path).expect("read output");
    let records: Vec<CampaignRecord> = serde_json::from_str(&raw).expect("parse output");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.business.company_name, "Acme");
    assert_eq!(record.business.extra["core_services"], "widgets");
    assert_eq!(record.business.extra["source_url"], "https://acme.com");
    assert!(
        record.decision_maker.contains_key("error"),
        "failed lookup must degrade to an error sentinel"
    );

    // The preview transform of the persisted record leaks nothing.
    let masked = privacy::mask(&record.business, 0);
    assert_eq!(masked.company_name, "Target-A");
    assert_eq!(masked.extra["source_url"], "[redacted]");
    let rendered = serde_json::to_string(&masked).expect("render masked");
    assert!(!rendered.to_lowercase().contains("acme"));
}

#[tokio::test]
async fn content_less_lead_is_skipped_not_fatal() {
    let searcher = Arc::new(MockSearcher::returning(vec![
        SearchResult {
            url: "https://dead.com".to_string(),
            title: "Dead Site".to_string(),
            snippet: String::new(),
        },
        SearchResult {
            url: "https://alive.com".to_string(),
            title: "Alive Co".to_string(),
            snippet: String::new(),
        },
    ]));
    // Only the second lead's page exists.
    let fetcher = Arc::new(MockFetcher::new().on_page("https://alive.com", "Alive Co fixes pipes."));
    let chat = Arc::new(
        ScriptedChat::new()
            .then_text(r#"{"company_name": "Alive Co", "core_services": "plumbing"}"#)
            .then_text(r#"{"name": null, "title": null}"#)
            .then_text(r#"{"full_name": "Pat Doe", "linkedin_url": "", "x_url": ""}"#),
    );

    let dir = tempfile::tempdir().expect("tempdir");
    let output_path = dir.path().join("campaign_records.json");

    let pipeline = Pipeline::new(
        LeadDiscoverer::new(searcher.clone()),
        ProspectScout::new(fetcher, chat.clone()),
        IdentityHunter::new(searcher, chat),
    )
    .with_output_path(&output_path)
    .with_lead_delay(Duration::ZERO);

    let stats = pipeline.run("plumbers", 2).await.expect("run");
    assert_eq!(stats.leads_discovered, 2);
    assert_eq!(stats.leads_skipped, 1);
    assert_eq!(stats.records_written, 1);

    let raw = std::fs::read_to_string(&output_path).expect("read output");
    let records: Vec<CampaignRecord> = serde_json::from_str(&raw).expect("parse output");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].business.company_name, "Alive Co");
    assert_eq!(records[0].decision_maker["full_name"], "Pat Doe");
}

#[tokio::test]
async fn discovery_failure_completes_with_empty_batch() {
    let chat = Arc::new(ScriptedChat::new());
    let pipeline = Pipeline::new(
        LeadDiscoverer::new(Arc::new(FailingSearcher)),
        ProspectScout::new(Arc::new(MockFetcher::new()), chat.clone()),
        IdentityHunter::new(Arc::new(FailingSearcher), chat),
    );

    let dir = tempfile::tempdir().expect("tempdir");
    let output_path = dir.path().join("campaign_records.json");
    let pipeline = pipeline
        .with_output_path(&output_path)
        .with_lead_delay(Duration::ZERO);

    let stats = pipeline.run("anything", 3).await.expect("run");
    assert_eq!(stats.leads_discovered, 0);
    assert_eq!(stats.records_written, 0);

    let raw = std::fs::read_to_string(&output_path).expect("read output");
    let records: Vec<CampaignRecord> = serde_json::from_str(&raw).expect("parse output");
    assert!(records.is_empty());
}
