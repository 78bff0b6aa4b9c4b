use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use prospector_common::{CampaignRecord, Lead};

use crate::discovery::LeadDiscoverer;
use crate::identity::IdentityHunter;
use crate::privacy;
use crate::scout::ProspectScout;

/// Pause between leads. Politeness toward the search, scrape, and model
/// backends, not a correctness requirement.
const LEAD_DELAY: Duration = Duration::from_secs(2);

/// Default output document: the whole batch, overwritten each run.
const DEFAULT_OUTPUT_PATH: &str = "campaign_records.json";

/// Stats from one campaign run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub leads_discovered: u32,
    pub leads_skipped: u32,
    pub records_written: u32,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Campaign Run Complete ===")?;
        writeln!(f, "Leads discovered: {}", self.leads_discovered)?;
        writeln!(f, "Leads skipped:    {}", self.leads_skipped)?;
        writeln!(f, "Records written:  {}", self.records_written)?;
        Ok(())
    }
}

/// Sequences Discoverer → {Scout → IdentityHunter → PrivacyMask} per lead,
/// accumulates unmasked records, persists the batch, and prints masked
/// previews.
pub struct Pipeline {
    discoverer: LeadDiscoverer,
    scout: ProspectScout,
    hunter: IdentityHunter,
    output_path: PathBuf,
    lead_delay: Duration,
}

impl Pipeline {
    pub fn new(discoverer: LeadDiscoverer, scout: ProspectScout, hunter: IdentityHunter) -> Self {
        Self {
            discoverer,
            scout,
            hunter,
            output_path: DEFAULT_OUTPUT_PATH.into(),
            lead_delay: LEAD_DELAY,
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_lead_delay(mut self, delay: Duration) -> Self {
        self.lead_delay = delay;
        self
    }

    /// Run the full pipeline for one niche query. Leads are processed
    /// strictly one at a time; a failing lead is skipped, never aborts the
    /// run. Only the final batch write can fail.
    pub async fn run(&self, niche_query: &str, count: usize) -> Result<RunStats> {
        let mut stats = RunStats::default();

        let leads = self.discoverer.find_companies(niche_query, count).await;
        stats.leads_discovered = leads.len() as u32;
        if leads.is_empty() {
            info!("No leads found, nothing to do");
            self.persist(&[])?;
            return Ok(stats);
        }

        let total = leads.len();
        let mut records: Vec<CampaignRecord> = Vec::new();
        for (index, lead) in leads.iter().enumerate() {
            info!(
                name = lead.name.as_str(),
                url = lead.url.as_str(),
                "Processing lead {}/{total}",
                index + 1
            );

            match self.process_lead(lead, index).await {
                Some(record) => records.push(record),
                None => stats.leads_skipped += 1,
            }

            if index + 1 < total {
                tokio::time::sleep(self.lead_delay).await;
            }
        }

        stats.records_written = records.len() as u32;
        self.persist(&records)?;
        info!(
            path = %self.output_path.display(),
            records = records.len(),
            "Campaign records written"
        );

        Ok(stats)
    }

    /// One lead, fully sequential: scrape → analyze → identity → record.
    /// Collaborator failures are already degraded inside the components;
    /// the only skip condition left is a content-less site.
    async fn process_lead(&self, lead: &Lead, index: usize) -> Option<CampaignRecord> {
        let content = self.scout.scrape(&lead.url).await;
        if content.is_empty() {
            warn!(url = lead.url.as_str(), "No content retrieved, skipping lead");
            return None;
        }

        let site_text = content.combined();

        let mut business = self.scout.analyze(&site_text, &lead.name).await;
        business
            .extra
            .insert("source_url".to_string(), Value::String(lead.url.clone()));

        let decision_maker = self
            .hunter
            .find_decision_maker(&business.company_name, &site_text)
            .await;

        let masked = privacy::mask(&business, index);
        match serde_json::to_string_pretty(&masked) {
            Ok(preview) => println!("\n[+] {} profile preview:\n{preview}", masked.company_name),
            Err(e) => warn!(error = %e, "Failed to render masked preview"),
        }

        Some(CampaignRecord {
            business,
            decision_maker,
        })
    }

    fn persist(&self, records: &[CampaignRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .context("Failed to serialize campaign records")?;
        std::fs::write(&self.output_path, json)
            .with_context(|| format!("Failed to write {}", self.output_path.display()))?;
        Ok(())
    }
}
