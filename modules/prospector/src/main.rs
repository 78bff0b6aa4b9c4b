use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::OpenAi;
use firecrawl_client::FirecrawlClient;
use prospector_common::Config;
use searx_client::SearxClient;

use prospector::discovery::LeadDiscoverer;
use prospector::identity::IdentityHunter;
use prospector::pipeline::Pipeline;
use prospector::scout::ProspectScout;

/// Output document for the single-site entry mode.
const PROFILE_OUTPUT_PATH: &str = "prospect_profile.json";

/// Lead-generation scout: discover companies in a niche, profile them, and
/// identify their decision-makers.
#[derive(Debug, Parser)]
#[command(name = "prospector")]
struct Cli {
    /// Profile a single site and exit, skipping discovery and the
    /// decision-maker lookup.
    #[arg(long)]
    url: Option<String>,

    /// How many leads to process in a full run.
    #[arg(long, default_value_t = 3)]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("prospector=info".parse()?))
        .init();

    info!("Prospector starting...");

    let cli = Cli::parse();
    let config = Config::from_env();
    config.log_redacted();

    let searcher = Arc::new(SearxClient::new(&config.searxng_base_url));
    let fetcher = Arc::new(FirecrawlClient::new(&config.firecrawl_api_key));
    let model = Arc::new(
        OpenAi::new(&config.llm_api_key, &config.llm_model).with_base_url(&config.llm_base_url),
    );

    let scout = ProspectScout::new(fetcher, model.clone());

    if let Some(url) = cli.url {
        return profile_single_site(&scout, &url).await;
    }

    let niche_query: String = Input::new()
        .with_prompt("Niche/location to prospect (e.g. 'plumbing companies Austin TX')")
        .interact_text()?;

    let pipeline = Pipeline::new(
        LeadDiscoverer::new(searcher.clone()),
        scout,
        IdentityHunter::new(searcher, model),
    );

    let stats = pipeline.run(&niche_query, cli.count).await?;
    info!("{stats}");

    Ok(())
}

/// Simplified entry mode: scrape + analyze one site, no discovery and no
/// decision-maker lookup.
async fn profile_single_site(scout: &ProspectScout, url: &str) -> Result<()> {
    let content = scout.scrape(url).await;
    if content.is_empty() {
        anyhow::bail!("Failed to retrieve website content for {url}");
    }

    let fallback_name = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string());

    let profile = scout.analyze(&content.combined(), &fallback_name).await;
    let json = serde_json::to_string_pretty(&profile)?;
    println!("\n[+] Strategic prospect profile:\n{json}");

    std::fs::write(PROFILE_OUTPUT_PATH, &json)?;
    info!(path = PROFILE_OUTPUT_PATH, "Profile written");

    Ok(())
}
