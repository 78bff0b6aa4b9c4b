use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use prospector_common::Lead;
use searx_client::SearchOptions;

use crate::traits::WebSearcher;

/// Hosts that are never company homepages: social networks, directories,
/// review aggregators, Q&A and publishing platforms. Substring match on the
/// lowercased host; an entry like "directory" is intentionally broad.
const DOMAIN_BLACKLIST: &[&str] = &[
    "clutch.co",
    "yelp.com",
    "linkedin.com",
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "glassdoor.com",
    "upwork.com",
    "expert.com",
    "wikipedia.org",
    "crunchbase.com",
    "yellowpages.com",
    "bbb.org",
    "angis.com",
    "houzz.com",
    "thumbtack.com",
    "expertise.com",
    "upcity.com",
    "designrush.com",
    "goodfirms.co",
    "sortlist.com",
    "topagencies",
    "bestagencies",
    "agencies.com",
    "directory",
    "listing",
    "review",
    "builtinaustin.com",
    "nogood.io",
    "writingstudio.com",
    "medium.com",
    "hubspot.com",
    "wordpress.com",
    "zhihu.com",
    "quora.com",
    "reddit.com",
    "stackoverflow.com",
    "youtube.com",
    "vimeo.com",
    "slideshare.net",
    "issuu.com",
];

/// Path fragments indicating editorial or listing content rather than a
/// company site.
const PATH_BLACKLIST: &[&str] = &[
    "/blog/",
    "/articles/",
    "/news/",
    "/post/",
    "/list/",
    "/top-",
    "/best-",
    "/directory/",
    "/review/",
    "/question/",
    "/answer/",
    "/topic/",
];

/// Extra results requested beyond `count` to absorb filtering losses.
const OVERFETCH_MARGIN: usize = 10;

/// Turns a niche query into a filtered, deduplicated list of candidate
/// companies.
pub struct LeadDiscoverer {
    searcher: Arc<dyn WebSearcher>,
}

impl LeadDiscoverer {
    pub fn new(searcher: Arc<dyn WebSearcher>) -> Self {
        Self { searcher }
    }

    /// Discover up to `count` candidate companies for a niche query.
    /// Search failure degrades to an empty list; the caller treats that
    /// as "no leads found", not a fatal error.
    pub async fn find_companies(&self, niche_query: &str, count: usize) -> Vec<Lead> {
        info!(niche_query, count, "Discovering leads");

        let query = format!(
            "{niche_query} official website -zhihu.com -quora.com -reddit.com -youtube.com"
        );
        let opts = SearchOptions {
            region: "en-US".to_string(),
            safesearch: false,
            max_results: count + OVERFETCH_MARGIN,
        };

        let results = match self.searcher.search(&query, &opts).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Discovery search failed");
                return Vec::new();
            }
        };

        if results.is_empty() {
            warn!("No results returned from search engine");
            return Vec::new();
        }

        let mut leads: Vec<Lead> = Vec::new();
        for r in results {
            if is_blacklisted(&r.url) {
                continue;
            }
            if leads.iter().any(|l| l.url == r.url) {
                continue;
            }

            leads.push(Lead {
                name: r.title,
                url: r.url,
            });

            if leads.len() >= count {
                break;
            }
        }

        info!(found = leads.len(), "Discovery complete");
        leads
    }
}

/// Reject URLs whose host or path matches the blacklists. Unparsable URLs
/// are rejected outright.
fn is_blacklisted(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return true;
    };
    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    let path = parsed.path().to_lowercase();

    DOMAIN_BLACKLIST.iter().any(|b| host.contains(b))
        || PATH_BLACKLIST.iter().any(|p| path.contains(p))
}
