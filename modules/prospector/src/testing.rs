// Test mocks for the three collaborator seams.
//
// - MockSearcher (WebSearcher): fixed result list, records queries
// - FailingSearcher (WebSearcher): errors on every call
// - MockFetcher (PageFetcher): url-to-markdown map, errors on unknown URLs
// - ScriptedChat (ChatModel): pops canned replies in call order
//
// Deterministic tests: no network, no live model.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use prospector_common::SearchResult;
use searx_client::SearchOptions;

use crate::traits::{ChatModel, PageFetcher, WebSearcher};

// ---------------------------------------------------------------------------
// MockSearcher
// ---------------------------------------------------------------------------

/// Returns the same result list for every query and records what was asked.
pub struct MockSearcher {
    results: Vec<SearchResult>,
    queries: Mutex<Vec<String>>,
    max_results: Mutex<Vec<usize>>,
}

impl MockSearcher {
    pub fn returning(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            queries: Mutex::new(Vec::new()),
            max_results: Mutex::new(Vec::new()),
        }
    }

    /// Queries issued so far, in call order.
    pub fn seen_queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock poisoned").clone()
    }

    /// The `max_results` option of each call, in call order.
    pub fn seen_max_results(&self) -> Vec<usize> {
        self.max_results
            .lock()
            .expect("max_results lock poisoned")
            .clone()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str, opts: &SearchOptions) -> Result<Vec<SearchResult>> {
        self.queries
            .lock()
            .expect("queries lock poisoned")
            .push(query.to_string());
        self.max_results
            .lock()
            .expect("max_results lock poisoned")
            .push(opts.max_results);
        Ok(self.results.clone())
    }
}

/// Errors on every call, as if the search backend were down.
pub struct FailingSearcher;

#[async_trait]
impl WebSearcher for FailingSearcher {
    async fn search(&self, _query: &str, _opts: &SearchOptions) -> Result<Vec<SearchResult>> {
        bail!("search backend unreachable")
    }
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Url-to-markdown map. Returns `Err` for unregistered URLs.
/// Builder pattern: `.on_page()`.
pub struct MockFetcher {
    pages: HashMap<String, String>,
}

impl MockFetcher {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub fn on_page(mut self, url: &str, markdown: &str) -> Self {
        self.pages.insert(url.to_string(), markdown.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_markdown(&self, url: &str) -> Result<String> {
        match self.pages.get(url) {
            Some(markdown) => Ok(markdown.clone()),
            None => bail!("MockFetcher: no page registered for {url}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedChat
// ---------------------------------------------------------------------------

enum Reply {
    Text(String),
    Fail(String),
}

/// Pops one scripted reply per call, in registration order. An exhausted
/// script errors, which surfaces extra model calls as test failures.
pub struct ScriptedChat {
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedChat {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
        }
    }

    pub fn then_text(self, text: &str) -> Self {
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .push_back(Reply::Text(text.to_string()));
        self
    }

    pub fn then_error(self, message: &str) -> Self {
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .push_back(Reply::Fail(message.to_string()));
        self
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(
        &self,
        _system: Option<&str>,
        _user: &str,
        _force_json: bool,
    ) -> Result<String> {
        match self
            .replies
            .lock()
            .expect("replies lock poisoned")
            .pop_front()
        {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(message)) => bail!("{message}"),
            None => bail!("ScriptedChat: no reply scripted for this call"),
        }
    }
}
