//! Crawl orchestration and count queries
//!
//! The engine owns the HTTP client, the worker pool, and the index store.
//! `index` fetches a URL and its depth-bounded neighborhood, fanning out over
//! the outbound links of each page concurrently; `count` aggregates token
//! frequencies over the same neighborhood, lazily indexing pages a query
//! reaches before any explicit crawl did.
//!
//! Per URL the lifecycle is: unvisited, fetching, then either indexed (a
//! document exists in the store) or skipped (the fetch failed and nothing
//! was stored). Re-indexing a known URL is a no-op; that dedup check is also
//! what terminates crawls over cyclic link graphs. The check-then-fetch-
//! then-store sequence is not atomic across tasks: two siblings discovering
//! the same new URL may both fetch it, and the later store overwrites the
//! earlier one with equivalent data.

use crate::config::Config;
use crate::crawler::{build_http_client, fetch_page, parse_page, PageKind};
use crate::index::{IndexStore, TokenCounts};
use crate::tokenizer::{first_token, tokenize};
use crate::url::normalize_url;
use crate::Result;
use reqwest::Client;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

type BoxedTask<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// The crawling-and-indexing engine
///
/// Cheap to clone; all clones share one index store, HTTP client, and
/// worker pool.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    store: IndexStore,
    fetch_slots: Semaphore,
}

impl Engine {
    /// Creates an engine with an empty index
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(Duration::from_secs(config.crawler.fetch_timeout_secs))?;
        Ok(Self {
            inner: Arc::new(Inner {
                client,
                store: IndexStore::new(),
                fetch_slots: Semaphore::new(config.crawler.worker_pool_size),
            }),
        })
    }

    /// The shared index store
    pub fn store(&self) -> &IndexStore {
        &self.inner.store
    }

    /// Returns true if the canonical form of `url` has been indexed
    pub fn has_url(&self, url: &str) -> bool {
        match normalize_url(url, None) {
            Ok(canonical) => self.inner.store.has_url(canonical.as_str()),
            Err(_) => false,
        }
    }

    /// Fetches and indexes `url`, then every page within `depth_budget`
    /// link hops of it
    ///
    /// Failures are recovered locally: a URL that cannot be normalized,
    /// fetched, or dispatched is skipped with a warning and never aborts
    /// its siblings or the overall traversal.
    pub async fn index(&self, url: &str, depth_budget: u32) {
        match normalize_url(url, None) {
            Ok(canonical) => self.index_canonical(canonical, depth_budget).await,
            Err(e) => tracing::warn!("skipping unusable url: {e}"),
        }
    }

    /// Indexes pre-fetched HTML under `url`, then fans out over its links
    /// under `depth_budget`
    pub async fn index_html(&self, url: &str, html: &str, depth_budget: u32) {
        match normalize_url(url, None) {
            Ok(canonical) => self.index_html_canonical(canonical, html, depth_budget).await,
            Err(e) => tracing::warn!("skipping unusable url: {e}"),
        }
    }

    /// Indexes pre-fetched plain text under `url`; plain text has no links
    pub async fn index_text(&self, url: &str, text: &str) {
        match normalize_url(url, None) {
            Ok(canonical) => self.index_text_canonical(canonical, text),
            Err(e) => tracing::warn!("skipping unusable url: {e}"),
        }
    }

    /// Counts occurrences of `term` across `url` and every indexed page
    /// within `depth_budget` hops of it
    ///
    /// The term is reduced to its first token before lookup (`"sign-in"`
    /// counts the token `sign` alone). Pages the neighborhood reaches that
    /// were never indexed are fetched on demand while budget remains;
    /// pages that fail to index contribute zero.
    pub async fn count(&self, url: &str, term: &str, depth_budget: u32) -> u64 {
        let root = match normalize_url(url, None) {
            Ok(canonical) => canonical,
            Err(e) => {
                tracing::warn!("cannot count on unusable url: {e}");
                return 0;
            }
        };
        let token = match first_token(term) {
            Some(token) => token,
            None => return 0,
        };

        let neighborhood = self.neighborhood(root, depth_budget).await;
        neighborhood
            .iter()
            .map(|url| self.inner.store.term_count(url, &token))
            .sum()
    }

    async fn index_canonical(&self, url: Url, depth_budget: u32) {
        if self.inner.store.has_url(url.as_str()) {
            return;
        }

        tracing::debug!("fetching {url}");
        let fetched = {
            let _permit = self
                .inner
                .fetch_slots
                .acquire()
                .await
                .expect("worker pool semaphore closed");
            fetch_page(&self.inner.client, &url).await
        };

        match fetched {
            Ok(page) => match page.kind {
                PageKind::Html => self.index_html_canonical(url, &page.body, depth_budget).await,
                PageKind::Plain => self.index_text_canonical(url, &page.body),
            },
            Err(e) => tracing::warn!("{e}"),
        }
    }

    async fn index_html_canonical(&self, url: Url, html: &str, depth_budget: u32) {
        let parsed = parse_page(html);

        let mut counts = TokenCounts::new();
        for text in &parsed.texts {
            for token in tokenize(text) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        // Outbound anchors, canonicalized against this page, minus the page
        // itself (fragment-only anchors land here too)
        let mut outbound = HashSet::new();
        let mut targets = Vec::new();
        for href in &parsed.hrefs {
            match normalize_url(href, Some(&url)) {
                Ok(target) => {
                    if target != url && outbound.insert(target.to_string()) {
                        targets.push(target);
                    }
                }
                Err(e) => tracing::debug!("ignoring malformed href on {url}: {e}"),
            }
        }

        self.inner.store.insert(url.to_string(), counts, outbound);
        tracing::debug!("indexed {url} ({} documents total)", self.inner.store.len());

        if depth_budget > 0 {
            // Siblings run in parallel on the worker pool; this level does
            // not return until all of its submissions complete
            let handles: Vec<_> = targets
                .into_iter()
                .map(|target| tokio::spawn(self.index_task(target, depth_budget - 1)))
                .collect();
            for handle in handles {
                let _ = handle.await;
            }
        }
    }

    fn index_text_canonical(&self, url: Url, text: &str) {
        let mut counts = TokenCounts::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        self.inner.store.insert(url.to_string(), counts, HashSet::new());
        tracing::debug!("indexed {url} as plain text");
    }

    // Boxed so the async recursion through tokio::spawn type-checks
    fn index_task(&self, url: Url, depth_budget: u32) -> BoxedTask<()> {
        let engine = self.clone();
        Box::pin(async move { engine.index_canonical(url, depth_budget).await })
    }

    /// Expands the depth-bounded neighborhood of `url`, indexing on demand
    ///
    /// A URL with no outbound entry while hops remain is indexed with the
    /// budget left below it; frontier URLs at zero remaining hops are never
    /// fetched. Termination on cyclic graphs follows from the strictly
    /// decreasing budget.
    fn neighborhood(&self, url: Url, remaining: u32) -> BoxedTask<HashSet<String>> {
        let engine = self.clone();
        Box::pin(async move {
            let mut urls = HashSet::new();
            urls.insert(url.to_string());

            if remaining > 0 {
                if engine.inner.store.outbound_of(url.as_str()).is_none() {
                    engine.index_canonical(url.clone(), remaining - 1).await;
                }
                if let Some(outbound) = engine.inner.store.outbound_of(url.as_str()) {
                    for target in outbound {
                        if let Ok(target_url) = Url::parse(&target) {
                            urls.extend(engine.neighborhood(target_url, remaining - 1).await);
                        }
                    }
                }
            }

            urls
        })
    }
}
