//! In-memory index store
//!
//! The process-wide index maps each canonical URL to its token frequency
//! table and its set of outbound canonical URLs. Entries accumulate for the
//! life of the process; there is no eviction and no on-disk form.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Token frequency table for a single document, case-folded token -> count
pub type TokenCounts = HashMap<String, u64>;

#[derive(Debug, Default)]
struct Shelves {
    token_counts: HashMap<String, TokenCounts>,
    outbound: HashMap<String, HashSet<String>>,
}

/// Thread-safe in-memory index shared by all crawl tasks
///
/// A URL is "known" iff it has a token frequency entry; the frequency table
/// and the outbound set for a URL are always inserted together under one
/// lock. The surrounding check-then-fetch-then-store sequence in the engine
/// is deliberately not atomic: two tasks discovering the same new URL at the
/// same moment may both fetch it, and the second insert overwrites the first
/// with equivalent data.
#[derive(Debug, Default)]
pub struct IndexStore {
    inner: Mutex<Shelves>,
}

impl IndexStore {
    /// Creates an empty index store
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a document and its outbound link set for a canonical URL
    pub fn insert(&self, url: String, counts: TokenCounts, outbound: HashSet<String>) {
        let mut shelves = self.inner.lock().unwrap();
        shelves.token_counts.insert(url.clone(), counts);
        shelves.outbound.insert(url, outbound);
    }

    /// Returns true if the canonical URL has been indexed
    pub fn has_url(&self, url: &str) -> bool {
        self.inner.lock().unwrap().token_counts.contains_key(url)
    }

    /// Returns the frequency of `token` in the document at `url`
    ///
    /// Zero when the URL was never indexed or the token does not occur.
    pub fn term_count(&self, url: &str, token: &str) -> u64 {
        self.inner
            .lock()
            .unwrap()
            .token_counts
            .get(url)
            .and_then(|counts| counts.get(token))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the outbound link set recorded for `url`, if any
    pub fn outbound_of(&self, url: &str) -> Option<HashSet<String>> {
        self.inner.lock().unwrap().outbound.get(url).cloned()
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().token_counts.len()
    }

    /// Returns true if nothing has been indexed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
