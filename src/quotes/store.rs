//! The quote store: current corpus snapshot, lookups, and refresh.
//!
//! Each refresh builds a complete [`Corpus`] (quotes + author index) off-lock and
//! publishes it by swapping a single `Arc` under a write lock, so a query sees one
//! generation from start to finish. Queries clone the `Arc` under a read lock and
//! release it immediately. Repeat history lives behind its own mutex, since
//! selection mutates it while the corpus itself stays read-only.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::authors::{strip_name, AuthorIndex};
use super::quote::Quote;
use super::select::RecentlyServed;
use crate::source::{QuoteSource, SourceError};

/// How raw lines are turned into a corpus.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Drop whitespace-only lines instead of indexing them as empty quotes.
    pub skip_blank_lines: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_blank_lines: true,
        }
    }
}

/// One immutable generation of the corpus.
#[derive(Debug, Default)]
pub struct Corpus {
    generation: u64,
    quotes: Vec<Arc<Quote>>,
    authors: AuthorIndex,
    loaded_at: Option<DateTime<Utc>>,
}

impl Corpus {
    /// Parse `lines` into a corpus, numbering quotes from 1 in load order.
    pub fn build(generation: u64, lines: &[String], options: LoadOptions) -> Self {
        let quotes: Vec<Arc<Quote>> = lines
            .iter()
            .filter(|line| !(options.skip_blank_lines && line.trim().is_empty()))
            .enumerate()
            .map(|(i, line)| Arc::new(Quote::parse(line, i + 1)))
            .collect();
        let authors = AuthorIndex::build(&quotes);

        Self {
            generation,
            quotes,
            authors,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn quotes(&self) -> &[Arc<Quote>] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Resolve an author query, trying exact, stripped, prefix, then substring
    /// matches. The first tier with any result wins.
    pub fn quotes_by(&self, query: &str) -> Vec<Arc<Quote>> {
        let query = query.trim().to_lowercase();

        // 1. Exact match of query
        if let Some(bucket) = self.authors.get(&query) {
            return bucket.to_vec();
        }

        // 2. Exact match of stripped query
        let stripped = strip_name(&query);
        if let Some(bucket) = self.authors.get(&stripped) {
            return bucket.to_vec();
        }

        // 3. Partial match from start
        let candidates = self.authors.collect_where(|key| key.starts_with(&stripped));
        if !candidates.is_empty() {
            return candidates;
        }

        // 4. Partial match anywhere
        self.authors.collect_where(|key| key.contains(&stripped))
    }

    /// Every quote whose content contains `query`, case-insensitively, in load order.
    pub fn quotes_about(&self, query: &str) -> Vec<Arc<Quote>> {
        let query = query.to_lowercase();
        self.quotes
            .iter()
            .filter(|quote| quote.matches_content(&query))
            .cloned()
            .collect()
    }
}

/// Summary of the current snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub source: String,
    pub generation: u64,
    pub total_quotes: usize,
    pub authored_quotes: usize,
    pub authorless_quotes: usize,
    pub author_keys: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Thread-safe quote store. Share it behind an `Arc`.
pub struct QuoteStore {
    source: Box<dyn QuoteSource>,
    options: LoadOptions,
    corpus: RwLock<Arc<Corpus>>,
    recent: Mutex<RecentlyServed>,
    generations: AtomicU64,
}

impl QuoteStore {
    /// Create a store with an empty corpus. Nothing is fetched until [`refresh`].
    ///
    /// [`refresh`]: QuoteStore::refresh
    pub fn new(source: Box<dyn QuoteSource>) -> Self {
        Self::with_options(source, LoadOptions::default())
    }

    pub fn with_options(source: Box<dyn QuoteSource>, options: LoadOptions) -> Self {
        Self {
            source,
            options,
            corpus: RwLock::new(Arc::new(Corpus::default())),
            recent: Mutex::new(RecentlyServed::default()),
            generations: AtomicU64::new(0),
        }
    }

    /// Create a store and perform the initial load. A failure here means there is
    /// nothing to serve, so callers treat it as fatal.
    pub async fn open(
        source: Box<dyn QuoteSource>,
        options: LoadOptions,
    ) -> Result<Self, SourceError> {
        let store = Self::with_options(source, options);
        store.refresh().await?;
        tracing::info!(source = store.source_name(), "created quote store");
        Ok(store)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the corpus again and publish it as a new generation.
    ///
    /// Fetching and parsing happen without holding any lock. On failure the
    /// previous snapshot stays in place. Returns the number of quotes loaded.
    pub async fn refresh(&self) -> Result<usize, SourceError> {
        let start = Instant::now();
        let lines = self.source.fetch().await?;

        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let corpus = Arc::new(Corpus::build(generation, &lines, self.options));
        let count = corpus.len();

        {
            let mut current = self.corpus.write().unwrap_or_else(PoisonError::into_inner);
            // A slower, older refresh must not overwrite a newer one
            if current.generation > generation {
                return Ok(count);
            }
            *current = corpus;
            self.lock_recent().reset(generation);
        }

        tracing::info!(
            source = self.source_name(),
            generation,
            count,
            duration_ms = start.elapsed().as_millis() as u64,
            "updated quotes"
        );
        Ok(count)
    }

    /// The current generation. Cheap; holds the read lock only to clone the `Arc`.
    pub fn snapshot(&self) -> Arc<Corpus> {
        let current = self.corpus.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// A random quote from the whole corpus, `None` only when it is empty.
    pub fn random_quote(&self) -> Option<Arc<Quote>> {
        let corpus = self.snapshot();
        self.pick_one(&corpus, corpus.quotes().to_vec())
    }

    /// A random quote by an author matching `query`.
    pub fn quote_by(&self, query: &str) -> Option<Arc<Quote>> {
        let corpus = self.snapshot();
        self.pick_one(&corpus, corpus.quotes_by(query))
    }

    /// Every quote by an author matching `query`, in load order.
    pub fn all_quotes_by(&self, query: &str) -> Vec<Arc<Quote>> {
        self.snapshot().quotes_by(query)
    }

    /// A random quote whose content mentions `query`.
    pub fn quote_about(&self, query: &str) -> Option<Arc<Quote>> {
        let corpus = self.snapshot();
        self.pick_one(&corpus, corpus.quotes_about(query))
    }

    /// Every quote whose content mentions `query`, in load order.
    pub fn all_quotes_about(&self, query: &str) -> Vec<Arc<Quote>> {
        self.snapshot().quotes_about(query)
    }

    pub fn stats(&self) -> CorpusStats {
        let corpus = self.snapshot();
        let authored = corpus.quotes().iter().filter(|q| q.has_author()).count();
        CorpusStats {
            source: self.source_name().to_string(),
            generation: corpus.generation(),
            total_quotes: corpus.len(),
            authored_quotes: authored,
            authorless_quotes: corpus.len() - authored,
            author_keys: corpus.authors.key_count(),
            loaded_at: corpus.loaded_at,
        }
    }

    /// Number of quotes currently remembered as recently served.
    pub fn recently_served_count(&self) -> usize {
        self.lock_recent().len()
    }

    fn pick_one(&self, corpus: &Corpus, candidates: Vec<Arc<Quote>>) -> Option<Arc<Quote>> {
        if candidates.is_empty() {
            return None;
        }
        self.lock_recent()
            .pick(corpus.generation(), candidates, &mut rand::thread_rng())
    }

    fn lock_recent(&self) -> std::sync::MutexGuard<'_, RecentlyServed> {
        self.recent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
