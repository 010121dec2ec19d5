#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quotebot::quotes::{LoadOptions, QuoteStore};
use quotebot::source::{QuoteSource, SourceError};

/// In-memory corpus whose contents, failure mode and latency can be changed
/// while a store is using it.
#[derive(Clone, Default)]
pub struct MemorySource {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    lines: Mutex<Vec<String>>,
    failing: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(lines: &[&str]) -> Self {
        let source = Self::default();
        source.set_lines(lines);
        source
    }

    pub fn set_lines(&self, lines: &[&str]) {
        *self.inner.lines.lock().unwrap() = lines.iter().map(|l| l.to_string()).collect();
    }

    pub fn set_failing(&self, failing: bool) {
        *self.inner.failing.lock().unwrap() = failing;
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.inner.delay.lock().unwrap() = delay;
    }

    pub fn fetches(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.inner.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.inner.failing.lock().unwrap() {
            return Err(SourceError::Status {
                status: 503,
                url: "memory://quotes".into(),
            });
        }
        Ok(self.inner.lines.lock().unwrap().clone())
    }
}

/// The corpus used throughout the lookup tests.
pub const SAMPLE: &[&str] = &[
    "Alice: Hello world",
    "Bob: Goodbye world",
    "A lone saying with no colon",
];

/// Open a store over `lines`, returning the source handle so tests can change it.
pub async fn open_store(lines: &[&str]) -> (Arc<QuoteStore>, MemorySource) {
    let source = MemorySource::new(lines);
    let store = QuoteStore::open(Box::new(source.clone()), LoadOptions::default())
        .await
        .unwrap();
    (Arc::new(store), source)
}

pub fn indices(quotes: &[Arc<quotebot::quotes::Quote>]) -> Vec<usize> {
    quotes.iter().map(|q| q.index()).collect()
}
