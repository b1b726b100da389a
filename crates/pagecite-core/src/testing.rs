//! Test doubles shared by unit tests

use pagecite_domain::traits::{DocumentResolver, TextExtractor};
use pagecite_domain::{DocumentId, ExtractedText};
use pagecite_store::{MemoryStore, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Memory-backed resolver that counts fetches and can stall
pub(crate) struct CountingResolver {
    store: MemoryStore,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingResolver {
    pub(crate) fn empty() -> Self {
        Self {
            store: MemoryStore::new(),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub(crate) fn with_document(id: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let resolver = Self::empty();
        resolver.insert(id, bytes);
        resolver
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn insert(&self, id: &str, bytes: impl Into<Vec<u8>>) {
        self.store.insert(id, bytes).unwrap();
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentResolver for CountingResolver {
    type Error = StoreError;

    async fn fetch(&self, id: &DocumentId) -> Result<Option<Vec<u8>>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.store.fetch(id).await
    }
}

/// Resolver whose backing storage is always unavailable
pub(crate) struct FailingResolver;

impl DocumentResolver for FailingResolver {
    type Error = StoreError;

    async fn fetch(&self, _id: &DocumentId) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk offline")))
    }
}

/// Treats the bytes as UTF-8 text with form feeds between pages
pub(crate) struct PlainTextExtractor {
    calls: AtomicUsize,
    page_count: Option<usize>,
}

impl PlainTextExtractor {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            page_count: None,
        }
    }

    pub(crate) fn with_page_count(page_count: usize) -> Self {
        Self {
            page_count: Some(page_count),
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for PlainTextExtractor {
    type Error = String;

    fn extract_text(&self, bytes: &[u8]) -> Result<ExtractedText, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let full_text = String::from_utf8(bytes.to_vec())
            .map_err(|e| format!("Not valid text: {}", e))?;
        let page_count = self
            .page_count
            .unwrap_or_else(|| full_text.matches('\x0C').count() + 1);
        Ok(ExtractedText {
            full_text,
            page_count,
        })
    }
}
