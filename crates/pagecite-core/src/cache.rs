//! Per-document extraction cache
//!
//! Each document is extracted at most once for the life of the cache.
//! Concurrent requests for the same document share one extraction
//! (single-flight); requests for different documents run independently.
//!
//! The extraction itself runs on a spawned task, so a caller that gives up
//! waiting does not cancel work other callers depend on, and the finished
//! result still lands in the cache. Failures are handed to every waiter and
//! leave no entry behind, so a later request retries.

use crate::error::QaError;
use crate::segmenter::segment;
use pagecite_domain::traits::{DocumentResolver, TextExtractor};
use pagecite_domain::{DocumentId, ExtractedDocument};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

type Outcome = Result<Arc<ExtractedDocument>, QaError>;

enum Slot {
    Ready(Arc<ExtractedDocument>),
    InFlight {
        flight: u64,
        receiver: watch::Receiver<Option<Outcome>>,
    },
}

#[derive(Default)]
struct Slots {
    entries: HashMap<DocumentId, Slot>,
    next_flight: u64,
}

/// Memoized extraction results keyed by document id
///
/// Cloning is cheap and clones share the same entries. Construct one at
/// service start and hand it to the [`Answerer`](crate::Answerer).
#[derive(Clone, Default)]
pub struct ExtractionCache {
    slots: Arc<Mutex<Slots>>,
}

impl ExtractionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached extraction for `id`, extracting it on first use
    ///
    /// On a miss the resolver fetches the bytes, the extractor turns them
    /// into text (on the blocking thread pool) and the text is split into
    /// pages. Callers arriving while that is in progress wait for the same
    /// result instead of starting their own.
    ///
    /// # Errors
    ///
    /// - [`QaError::DocumentNotFound`] if the resolver has no such document
    /// - [`QaError::Storage`] if the resolver fails
    /// - [`QaError::ExtractionFailed`] if the extractor rejects the bytes
    /// - [`QaError::InvalidPageCount`] if the extractor reports zero pages
    pub async fn get_or_extract<R, X>(
        &self,
        id: &DocumentId,
        resolver: &Arc<R>,
        extractor: &Arc<X>,
    ) -> Result<Arc<ExtractedDocument>, QaError>
    where
        R: DocumentResolver,
        X: TextExtractor,
    {
        let mut receiver = {
            let mut slots = self.lock();
            let waiting = match slots.entries.get(id) {
                Some(Slot::Ready(document)) => {
                    debug!("Extraction cache hit for '{}'", id);
                    return Ok(Arc::clone(document));
                }
                // A closed channel means the extraction task died without reporting
                Some(Slot::InFlight { receiver, .. }) if receiver.has_changed().is_ok() => {
                    debug!("Joining in-flight extraction for '{}'", id);
                    Some(receiver.clone())
                }
                _ => None,
            };

            match waiting {
                Some(receiver) => receiver,
                None => {
                    let flight = slots.next_flight;
                    slots.next_flight += 1;
                    let (sender, receiver) = watch::channel(None);
                    slots.entries.insert(
                        id.clone(),
                        Slot::InFlight {
                            flight,
                            receiver: receiver.clone(),
                        },
                    );
                    self.spawn_extraction(
                        id.clone(),
                        flight,
                        Arc::clone(resolver),
                        Arc::clone(extractor),
                        sender,
                    );
                    receiver
                }
            }
        };

        let outcome = receiver
            .wait_for(Option::is_some)
            .await
            .map(|value| value.clone());

        match outcome {
            Ok(Some(result)) => result,
            Ok(None) | Err(_) => Err(QaError::ExtractionFailed(format!(
                "Extraction of '{}' was aborted",
                id
            ))),
        }
    }

    /// Peek at a finished extraction without triggering one
    pub fn get(&self, id: &DocumentId) -> Option<Arc<ExtractedDocument>> {
        match self.lock().entries.get(id) {
            Some(Slot::Ready(document)) => Some(Arc::clone(document)),
            _ => None,
        }
    }

    /// True if a finished extraction is cached for `id`
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.get(id).is_some()
    }

    /// Forget `id`, returning true if anything was cached or in flight
    ///
    /// An extraction already in flight still completes for its waiters but
    /// is not stored.
    pub fn invalidate(&self, id: &DocumentId) -> bool {
        self.lock().entries.remove(id).is_some()
    }

    /// Forget every document
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Number of finished extractions held
    pub fn len(&self) -> usize {
        self.lock()
            .entries
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    /// True when no finished extraction is held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries stay consistent even if a holder panicked: every critical
    // section is a single insert or remove.
    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_extraction<R, X>(
        &self,
        id: DocumentId,
        flight: u64,
        resolver: Arc<R>,
        extractor: Arc<X>,
        sender: watch::Sender<Option<Outcome>>,
    ) where
        R: DocumentResolver,
        X: TextExtractor,
    {
        let slots = Arc::clone(&self.slots);

        tokio::spawn(async move {
            let outcome = extract_document(&id, resolver.as_ref(), extractor)
                .await
                .map(Arc::new);

            {
                let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
                let ours = matches!(
                    slots.entries.get(&id),
                    Some(Slot::InFlight { flight: current, .. }) if *current == flight
                );
                if ours {
                    match &outcome {
                        Ok(document) => {
                            slots
                                .entries
                                .insert(id.clone(), Slot::Ready(Arc::clone(document)));
                        }
                        Err(e) => {
                            warn!("Extraction of '{}' failed: {}", id, e);
                            slots.entries.remove(&id);
                        }
                    }
                }
            }

            // Every waiter may have given up; the cache entry above stands regardless
            let _ = sender.send(Some(outcome));
        });
    }
}

impl fmt::Debug for ExtractionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionCache")
            .field("documents", &self.len())
            .finish()
    }
}

/// Fetch, extract and segment one document
async fn extract_document<R, X>(
    id: &DocumentId,
    resolver: &R,
    extractor: Arc<X>,
) -> Result<ExtractedDocument, QaError>
where
    R: DocumentResolver,
    X: TextExtractor,
{
    info!("Extracting document '{}'", id);

    let bytes = resolver
        .fetch(id)
        .await
        .map_err(|e| QaError::Storage(e.to_string()))?
        .ok_or_else(|| QaError::DocumentNotFound(id.to_string()))?;

    let text = tokio::task::spawn_blocking(move || {
        extractor
            .extract_text(&bytes)
            .map_err(|e| QaError::ExtractionFailed(e.to_string()))
    })
    .await
    .map_err(|e| QaError::ExtractionFailed(format!("Extraction task failed: {}", e)))??;

    let pages = segment(&text.full_text, text.page_count)?;

    info!(
        "Extracted '{}': {} pages, {} chars",
        id,
        text.page_count,
        text.full_text.len()
    );

    Ok(ExtractedDocument {
        full_text: text.full_text,
        page_count: text.page_count,
        pages,
    })
}
