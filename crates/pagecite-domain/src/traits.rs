//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the question-answering pipeline
//! and infrastructure. Implementations live in other crates.

use crate::{DocumentId, ExtractedText};
use std::fmt::Display;
use std::future::Future;

/// Trait for looking up a stored document's bytes
///
/// Implemented by the infrastructure layer (pagecite-store)
pub trait DocumentResolver: Send + Sync + 'static {
    /// Error type for storage failures other than "not found"
    type Error: Display + Send;

    /// Fetch the raw bytes of a document
    ///
    /// Returns `Ok(None)` when no document exists under `id`.
    fn fetch(
        &self,
        id: &DocumentId,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send;
}

/// Trait for turning document bytes into text and a page count
///
/// Implemented by the infrastructure layer (pagecite-pdf). Extraction is
/// CPU-bound and synchronous; callers move it off the async executor.
pub trait TextExtractor: Send + Sync + 'static {
    /// Error type for malformed or unparseable documents
    type Error: Display + Send;

    /// Extract the full text and page count
    fn extract_text(&self, bytes: &[u8]) -> Result<ExtractedText, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (pagecite-llm)
pub trait LlmProvider: Send + Sync + 'static {
    /// Error type for LLM operations
    type Error: Display + Send;

    /// Generate a single-turn text completion
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
