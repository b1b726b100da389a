//! Error types for the question-answering pipeline

use thiserror::Error;

/// Errors that can occur while answering a question
///
/// `Clone` so that every caller waiting on a shared extraction receives the
/// same failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QaError {
    /// Request is missing a question or document id
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Segmentation was asked for zero pages
    #[error("Invalid page count: {0} (must be at least 1)")]
    InvalidPageCount(usize),

    /// Resolver has no document under this id
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Document bytes could not be turned into text
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Resolver failed for a reason other than "not found"
    #[error("Storage error: {0}")]
    Storage(String),

    /// Language model call failed or timed out
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QaError {
    /// Stable snake_case name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            QaError::InvalidRequest(_) => "invalid_request",
            QaError::InvalidPageCount(_) => "invalid_page_count",
            QaError::DocumentNotFound(_) => "document_not_found",
            QaError::ExtractionFailed(_) => "extraction_failed",
            QaError::Storage(_) => "storage",
            QaError::ModelUnavailable(_) => "model_unavailable",
            QaError::Config(_) => "config",
        }
    }
}
