//! Pagecite Domain Layer
//!
//! Value types and collaborator traits for the document question-answering
//! pipeline. Logic lives in `pagecite-core`; infrastructure (PDF parsing,
//! document storage, LLM transport) lives in its own crates and plugs in
//! through the traits defined here.
//!
//! ## Key Concepts
//!
//! - **Document**: identified by an opaque [`DocumentId`]; its bytes are owned
//!   by a storage collaborator
//! - **Extraction**: the one-time conversion of bytes into text, page count
//!   and page-aligned [`PageSegment`]s
//! - **Citation**: a page number plus provenance label attached to an answer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod answer;
pub mod document;
pub mod traits;

// Re-exports for convenience
pub use answer::{AnswerResult, Citation};
pub use document::{DocumentId, ExtractedDocument, ExtractedText, PageSegment};
