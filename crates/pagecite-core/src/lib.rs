//! Pagecite Core
//!
//! Answers natural-language questions about a stored PDF with page citations.
//!
//! # Architecture
//!
//! ```text
//! document id → ExtractionCache → PromptBuilder → LLM → citations::parse → AnswerResult
//! ```
//!
//! Text is extracted once per document and kept for the life of the
//! [`ExtractionCache`]. Because extracted text has no page boundaries, pages
//! are approximated by splitting the text into equal runs of characters
//! ([`segmenter`]). The model is asked to end its reply with a
//! `CITATIONS: [...]` directive, which [`citations`] turns into page
//! references.
//!
//! # Example Usage
//!
//! ```no_run
//! use pagecite_core::{AnswerRequest, Answerer, QaConfig};
//! use pagecite_llm::MockProvider;
//! use pagecite_pdf::PdfTextExtractor;
//! use pagecite_store::DirectoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DirectoryStore::new("uploads");
//! let llm = MockProvider::new("The budget is $5M. CITATIONS: [Page 2]");
//! let answerer = Answerer::new(store, PdfTextExtractor, llm, QaConfig::default());
//!
//! let request = AnswerRequest::new("What is the budget?", "plan.pdf");
//! let result = answerer.answer(request).await?;
//!
//! println!("{} ({} citations)", result.response, result.citations.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod answerer;
mod cache;
pub mod citations;
mod config;
mod error;
pub mod prompt;
pub mod segmenter;
mod types;

#[cfg(test)]
mod testing;

pub use answerer::{Answerer, EMPTY_REPLY_FALLBACK};
pub use cache::ExtractionCache;
pub use config::{QaConfig, DEFAULT_MODEL_TIMEOUT_SECS, MAX_PROMPT_CONTENT_CHARS};
pub use error::QaError;
pub use types::AnswerRequest;
