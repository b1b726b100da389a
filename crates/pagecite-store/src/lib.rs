//! Pagecite Document Stores
//!
//! Implements the `DocumentResolver` trait.
//!
//! - `DirectoryStore`: uploaded files in a local directory, keyed by file name
//! - `MemoryStore`: in-process map, for embedding and tests

#![warn(missing_docs)]

mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur while reading stored documents
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,
}
