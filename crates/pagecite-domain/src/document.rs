//! Documents and their extracted, page-segmented text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key used to look up a stored document's bytes
///
/// # Examples
///
/// ```
/// use pagecite_domain::DocumentId;
///
/// let id = DocumentId::new("report.pdf");
/// assert_eq!(id.as_str(), "report.pdf");
/// assert_eq!(id.to_string(), "report.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Raw output of a text extractor: the flat text and the page count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// All text in reading order, without page boundaries
    pub full_text: String,

    /// Number of pages reported by the document
    pub page_count: usize,
}

/// One page-sized shard of a document's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSegment {
    /// 1-based page number
    pub page_number: usize,

    /// Text assigned to this page
    pub text: String,
}

/// A document after extraction and segmentation
///
/// Created once per [`DocumentId`] and never mutated afterwards.
/// `pages` has exactly `page_count` entries and their texts concatenate back
/// to `full_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Full extracted text
    pub full_text: String,

    /// Total page count (always at least 1)
    pub page_count: usize,

    /// Page segments in page order
    pub pages: Vec<PageSegment>,
}

impl ExtractedDocument {
    /// Look up a page by its 1-based number
    pub fn page(&self, page_number: usize) -> Option<&PageSegment> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_blank() {
        assert!(DocumentId::new("").is_blank());
        assert!(DocumentId::new("  \t").is_blank());
        assert!(!DocumentId::new("a.pdf").is_blank());
    }

    #[test]
    fn test_document_id_serializes_transparently() {
        let id = DocumentId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");

        let parsed: DocumentId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_page_lookup_is_one_based() {
        let doc = ExtractedDocument {
            full_text: "abcd".to_string(),
            page_count: 2,
            pages: vec![
                PageSegment { page_number: 1, text: "ab".to_string() },
                PageSegment { page_number: 2, text: "cd".to_string() },
            ],
        };

        assert!(doc.page(0).is_none());
        assert_eq!(doc.page(1).unwrap().text, "ab");
        assert_eq!(doc.page(2).unwrap().text, "cd");
        assert!(doc.page(3).is_none());
    }
}
