//! Answers and the page citations attached to them

use serde::{Deserialize, Serialize};

/// A page reference attached to an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// 1-based page number, never above the document's page count
    pub page: usize,

    /// Human-readable provenance label
    pub text: String,
}

impl Citation {
    /// Citation produced from a page the model referenced
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecite_domain::Citation;
    ///
    /// let citation = Citation::referenced(3);
    /// assert_eq!(citation.page, 3);
    /// assert_eq!(citation.text, "Referenced content from page 3");
    /// ```
    pub fn referenced(page: usize) -> Self {
        Self {
            page,
            text: format!("Referenced content from page {}", page),
        }
    }

    /// Citation used when nothing better could be derived
    pub fn document_default() -> Self {
        Self {
            page: 1,
            text: "Content referenced from document".to_string(),
        }
    }
}

/// Result of asking a question about a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    /// The question, echoed back
    pub question: String,

    /// Answer text with the citation directive removed
    pub response: String,

    /// Citations in order of first mention; duplicates are kept
    pub citations: Vec<Citation>,

    /// Page count of the document the answer was drawn from
    pub page_count: usize,
}
