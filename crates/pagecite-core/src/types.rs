//! Request types for the answering pipeline

use pagecite_domain::DocumentId;

/// A question about one stored document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    /// Free-form question text
    pub question: String,

    /// Key the resolver looks the document up by
    pub document_id: DocumentId,

    /// Human-readable name shown to the model; defaults to the id
    pub document_label: Option<String>,
}

impl AnswerRequest {
    /// Create a request without a display label
    pub fn new(question: impl Into<String>, document_id: impl Into<DocumentId>) -> Self {
        Self {
            question: question.into(),
            document_id: document_id.into(),
            document_label: None,
        }
    }

    /// Set the name the prompt uses for the document
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.document_label = Some(label.into());
        self
    }

    /// Label for the prompt, falling back to the document id when unset or blank
    pub fn label(&self) -> &str {
        self.document_label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| self.document_id.as_str())
    }
}
