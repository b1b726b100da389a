//! LLM prompt engineering for document question answering
//!
//! The prompt asks the model to close its reply with a
//! `CITATIONS: [...]` directive; [`crate::citations`] parses exactly that
//! grammar, so the two must change together.

use crate::config::MAX_PROMPT_CONTENT_CHARS;
use std::borrow::Cow;

/// Appended to document content that was cut at the character budget
pub const TRUNCATION_NOTICE: &str = "...\n\n[Note: Content truncated due to length]";

/// Builds the question-answering prompt for one document
pub struct PromptBuilder<'a> {
    question: &'a str,
    document_label: &'a str,
    page_count: usize,
    full_text: &'a str,
    max_content_chars: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder with the default content budget
    pub fn new(
        question: &'a str,
        document_label: &'a str,
        page_count: usize,
        full_text: &'a str,
    ) -> Self {
        Self {
            question,
            document_label,
            page_count,
            full_text,
            max_content_chars: MAX_PROMPT_CONTENT_CHARS,
        }
    }

    /// Override the number of document characters kept
    pub fn with_max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let content = truncate_content(self.full_text, self.max_content_chars);
        let mut prompt = String::with_capacity(content.len() + 2048);

        // 1. Role
        prompt.push_str(PREAMBLE);
        prompt.push_str("\n\n");

        // 2. Document and question
        prompt.push_str(&format!("Document: \"{}\"\n", self.document_label));
        prompt.push_str(&format!("Total Pages: {}\n", self.page_count));
        prompt.push_str("Content: ");
        prompt.push_str(&content);
        prompt.push_str("\n\n");
        prompt.push_str(&format!("User Question: {}\n\n", self.question));

        // 3. Answering rules and the citation directive
        prompt.push_str(ANSWER_INSTRUCTIONS);
        prompt.push_str(&citation_guidelines(self.page_count));
        prompt.push_str("\nAnswer:");

        prompt
    }
}

/// Keep the first `max_chars` characters of `full_text`
///
/// Text within budget is returned unchanged; longer text is cut on a char
/// boundary and followed by [`TRUNCATION_NOTICE`].
pub fn truncate_content(full_text: &str, max_chars: usize) -> Cow<'_, str> {
    match full_text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(full_text),
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + TRUNCATION_NOTICE.len());
            truncated.push_str(&full_text[..cut]);
            truncated.push_str(TRUNCATION_NOTICE);
            Cow::Owned(truncated)
        }
    }
}

fn citation_guidelines(page_count: usize) -> String {
    format!(
        r#"   Guidelines for page estimation:
   - For documents with {page_count} total pages
   - If referencing content from the beginning: use pages 1-2
   - If referencing content from the middle: use middle page numbers
   - If referencing content from throughout: use multiple page numbers
   - Only use page numbers between 1 and {page_count}
   - If you cannot determine specific pages, use: CITATIONS: [Pages 1-{page_count}]
"#
    )
}

const PREAMBLE: &str = "You are an AI assistant helping users understand a PDF document. \
Based on the document content provided, answer the user's question accurately and concisely.";

const ANSWER_INSTRUCTIONS: &str = r#"Instructions:
1. Answer the question based solely on the document content provided
2. Be concise, accurate, and helpful
3. If the information exists in the document, provide a clear answer
4. If the answer isn't clearly available in the provided content, state this clearly
5. When referencing specific information, try to indicate which part of the content it comes from
6. IMPORTANT: At the end of your response, if you found relevant information, add citations in this exact format:
   CITATIONS: [Page X, Page Y] (where X, Y are your best estimates of which pages contain the relevant information)
   or, for a continuous range of pages:
   CITATIONS: [Pages A-B]

"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_fields() {
        let prompt =
            PromptBuilder::new("What is the budget?", "plan.pdf", 12, "Budget: $5").build();

        assert!(prompt.contains("Document: \"plan.pdf\""));
        assert!(prompt.contains("Total Pages: 12"));
        assert!(prompt.contains("User Question: What is the budget?"));
        assert!(prompt.contains("Content: Budget: $5\n\n"));
    }

    #[test]
    fn test_prompt_includes_citation_directive() {
        let prompt = PromptBuilder::new("q", "doc", 7, "text").build();

        assert!(prompt.contains("CITATIONS: [Page X, Page Y]"));
        assert!(prompt.contains("CITATIONS: [Pages A-B]"));
        assert!(prompt.contains("CITATIONS: [Pages 1-7]"));
        assert!(prompt.contains("For documents with 7 total pages"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_prompt_asks_for_grounded_answers() {
        let prompt = PromptBuilder::new("q", "doc", 1, "text").build();

        assert!(prompt.contains("based solely on the document content"));
        assert!(prompt.contains("concise"));
        assert!(prompt.contains("state this clearly"));
    }

    #[test]
    fn test_short_content_is_embedded_verbatim() {
        let text = "x".repeat(MAX_PROMPT_CONTENT_CHARS);
        let prompt = PromptBuilder::new("q", "doc", 1, &text).build();

        assert!(prompt.contains(&format!("Content: {}\n\nUser Question:", text)));
        assert!(!prompt.contains("[Note: Content truncated"));
    }

    #[test]
    fn test_long_content_is_truncated() {
        let text = format!("{}{}", "a".repeat(MAX_PROMPT_CONTENT_CHARS), "TAIL");
        let prompt = PromptBuilder::new("q", "doc", 1, &text).build();

        let expected = format!(
            "Content: {}{}\n\n",
            "a".repeat(MAX_PROMPT_CONTENT_CHARS),
            TRUNCATION_NOTICE
        );
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_truncate_content_borrows_when_within_budget() {
        assert!(matches!(truncate_content("short", 10), Cow::Borrowed("short")));
        assert!(matches!(truncate_content("exact", 5), Cow::Borrowed("exact")));
    }

    #[test]
    fn test_truncate_content_counts_characters() {
        let truncated = truncate_content("ééééé", 3);
        assert_eq!(truncated, format!("ééé{}", TRUNCATION_NOTICE));
    }

    #[test]
    fn test_custom_budget() {
        let prompt = PromptBuilder::new("q", "doc", 1, "abcdef")
            .with_max_content_chars(2)
            .build();
        assert!(prompt.contains(&format!("Content: ab{}", TRUNCATION_NOTICE)));
    }
}
