//! Pagecite PDF Extraction
//!
//! Implements the `TextExtractor` trait for PDF bytes.
//!
//! The page count comes from the document's page tree (`lopdf`); the text
//! comes from `pdf-extract`, which returns all pages as one string. Page
//! boundaries are not recovered here; `pagecite-core` segments the flat text
//! positionally.

#![warn(missing_docs)]

use lopdf::Document;
use pagecite_domain::traits::TextExtractor;
use pagecite_domain::ExtractedText;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading a PDF
#[derive(Error, Debug)]
pub enum PdfError {
    /// Bytes could not be parsed as a PDF
    #[error("Failed to load PDF: {0}")]
    Load(String),

    /// Document structure is fine but text extraction failed
    #[error("Failed to extract text: {0}")]
    Text(String),

    /// Page tree is empty
    #[error("PDF has no pages")]
    NoPages,
}

/// Returns true if the bytes start with the `%PDF-` magic marker
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}

/// Count the pages in a PDF's page tree
pub fn count_pages(bytes: &[u8]) -> Result<usize, PdfError> {
    let document = Document::load_mem(bytes)
        .map_err(|e| PdfError::Load(e.to_string()))?;
    match document.get_pages().len() {
        0 => Err(PdfError::NoPages),
        pages => Ok(pages),
    }
}

/// PDF text extractor backed by `lopdf` and `pdf-extract`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    type Error = PdfError;

    fn extract_text(&self, bytes: &[u8]) -> Result<ExtractedText, PdfError> {
        if !is_pdf(bytes) {
            return Err(PdfError::Load("missing %PDF- header".to_string()));
        }

        let page_count = count_pages(bytes)?;
        let full_text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| PdfError::Text(e.to_string()))?;

        debug!("Extracted {} chars from {} page PDF", full_text.len(), page_count);

        Ok(ExtractedText {
            full_text,
            page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a small PDF with one line of text per page
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let stream = Stream::new(dictionary! {}, content.encode().unwrap());
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.7\n..."));
        assert!(!is_pdf(b"hello world"));
        assert!(!is_pdf(b""));
    }

    #[test]
    fn test_count_pages() {
        let bytes = build_pdf(&["first", "second", "third"]);
        assert_eq!(count_pages(&bytes).unwrap(), 3);
    }

    #[test]
    fn test_extracts_text_and_page_count() {
        let bytes = build_pdf(&["alpha", "bravo"]);
        let extracted = PdfTextExtractor::new().extract_text(&bytes).unwrap();

        assert_eq!(extracted.page_count, 2);
        assert!(extracted.full_text.contains("alpha"));
        assert!(extracted.full_text.contains("bravo"));
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = PdfTextExtractor::new().extract_text(b"just some text");
        assert!(matches!(result, Err(PdfError::Load(_))));
    }

    #[test]
    fn test_rejects_truncated_pdf() {
        let result = PdfTextExtractor::new().extract_text(b"%PDF-1.5\n1 0 obj\n<<");
        assert!(result.is_err());
    }
}
