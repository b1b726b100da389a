//! Positional page segmentation
//!
//! Extracted PDF text carries no page boundaries, so pages are approximated
//! by splitting the text into `page_count` equal runs of characters. Segments
//! know nothing about sentences or paragraphs.

use crate::error::QaError;
use pagecite_domain::PageSegment;
use std::iter;

/// Characters assigned to each page: `ceil(total_chars / page_count)`
pub fn chars_per_page(total_chars: usize, page_count: usize) -> Result<usize, QaError> {
    if page_count == 0 {
        return Err(QaError::InvalidPageCount(page_count));
    }
    Ok(total_chars.div_ceil(page_count))
}

/// Split `full_text` into exactly `page_count` contiguous segments
///
/// Page `i` (0-based) covers characters `[i * n, min((i + 1) * n, len))` where
/// `n` is [`chars_per_page`]. Trailing pages may be short or empty; the
/// segments always concatenate back to `full_text`.
///
/// # Errors
///
/// Returns [`QaError::InvalidPageCount`] when `page_count` is zero.
pub fn segment(full_text: &str, page_count: usize) -> Result<Vec<PageSegment>, QaError> {
    // Byte offset of every char boundary, including the end of the string
    let offsets: Vec<usize> = full_text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(iter::once(full_text.len()))
        .collect();
    let total_chars = offsets.len() - 1;
    let per_page = chars_per_page(total_chars, page_count)?;

    let pages = (0..page_count)
        .map(|index| {
            let start = index.saturating_mul(per_page).min(total_chars);
            let end = (index + 1).saturating_mul(per_page).min(total_chars);
            PageSegment {
                page_number: index + 1,
                text: full_text[offsets[start]..offsets[end]].to_string(),
            }
        })
        .collect();

    Ok(pages)
}
