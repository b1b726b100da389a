//! Parse the citation directive out of LLM replies
//!
//! The model is asked to finish with `CITATIONS: [Page 2, Page 5]` or
//! `CITATIONS: [Pages 3-5]`. This module finds the first such directive,
//! strips it from the visible answer and turns its contents into in-range
//! page citations.
//!
//! Grammar (keywords match ASCII case-insensitively, `ws` is any whitespace):
//!
//! ```text
//! directive := "citations:" ws* "[" inner "]"     inner has no line breaks
//! range     := "page" "s"? ws* digits "-" digits  first match, if inner has '-'
//! listed    := "page" ws* digits                  every match, otherwise
//! ```

use pagecite_domain::Citation;
use tracing::debug;

/// Model reply split into visible answer and citations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Reply with the directive removed
    pub response: String,

    /// Citations in order of mention; never empty
    pub citations: Vec<Citation>,
}

/// Split a model reply into the answer text and its page citations
///
/// Pages outside `1..=page_count` are dropped. When no page survives (no
/// directive, malformed directive, or everything out of range) a single
/// [`Citation::document_default`] is returned. Duplicates are kept.
///
/// # Examples
///
/// ```
/// use pagecite_core::citations::parse;
///
/// let reply = parse("Here is info. CITATIONS: [Page 2, Page 5]", 10);
/// assert_eq!(reply.response, "Here is info.");
/// let pages: Vec<usize> = reply.citations.iter().map(|c| c.page).collect();
/// assert_eq!(pages, vec![2, 5]);
/// ```
pub fn parse(model_output: &str, page_count: usize) -> ParsedReply {
    let (response, pages) = match find_directive(model_output) {
        Some(directive) => {
            let mut stripped = String::with_capacity(model_output.len());
            stripped.push_str(&model_output[..directive.start]);
            stripped.push_str(&model_output[directive.end..]);
            (
                stripped.trim().to_string(),
                cited_pages(directive.inner, page_count),
            )
        }
        None => {
            debug!("No citation directive in model reply");
            (model_output.to_string(), Vec::new())
        }
    };

    let mut citations: Vec<Citation> =
        pages.into_iter().map(Citation::referenced).collect();
    if citations.is_empty() {
        citations.push(Citation::document_default());
    }

    ParsedReply {
        response,
        citations,
    }
}

/// Byte span of a directive in the reply, plus the text between its brackets
#[derive(Debug, PartialEq, Eq)]
struct Directive<'a> {
    start: usize,
    end: usize,
    inner: &'a str,
}

fn find_directive(text: &str) -> Option<Directive<'_>> {
    candidates(text, b'c').find_map(|start| {
        let mut cursor = Cursor::at(text, start);
        if !cursor.eat_keyword("citations:") {
            return None;
        }
        cursor.skip_whitespace();
        if !cursor.eat('[') {
            return None;
        }

        let open = cursor.pos;
        let close = open + cursor.rest().find(|c: char| c == ']' || is_line_break(c))?;
        if !text[close..].starts_with(']') {
            return None;
        }

        Some(Directive {
            start,
            end: close + 1,
            inner: &text[open..close],
        })
    })
}

/// Pages named by the directive body, filtered to `1..=page_count`
fn cited_pages(inner: &str, page_count: usize) -> Vec<usize> {
    if inner.contains('-') {
        match page_range(inner) {
            Some((first, last)) => (first.max(1)..=last.min(page_count)).collect(),
            None => {
                debug!("Unrecognized citation range: {}", inner);
                Vec::new()
            }
        }
    } else {
        listed_pages(inner)
            .into_iter()
            .filter(|page| (1..=page_count).contains(page))
            .collect()
    }
}

/// First `Page[s] A-B` in the text
fn page_range(inner: &str) -> Option<(usize, usize)> {
    candidates(inner, b'p').find_map(|start| {
        let mut cursor = Cursor::at(inner, start);
        if !cursor.eat_keyword("page") {
            return None;
        }
        cursor.eat_keyword("s");
        cursor.skip_whitespace();
        let first = cursor.number()?;
        if !cursor.eat('-') {
            return None;
        }
        let last = cursor.number()?;
        Some((first, last))
    })
}

/// Every `Page N` in the text, in order
fn listed_pages(inner: &str) -> Vec<usize> {
    candidates(inner, b'p')
        .filter_map(|start| {
            let mut cursor = Cursor::at(inner, start);
            if !cursor.eat_keyword("page") {
                return None;
            }
            cursor.skip_whitespace();
            cursor.number()
        })
        .collect()
}

/// Offsets where a keyword starting with ASCII `first` could begin
///
/// Only ASCII bytes match, so every offset is a char boundary.
fn candidates(text: &str, first: u8) -> impl Iterator<Item = usize> + '_ {
    text.bytes()
        .enumerate()
        .filter(move |(_, byte)| byte.eq_ignore_ascii_case(&first))
        .map(|(offset, _)| offset)
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Forward-only reader over a string slice
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Consume an ASCII keyword, ignoring ASCII case
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest().as_bytes();
        let matched = rest.len() >= keyword.len()
            && rest[..keyword.len()].eq_ignore_ascii_case(keyword.as_bytes());
        if matched {
            self.pos += keyword.len();
        }
        matched
    }

    fn eat(&mut self, expected: char) -> bool {
        let matched = self.rest().starts_with(expected);
        if matched {
            self.pos += expected.len_utf8();
        }
        matched
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume ASCII digits; oversized values saturate
    fn number(&mut self) -> Option<usize> {
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value = self.rest()[..digits].bytes().fold(0usize, |acc, digit| {
            acc.saturating_mul(10).saturating_add(usize::from(digit - b'0'))
        });
        self.pos += digits;
        Some(value)
    }
}
