//! Line Lexer
//!
//! Fast, simple classification of source lines by comment marker.
//! Focus: one pass over the text, no lookahead, no allocation beyond the
//! output vector.

/// Module-level documentation marker
pub const MODULE_DOC_MARKER: &str = "//!";
/// Item-level documentation marker
pub const ITEM_DOC_MARKER: &str = "///";
/// Plain line comment marker
pub const LINE_COMMENT_MARKER: &str = "//";

/// Classification of a single source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `//!` documentation for the enclosing module or contract
    ModuleDoc,
    /// `///` documentation for the following item
    ItemDoc,
    /// Ordinary `//` comment
    LineComment,
    /// Anything else with visible content
    Code,
    /// Empty or whitespace-only
    Blank,
}

impl LineKind {
    /// Whether this kind belongs to a documentation block
    pub fn is_doc(self) -> bool {
        matches!(self, LineKind::ModuleDoc | LineKind::ItemDoc)
    }

    /// The marker that introduces lines of this kind, if any
    pub fn marker(self) -> Option<&'static str> {
        match self {
            LineKind::ModuleDoc => Some(MODULE_DOC_MARKER),
            LineKind::ItemDoc => Some(ITEM_DOC_MARKER),
            LineKind::LineComment => Some(LINE_COMMENT_MARKER),
            LineKind::Code | LineKind::Blank => None,
        }
    }
}

/// A classified source line
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line text without the line terminator
    pub text: &'a str,
    pub kind: LineKind,
}

impl<'a> Line<'a> {
    /// Line content after the documentation or comment marker.
    ///
    /// At most one space following the marker is removed, so `/// text`
    /// yields `text` while indentation beyond that is preserved.
    pub fn content(&self) -> &'a str {
        let trimmed = self.text.trim_start();
        let Some(marker) = self.kind.marker() else {
            return trimmed;
        };
        let rest = trimmed.strip_prefix(marker).unwrap_or(trimmed);
        rest.strip_prefix(' ').unwrap_or(rest)
    }
}

/// Classify every line of `text`
///
/// Lines are split on `\n`; a trailing `\r` is dropped so CRLF files
/// classify the same as LF files.
pub fn tokenize(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(idx, text)| Line {
            number: idx + 1,
            text,
            kind: classify_line(text),
        })
        .collect()
}

/// Classify a single line
///
/// Four or more slashes are an ordinary comment, not item documentation.
/// Anything without a recognized marker is code.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with(MODULE_DOC_MARKER) {
        LineKind::ModuleDoc
    } else if trimmed.starts_with("////") {
        LineKind::LineComment
    } else if trimmed.starts_with(ITEM_DOC_MARKER) {
        LineKind::ItemDoc
    } else if trimmed.starts_with(LINE_COMMENT_MARKER) {
        LineKind::LineComment
    } else {
        LineKind::Code
    }
}
