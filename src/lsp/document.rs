use crate::parser::{parse_document, DocBlock, SourceFile};
use crate::rules::{options_for_document, LintOptions};
use crate::validation::{validate_source, ValidationResult};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Server options with this document's modeline applied
    pub options: LintOptions,
    pub parsed: SourceFile,
}

impl DocumentState {
    pub fn new(content: String, base: &LintOptions) -> Self {
        let options = options_for_document(base, &content);
        let parsed = parse_document(&content);
        Self {
            content,
            options,
            parsed,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_source(&self.parsed, &self.options)
    }

    /// Text of a 0-based line
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.content.lines().nth(idx)
    }

    /// Documentation block covering a 1-based line
    pub fn block_at(&self, line: usize) -> Option<&DocBlock> {
        self.parsed
            .blocks
            .iter()
            .find(|b| (b.start_line..=b.end_line).contains(&line))
    }
}
