//! Validation Engine
//!
//! Core validation logic separated from parsing and LSP concerns.

use serde::Serialize;

use crate::parser::{parse_document, SourceFile};
use crate::rules::{LintOptions, RuleId, Severity};
use crate::validation::rules;

/// A single validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// 1-based line the finding refers to
    pub line: usize,
    pub rule: RuleId,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    /// Create a finding with the rule's severity
    pub fn new(line: usize, rule: RuleId, message: String) -> Self {
        Self {
            line,
            rule,
            severity: rule.severity(),
            message,
        }
    }
}

/// Result of validating a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings with exactly `severity`
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Highest severity present, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Findings produced by one rule
    pub fn by_rule(&self, rule: RuleId) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.rule == rule)
    }
}

/// Validate parsed documentation structure
///
/// Rules run independently; the result is ordered by line, then by rule.
pub fn validate_source(file: &SourceFile, options: &LintOptions) -> ValidationResult {
    let mut findings = Vec::new();

    if options.is_enabled(RuleId::ModuleDocPosition) {
        rules::check_module_doc_position(file, &mut findings);
    }
    if options.is_enabled(RuleId::ItemDocAdjacency) {
        rules::check_item_doc_adjacency(file, &mut findings);
    }
    if options.is_enabled(RuleId::HeadingRecognition) {
        rules::check_heading_recognition(file, options, &mut findings);
    }
    if options.is_enabled(RuleId::HeadingFormat) {
        rules::check_heading_format(file, &mut findings);
    }

    findings.sort_by_key(|f| (f.line, f.rule));

    ValidationResult { findings }
}

/// Validate an entire document
pub fn validate_document(content: &str, options: &LintOptions) -> ValidationResult {
    let file = parse_document(content);
    validate_source(&file, options)
}
