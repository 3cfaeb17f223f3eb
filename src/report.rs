//! Reporter
//!
//! Formats findings as human-readable text or as JSON. Rendering has no
//! side effects; printing and exit status belong to the caller.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::rules::Severity;
use crate::validation::{Finding, ValidationResult};

/// Output format of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// `path:line: severity[rule]: message` lines plus a summary
    #[default]
    Text,
    /// Pretty-printed JSON array of per-file results
    Json,
}

/// Findings for one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            path: path.into(),
            findings: result.findings,
        }
    }

    /// Highest severity among the findings, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Renders file reports in a chosen format
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Render all reports into a single string
    pub fn render(&self, reports: &[FileReport]) -> String {
        match self.format {
            ReportFormat::Text => render_text(reports),
            ReportFormat::Json => render_json(reports),
        }
    }
}

/// Format one finding as a text line
pub fn format_finding(path: &str, finding: &Finding) -> String {
    format!(
        "{}:{}: {}[{}]: {}",
        path, finding.line, finding.severity, finding.rule, finding.message
    )
}

/// Write rendered output and flush it
pub fn write_report<W: Write>(writer: &mut W, output: &str) -> std::io::Result<()> {
    writer.write_all(output.as_bytes())?;
    writer.flush()
}

fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();

    for report in reports {
        for finding in &report.findings {
            out.push_str(&format_finding(&report.path, finding));
            out.push('\n');
        }
    }

    let count = |severity: Severity| {
        reports
            .iter()
            .flat_map(|r| &r.findings)
            .filter(|f| f.severity == severity)
            .count()
    };
    let warnings = count(Severity::Warning);
    let infos = count(Severity::Info);

    out.push_str(&format!(
        "{} {}, {} {} in {} {}\n",
        warnings,
        plural(warnings, "warning"),
        infos,
        plural(infos, "info"),
        reports.len(),
        plural(reports.len(), "file"),
    ));

    out
}

fn render_json(reports: &[FileReport]) -> String {
    // Only strings, integers and unit enums; serialization does not fail
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{LintOptions, RuleId};
    use crate::validation::validate_document;

    fn sample_reports() -> Vec<FileReport> {
        let options = LintOptions::default();
        vec![
            FileReport::new(
                "src/token.cairo",
                validate_document("/// doc\n\nfn g(){}\n", &options),
            ),
            FileReport::new("src/clean.cairo", validate_document("fn f(){}\n", &options)),
        ]
    }

    #[test]
    fn test_render_text() {
        let text = Reporter::new(ReportFormat::Text).render(&sample_reports());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "src/token.cairo:1: warning[item-doc-adjacency]: Item documentation is separated from its item by a blank line"
        );
        assert_eq!(lines[1], "1 warning, 0 infos in 2 files");
    }

    #[test]
    fn test_render_json() {
        let json = Reporter::new(ReportFormat::Json).render(&sample_reports());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value[0];
        assert_eq!(first["path"], "src/token.cairo");
        assert_eq!(first["findings"][0]["line"], 1);
        assert_eq!(first["findings"][0]["rule"], "item-doc-adjacency");
        assert_eq!(first["findings"][0]["severity"], "warning");
        assert_eq!(value[1]["findings"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_render_empty() {
        let text = Reporter::default().render(&[]);
        assert_eq!(text, "0 warnings, 0 infos in 0 files\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_write_report_surfaces_flush_errors() {
        let mut out = Vec::new();
        write_report(&mut out, "1 warning\n").unwrap();
        assert_eq!(out, b"1 warning\n");

        let err = write_report(&mut BrokenPipe, "x").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_file_report_max_severity() {
        let report = FileReport {
            path: "a".to_string(),
            findings: vec![Finding::new(3, RuleId::HeadingRecognition, "x".to_string())],
        };
        assert_eq!(report.max_severity(), Some(Severity::Info));
    }
}
