//! SNIP Documentation Linter
//!
//! Checks smart-contract source files against the SNIP documentation
//! comment conventions: `//!` for module documentation, `///` for item
//! documentation and Markdown section headings such as `# Arguments`.
//!
//! This library provides:
//! - Line classification and documentation block parsing
//! - Convention rules and their configuration
//! - Text and JSON reporting
//! - A command-line front end, watch mode and an LSP server

pub mod config;
pub mod lint;
pub mod lsp;
pub mod parser;
pub mod report;
pub mod rules;
pub mod validation;
pub mod watch;

// Re-exports for clean public API
pub use config::Config;
pub use lint::{lint_file, lint_paths, lint_text};
pub use parser::{parse_document, SourceFile};
pub use report::{FileReport, ReportFormat, Reporter};
pub use rules::{LintOptions, RuleId, Severity};
pub use validation::{validate_document, Finding, ValidationResult};

/// Initialize `env_logger` at `level` unless `RUST_LOG` says otherwise
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
