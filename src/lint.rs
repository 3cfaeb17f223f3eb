//! File-level linting
//!
//! Reads files, applies per-file modelines and runs the validation
//! pipeline. The core pipeline is pure; all I/O lives here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::report::FileReport;
use crate::rules::{options_for_document, LintOptions, Severity};
use crate::validation::{validate_document, ValidationResult};

/// Directories never descended into
const SKIPPED_DIRS: [&str; 2] = ["target", "node_modules"];

/// Lint in-memory content, honoring its modeline
pub fn lint_text(content: &str, base: &LintOptions) -> ValidationResult {
    let options = options_for_document(base, content);
    validate_document(content, &options)
}

/// Read and lint a single file
pub fn lint_file(path: &Path, base: &LintOptions) -> Result<FileReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    let result = lint_text(&content, base);
    log::debug!(
        "Linted {}: {} findings",
        path.display(),
        result.findings.len()
    );
    Ok(FileReport::new(path.display().to_string(), result))
}

/// Outcome of linting a set of paths
#[derive(Debug, Default)]
pub struct LintRun {
    pub reports: Vec<FileReport>,
    /// Files or paths that could not be processed
    pub errors: Vec<anyhow::Error>,
}

impl LintRun {
    /// Highest severity across all reports
    pub fn max_severity(&self) -> Option<Severity> {
        self.reports.iter().filter_map(FileReport::max_severity).max()
    }
}

/// Lint every configured path
///
/// Errors are collected per path and per file so one bad argument or
/// unreadable file does not stop the run.
pub fn lint_paths(config: &Config) -> LintRun {
    let mut run = LintRun::default();
    let files = collect_files(&config.paths, config, &mut run.errors);

    for file in files {
        match lint_file(&file, &config.options) {
            Ok(report) => run.reports.push(report),
            Err(e) => {
                log::warn!("{:#}", e);
                run.errors.push(e);
            }
        }
    }

    run
}

/// Expand paths into the sorted list of files to lint
///
/// Explicit file paths are always included; directories are walked
/// recursively for files with a configured extension, skipping hidden and
/// build directories. Symbolic links inside a walked directory are not
/// followed. Paths that cannot be expanded are recorded in `errors`.
pub fn collect_files(
    paths: &[PathBuf],
    config: &Config,
    errors: &mut Vec<anyhow::Error>,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            walk_dir(path, config, &mut files, errors);
        } else if path.exists() {
            files.push(path.clone());
        } else {
            log::warn!("Path does not exist: {}", path.display());
            errors.push(anyhow!("Path does not exist: {}", path.display()));
        }
    }

    files.sort();
    files.dedup();
    files
}

fn walk_dir(
    dir: &Path,
    config: &Config,
    files: &mut Vec<PathBuf>,
    errors: &mut Vec<anyhow::Error>,
) {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && config.matches_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                let e = anyhow::Error::new(e)
                    .context(format!("Failed to walk directory: {}", dir.display()));
                log::warn!("{:#}", e);
                errors.push(e);
            }
        }
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}
