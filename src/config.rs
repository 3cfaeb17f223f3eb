//! Configuration management for the documentation linter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Configuration file discovery and layering
//!
//! Priority, lowest first: built-in defaults, user-global config, project
//! config, `--config` file, command-line rule and heading flags. Per-file
//! modelines are applied later, by the caller that owns the file content.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, ValueEnum};

use crate::report::ReportFormat;
use crate::rules::{self, ConfigFile, LintOptions, RuleId, Severity};

/// File name searched for from the working directory upward
pub const PROJECT_CONFIG_FILE: &str = ".snip-doclint.toml";

/// Options shared by the CLI and the language server
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Configuration file layered on top of user and project configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ignore user-global and project configuration files
    #[arg(long)]
    pub isolated: bool,

    /// Enable a rule (repeatable)
    #[arg(long, value_name = "RULE")]
    pub enable: Vec<RuleId>,

    /// Disable a rule (repeatable)
    #[arg(long, value_name = "RULE")]
    pub disable: Vec<RuleId>,

    /// Add a recommended heading (repeatable)
    #[arg(long, value_name = "TEXT")]
    pub heading: Vec<String>,

    /// Log level
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Command-line arguments for the linter
#[derive(Debug, Parser)]
#[command(name = "snip-doclint")]
#[command(about = "Check smart-contract documentation comments against the SNIP conventions")]
#[command(version)]
pub struct Args {
    /// Files or directories to lint
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// File extensions linted when walking directories
    #[arg(long, value_delimiter = ',', default_value = "cairo,rs")]
    pub extensions: Vec<String>,

    /// Lowest severity that makes the run fail
    #[arg(long, value_enum, default_value_t = FailOn::Warning)]
    pub fail_on: FailOn,

    /// Keep running and re-lint files when they change
    #[arg(long)]
    pub watch: bool,
}

/// Command-line arguments for the language server
#[derive(Debug, Parser)]
#[command(name = "snip-doclint-ls")]
#[command(about = "Language server for SNIP documentation conventions")]
#[command(version)]
pub struct ServerArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Which findings make the CLI exit with failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    #[default]
    Warning,
    Info,
    Never,
}

impl FailOn {
    /// Whether a run whose worst finding is `max` should fail
    pub fn is_triggered(self, max: Option<Severity>) -> bool {
        match (self, max) {
            (FailOn::Never, _) | (_, None) => false,
            (FailOn::Info, Some(_)) => true,
            (FailOn::Warning, Some(severity)) => severity >= Severity::Warning,
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Effective lint options before per-file modelines
    pub options: LintOptions,
    /// Paths to lint
    pub paths: Vec<PathBuf>,
    pub format: ReportFormat,
    /// Extensions (without dot) linted when walking directories
    pub extensions: Vec<String>,
    pub fail_on: FailOn,
    pub watch: bool,
    pub log_level: String,
    /// Configuration files applied, lowest priority first
    pub sources: Vec<PathBuf>,
    /// Project configuration file, if one was found
    pub project_config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: rules::builtin_options(),
            paths: Vec::new(),
            format: ReportFormat::Text,
            extensions: vec!["cairo".to_string(), "rs".to_string()],
            fail_on: FailOn::Warning,
            watch: false,
            log_level: "info".to_string(),
            sources: Vec::new(),
            project_config_path: None,
        }
    }
}

impl Config {
    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Self::resolve(args, &cwd, user_config_path().as_deref())
    }

    /// Create language server configuration
    pub fn from_server_args(args: ServerArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Self::resolve_common(args.common, &cwd, user_config_path().as_deref())
    }

    /// Resolve configuration relative to `cwd` with an explicit user config
    pub fn resolve(args: Args, cwd: &Path, user_config: Option<&Path>) -> Result<Self> {
        let mut config = Self::resolve_common(args.common, cwd, user_config)?;

        config.paths = if args.paths.is_empty() {
            vec![cwd.to_path_buf()]
        } else {
            args.paths
        };
        config.format = args.format;
        config.extensions = args
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        config.fail_on = args.fail_on;
        config.watch = args.watch;

        Ok(config)
    }

    fn resolve_common(common: CommonArgs, cwd: &Path, user_config: Option<&Path>) -> Result<Self> {
        let mut config = Config {
            log_level: common.log_level,
            ..Config::default()
        };

        if !common.isolated {
            if let Some(path) = user_config.filter(|p| p.is_file()) {
                config.apply_file(path)?;
            }

            if let Some(path) = find_project_config(cwd) {
                config.apply_file(&path)?;
                config.project_config_path = Some(path);
            }
        }

        if let Some(path) = &common.config {
            config.apply_file(path)?;
        }

        for rule in common.disable {
            config.options.disable(rule);
        }
        for rule in common.enable {
            config.options.enable(rule);
        }
        for heading in &common.heading {
            config.options.add_heading(heading);
        }

        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let file = load_config_file(path)?;
        file.apply(&mut self.options);
        self.sources.push(path.to_path_buf());
        Ok(())
    }

    /// Whether a project configuration file was found
    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }

    /// Whether `path` has one of the configured extensions
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// User-global configuration file: `<config dir>/snip-doclint/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snip-doclint").join("config.toml"))
}

/// Search `start` and its ancestors for a project configuration file
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Read and parse a configuration file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
