//! Rule System
//!
//! Rule identifiers, lint options, configuration files and per-file
//! modeline overrides.

pub mod modeline;
pub mod schema;

pub use modeline::{detect_modeline, options_for_document, ModelineOverrides};
pub use schema::{ConfigFile, LintOptions, RuleId, Severity, DEFAULT_HEADINGS};

/// Embedded default configuration
pub const BUILTIN_CONFIG: &str = include_str!("../../resources/default.snip-doclint.toml");

/// Lint options from the embedded default configuration
///
/// Falls back to [`LintOptions::default`] if the embedded file fails to
/// parse.
pub fn builtin_options() -> LintOptions {
    let mut options = LintOptions::default();
    match toml::from_str::<ConfigFile>(BUILTIN_CONFIG) {
        Ok(file) => file.apply(&mut options),
        Err(e) => {
            log::warn!(
                "Failed to parse embedded default configuration: {}. Using built-in defaults.",
                e
            );
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_matches_defaults() {
        let parsed: ConfigFile = toml::from_str(BUILTIN_CONFIG).expect("embedded config parses");
        let mut options = LintOptions::default();
        parsed.apply(&mut options);

        assert_eq!(options, LintOptions::default());
        assert_eq!(builtin_options(), LintOptions::default());
    }
}
