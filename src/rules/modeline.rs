//! Per-file rule overrides
//!
//! A comment in the first or last few lines of a file adjusts the enabled
//! rules for that file only:
//!
//! ```text
//! // snip-doclint: disable=heading-recognition,heading-format enable=item-doc-adjacency
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::schema::{LintOptions, RuleId};

/// Number of lines scanned at each end of the file
const MODELINE_WINDOW: usize = 5;

static MODELINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*//[/!]?\s*snip-doclint:\s*(.*)$").expect("modeline pattern is valid")
});

/// Rule changes requested by a modeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelineOverrides {
    pub enable: Vec<RuleId>,
    pub disable: Vec<RuleId>,
}

impl ModelineOverrides {
    pub fn is_empty(&self) -> bool {
        self.enable.is_empty() && self.disable.is_empty()
    }

    /// Apply disables first, then enables
    pub fn apply(&self, options: &mut LintOptions) {
        for rule in &self.disable {
            options.disable(*rule);
        }
        for rule in &self.enable {
            options.enable(*rule);
        }
    }
}

/// Detect rule overrides from a modeline in document content
///
/// Only the first and last [`MODELINE_WINDOW`] lines are checked. The first
/// modeline found wins. Unknown rule names are skipped with a warning.
pub fn detect_modeline(content: &str) -> Option<ModelineOverrides> {
    let lines: Vec<&str> = content.lines().collect();
    let check_lines: Vec<&str> = if lines.len() <= MODELINE_WINDOW * 2 {
        lines
    } else {
        let mut check = Vec::with_capacity(MODELINE_WINDOW * 2);
        check.extend_from_slice(&lines[..MODELINE_WINDOW]);
        check.extend_from_slice(&lines[lines.len() - MODELINE_WINDOW..]);
        check
    };

    check_lines
        .into_iter()
        .find_map(|line| MODELINE_RE.captures(line))
        .map(|caps| parse_directives(caps.get(1).map_or("", |m| m.as_str())))
}

/// Parse `enable=a,b disable=c` directives
fn parse_directives(text: &str) -> ModelineOverrides {
    let mut overrides = ModelineOverrides::default();

    for directive in text.split_whitespace() {
        let Some((key, value)) = directive.split_once('=') else {
            log::warn!("Ignoring malformed modeline directive '{}'", directive);
            continue;
        };

        let target = match key.trim() {
            "enable" => &mut overrides.enable,
            "disable" => &mut overrides.disable,
            other => {
                log::warn!("Ignoring unknown modeline directive '{}'", other);
                continue;
            }
        };

        for name in value.split(',').filter(|n| !n.trim().is_empty()) {
            match name.parse::<RuleId>() {
                Ok(rule) => target.push(rule),
                Err(e) => log::warn!("Ignoring modeline rule: {}", e),
            }
        }
    }

    overrides
}

/// Resolve the options for one document: base options plus its modeline
pub fn options_for_document(base: &LintOptions, content: &str) -> LintOptions {
    let mut options = base.clone();
    if let Some(overrides) = detect_modeline(content) {
        overrides.apply(&mut options);
    }
    options
}
