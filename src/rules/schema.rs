//! Rule Schema Types
//!
//! Rule identifiers, lint options and the TOML configuration file format.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Identifier of a validation rule
///
/// Declaration order is the order findings on the same line are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// `//!` documentation must come before any code
    ModuleDocPosition,
    /// `///` documentation must sit directly on top of its item
    ItemDocAdjacency,
    /// Headings should be drawn from the recommended vocabulary
    HeadingRecognition,
    /// Headings must be well-formed Markdown
    HeadingFormat,
}

impl RuleId {
    pub const ALL: [RuleId; 4] = [
        RuleId::ModuleDocPosition,
        RuleId::ItemDocAdjacency,
        RuleId::HeadingRecognition,
        RuleId::HeadingFormat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::ModuleDocPosition => "module-doc-position",
            RuleId::ItemDocAdjacency => "item-doc-adjacency",
            RuleId::HeadingRecognition => "heading-recognition",
            RuleId::HeadingFormat => "heading-format",
        }
    }

    /// Severity of every finding this rule produces
    pub fn severity(self) -> Severity {
        match self {
            RuleId::HeadingRecognition => Severity::Info,
            RuleId::ModuleDocPosition | RuleId::ItemDocAdjacency | RuleId::HeadingFormat => {
                Severity::Warning
            }
        }
    }

    /// One-line description for help output
    pub fn description(self) -> &'static str {
        match self {
            RuleId::ModuleDocPosition => "module documentation (//!) must precede all code",
            RuleId::ItemDocAdjacency => {
                "item documentation (///) must be directly followed by the documented item"
            }
            RuleId::HeadingRecognition => {
                "headings should be the item name or one of the recommended headings"
            }
            RuleId::HeadingFormat => "headings must be well-formed Markdown",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = RuleId::ALL.iter().map(|r| r.as_str()).collect();
                format!("unknown rule '{}' (known rules: {})", s, known.join(", "))
            })
    }
}

/// Headings recommended for contract and function documentation
pub const DEFAULT_HEADINGS: [&str; 4] = ["Examples", "Arguments", "Returns", "Panics"];

/// Options controlling which rules run and which headings are recommended
#[derive(Debug, Clone, PartialEq)]
pub struct LintOptions {
    pub enabled_rules: BTreeSet<RuleId>,
    /// Ordered, case-insensitively unique heading texts
    pub heading_vocabulary: Vec<String>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            enabled_rules: RuleId::ALL.into_iter().collect(),
            heading_vocabulary: DEFAULT_HEADINGS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl LintOptions {
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        self.enabled_rules.contains(&rule)
    }

    pub fn enable(&mut self, rule: RuleId) {
        self.enabled_rules.insert(rule);
    }

    pub fn disable(&mut self, rule: RuleId) {
        self.enabled_rules.remove(&rule);
    }

    /// Append a heading unless an equal one (ignoring case) is present
    pub fn add_heading(&mut self, heading: &str) {
        let heading = heading.trim();
        if heading.is_empty() {
            return;
        }
        if !self
            .heading_vocabulary
            .iter()
            .any(|h| h.eq_ignore_ascii_case(heading))
        {
            self.heading_vocabulary.push(heading.to_string());
        }
    }

    /// Replace the vocabulary, dropping duplicates
    pub fn set_headings<I, S>(&mut self, headings: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.heading_vocabulary.clear();
        for heading in headings {
            self.add_heading(heading.as_ref());
        }
    }

    /// Whether `text` is a recommended heading for an item called `item_name`
    pub fn is_recommended_heading(&self, text: &str, item_name: Option<&str>) -> bool {
        let text = text.trim();
        item_name.is_some_and(|name| name.eq_ignore_ascii_case(text))
            || self
                .heading_vocabulary
                .iter()
                .any(|h| h.eq_ignore_ascii_case(text))
    }
}

/// Root configuration file structure (matches TOML)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub rules: RulesTable,
    #[serde(default)]
    pub headings: HeadingsTable,
}

/// `[rules]` table
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RulesTable {
    /// Replaces the enabled set when present
    pub enabled: Option<Vec<RuleId>>,
    /// Removed after `enabled` is applied
    #[serde(default)]
    pub disabled: Vec<RuleId>,
}

/// `[headings]` table
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeadingsTable {
    /// Replaces the vocabulary when present
    pub vocabulary: Option<Vec<String>>,
    /// Appended after `vocabulary` is applied
    #[serde(default)]
    pub extend: Vec<String>,
}

impl ConfigFile {
    /// Layer this file on top of `options`
    pub fn apply(&self, options: &mut LintOptions) {
        if let Some(enabled) = &self.rules.enabled {
            options.enabled_rules = enabled.iter().copied().collect();
        }
        for rule in &self.rules.disabled {
            options.disable(*rule);
        }

        if let Some(vocabulary) = &self.headings.vocabulary {
            options.set_headings(vocabulary);
        }
        for heading in &self.headings.extend {
            options.add_heading(heading);
        }
    }
}
