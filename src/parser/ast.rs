//! Documentation Structure
//!
//! Clean, minimal types representing the documentation found in a source
//! file. No validation logic or LSP concerns - pure data representation.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::lexer::{Line, LineKind};

/// Which marker a documentation block uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    /// `//!` lines
    Module,
    /// `///` lines
    Item,
}

impl DocKind {
    /// Map a line classification to a block kind
    pub fn from_line_kind(kind: LineKind) -> Option<Self> {
        match kind {
            LineKind::ModuleDoc => Some(DocKind::Module),
            LineKind::ItemDoc => Some(DocKind::Item),
            _ => None,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            DocKind::Module => crate::parser::lexer::MODULE_DOC_MARKER,
            DocKind::Item => crate::parser::lexer::ITEM_DOC_MARKER,
        }
    }
}

/// A Markdown heading that opens a section
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// 1-based line of the heading
    pub line: usize,
    /// Number of leading `#` characters
    pub level: usize,
    /// Heading text, trimmed
    pub text: String,
    /// Whether a space separates the hashes from the text
    pub spaced: bool,
}

/// A heading-delimited region of a documentation block
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// `None` for the untitled leading section
    pub heading: Option<Heading>,
    /// Body lines with the marker stripped, in source order
    pub body: Vec<String>,
}

/// The declaration a documentation block belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentedItem {
    /// 1-based line of the declaration
    pub line: usize,
    /// Declaration keyword, e.g. `fn` or `mod`
    pub keyword: Option<String>,
    /// Declared name, when the line matches a known declaration form
    pub name: Option<String>,
}

/// A contiguous run of documentation lines of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct DocBlock {
    pub kind: DocKind,
    /// 1-based first line
    pub start_line: usize,
    /// 1-based last line (inclusive)
    pub end_line: usize,
    pub sections: Vec<Section>,
    /// First non-attribute code line after the block
    pub item: Option<DocumentedItem>,
}

impl DocBlock {
    /// All headings of the block, in order
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.sections.iter().filter_map(|s| s.heading.as_ref())
    }

    /// Name of the documented item, if one was recognized
    pub fn item_name(&self) -> Option<&str> {
        self.item.as_ref()?.name.as_deref()
    }
}

/// A parsed source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Classification of every line, indexed by `number - 1`
    pub line_kinds: Vec<LineKind>,
    pub blocks: Vec<DocBlock>,
    /// First named declaration in the file
    pub first_item_name: Option<String>,
}

impl SourceFile {
    /// Classification of a 1-based line, `None` past the end of the file
    pub fn kind_at(&self, line: usize) -> Option<LineKind> {
        line.checked_sub(1)
            .and_then(|idx| self.line_kinds.get(idx))
            .copied()
    }

    /// 1-based number of the first code line
    pub fn first_code_line(&self) -> Option<usize> {
        self.line_kinds
            .iter()
            .position(|kind| *kind == LineKind::Code)
            .map(|idx| idx + 1)
    }

    /// Number of lines in the file
    pub fn line_count(&self) -> usize {
        self.line_kinds.len()
    }

    /// Name a block's headings may use besides the recommended vocabulary
    ///
    /// Module blocks document the file's first declaration, typically the
    /// contract module.
    pub fn documented_name<'a>(&'a self, block: &'a DocBlock) -> Option<&'a str> {
        match block.kind {
            DocKind::Item => block.item_name(),
            DocKind::Module => self.first_item_name.as_deref(),
        }
    }
}

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:pub(?:\s*\([^)]*\))?\s+)?(?:(?:unsafe|extern|async|const|default|nopanic)\s+)*(fn|struct|enum|trait|mod|impl|type|const|static|component|contract|interface)\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .expect("declaration pattern is valid")
});

/// Recognize a declaration keyword and name on a code line
///
/// `pub fn transfer(...)` yields `("fn", "transfer")`; Cairo's
/// `impl ERC20Impl of IERC20<...>` yields `("impl", "ERC20Impl")`.
pub fn parse_declaration(line: &str) -> Option<(String, String)> {
    let caps = DECLARATION_RE.captures(line.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Whether a code line is an attribute such as `#[starknet::contract]`
pub fn is_attribute(line: &str) -> bool {
    line.trim_start().starts_with("#[")
}

/// Find the item documented by a block ending at `end_line`
///
/// Attribute lines are skipped; any other line kind ends the search.
pub(crate) fn find_documented_item(lines: &[Line<'_>], end_line: usize) -> Option<DocumentedItem> {
    lines
        .iter()
        .skip(end_line)
        .take_while(|line| line.kind == LineKind::Code)
        .find(|line| !is_attribute(line.text))
        .map(|line| {
            let decl = parse_declaration(line.text);
            DocumentedItem {
                line: line.number,
                keyword: decl.as_ref().map(|(kw, _)| kw.clone()),
                name: decl.map(|(_, name)| name),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_parse_declaration_rust_forms() {
        assert_eq!(
            parse_declaration("pub fn transfer(to: Address) {"),
            Some(("fn".to_string(), "transfer".to_string()))
        );
        assert_eq!(
            parse_declaration("pub(crate) struct Balance;"),
            Some(("struct".to_string(), "Balance".to_string()))
        );
        assert_eq!(
            parse_declaration("    const fn zero() -> u8 { 0 }"),
            Some(("fn".to_string(), "zero".to_string()))
        );
    }

    #[test]
    fn test_parse_declaration_cairo_forms() {
        assert_eq!(
            parse_declaration("mod ERC20 {"),
            Some(("mod".to_string(), "ERC20".to_string()))
        );
        assert_eq!(
            parse_declaration("impl ERC20Impl of IERC20<ContractState> {"),
            Some(("impl".to_string(), "ERC20Impl".to_string()))
        );
        assert_eq!(
            parse_declaration("fn balance_of(self: @ContractState) -> u256 nopanic {"),
            Some(("fn".to_string(), "balance_of".to_string()))
        );
    }

    #[test]
    fn test_parse_declaration_rejects_statements() {
        assert_eq!(parse_declaration("let x = 5;"), None);
        assert_eq!(parse_declaration("}"), None);
        assert_eq!(parse_declaration("impl<T> Foo for T {}"), None);
    }

    #[test]
    fn test_find_documented_item_skips_attributes() {
        let lines = tokenize("/// doc\n#[starknet::contract]\nmod Vault {\n");
        let item = find_documented_item(&lines, 1).unwrap();

        assert_eq!(item.line, 3);
        assert_eq!(item.keyword.as_deref(), Some("mod"));
        assert_eq!(item.name.as_deref(), Some("Vault"));
    }

    #[test]
    fn test_find_documented_item_stops_at_blank() {
        let lines = tokenize("/// doc\n\nfn f() {}\n");
        assert_eq!(find_documented_item(&lines, 1), None);
    }

    #[test]
    fn test_kind_at_out_of_range() {
        let file = SourceFile {
            line_kinds: vec![LineKind::Code],
            blocks: Vec::new(),
            first_item_name: None,
        };

        assert_eq!(file.kind_at(0), None);
        assert_eq!(file.kind_at(1), Some(LineKind::Code));
        assert_eq!(file.kind_at(2), None);
    }
}
