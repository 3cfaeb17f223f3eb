//! Documentation Parser
//!
//! Clean, fast extraction of documentation blocks from source text.
//! Focused solely on line classification and block/section construction.

pub mod ast;
pub mod lexer;
pub mod sections;

pub use ast::{DocBlock, DocKind, DocumentedItem, Heading, Section, SourceFile};
pub use lexer::{classify_line, tokenize, Line, LineKind};
pub use sections::{parse_heading, split_sections};

/// Parse source text into its documentation structure
///
/// This is the main entry point for parsing. It classifies every line,
/// groups maximal runs of same-kind documentation lines into blocks and
/// splits each block into sections.
pub fn parse_document(text: &str) -> SourceFile {
    let lines = lexer::tokenize(text);
    let blocks = collect_blocks(&lines);

    let first_item_name = lines
        .iter()
        .filter(|line| line.kind == LineKind::Code)
        .find_map(|line| ast::parse_declaration(line.text))
        .map(|(_, name)| name);

    SourceFile {
        line_kinds: lines.iter().map(|line| line.kind).collect(),
        blocks,
        first_item_name,
    }
}

/// Group consecutive documentation lines into blocks
///
/// A change of documentation kind ends the current block, so `//!`
/// followed directly by `///` yields two blocks.
fn collect_blocks(lines: &[Line<'_>]) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let Some(kind) = DocKind::from_line_kind(lines[idx].kind) else {
            idx += 1;
            continue;
        };

        let start = idx;
        while idx < lines.len() && lines[idx].kind == lines[start].kind {
            idx += 1;
        }
        let run = &lines[start..idx];

        let start_line = run[0].number;
        let end_line = run[run.len() - 1].number;

        blocks.push(DocBlock {
            kind,
            start_line,
            end_line,
            sections: sections::split_sections(run.iter().map(|l| (l.number, l.content()))),
            item: ast::find_documented_item(lines, end_line),
        });
    }

    blocks
}
