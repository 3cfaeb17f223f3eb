//! Convention Rules
//!
//! Each rule is a pure function from the parsed file to findings.

use crate::parser::sections::MAX_HEADING_LEVEL;
use crate::parser::{DocBlock, DocKind, Heading, LineKind, SourceFile};
use crate::rules::{LintOptions, RuleId};
use crate::validation::engine::Finding;

/// `//!` blocks must not follow code
pub fn check_module_doc_position(file: &SourceFile, findings: &mut Vec<Finding>) {
    let Some(first_code) = file.first_code_line() else {
        return;
    };

    for block in file.blocks.iter().filter(|b| b.kind == DocKind::Module) {
        if block.start_line > first_code {
            findings.push(Finding::new(
                block.start_line,
                RuleId::ModuleDocPosition,
                format!(
                    "Module documentation must precede all code, but code starts at line {}",
                    first_code
                ),
            ));
        }
    }
}

/// `///` blocks must be directly followed by a code line
pub fn check_item_doc_adjacency(file: &SourceFile, findings: &mut Vec<Finding>) {
    for block in file.blocks.iter().filter(|b| b.kind == DocKind::Item) {
        let next = file.kind_at(block.end_line + 1);
        let problem = match next {
            Some(LineKind::Code) => continue,
            Some(LineKind::Blank) => "is separated from its item by a blank line",
            Some(LineKind::LineComment) => "is separated from its item by a comment",
            Some(LineKind::ModuleDoc) => "is followed by module documentation instead of an item",
            Some(LineKind::ItemDoc) => "is not followed by an item",
            None => "is at the end of the file with no item to document",
        };

        findings.push(Finding::new(
            block.end_line,
            RuleId::ItemDocAdjacency,
            format!("Item documentation {}", problem),
        ));
    }
}

/// Headings should be the documented name or a recommended heading
pub fn check_heading_recognition(
    file: &SourceFile,
    options: &LintOptions,
    findings: &mut Vec<Finding>,
) {
    for block in &file.blocks {
        let item_name = file.documented_name(block);

        for heading in block.headings().filter(|h| !h.text.is_empty()) {
            if options.is_recommended_heading(&heading.text, item_name) {
                continue;
            }

            let mut expected: Vec<&str> = Vec::new();
            if let Some(name) = item_name {
                expected.push(name);
            }
            expected.extend(options.heading_vocabulary.iter().map(String::as_str));

            findings.push(Finding::new(
                heading.line,
                RuleId::HeadingRecognition,
                format!(
                    "Heading '{}' is not a recommended heading (expected one of: {})",
                    heading.text,
                    expected.join(", ")
                ),
            ));
        }
    }
}

/// Headings must be well-formed Markdown
pub fn check_heading_format(file: &SourceFile, findings: &mut Vec<Finding>) {
    for heading in file.blocks.iter().flat_map(DocBlock::headings) {
        if let Some(problem) = heading_format_problem(heading) {
            findings.push(Finding::new(heading.line, RuleId::HeadingFormat, problem));
        }
    }
}

fn heading_format_problem(heading: &Heading) -> Option<String> {
    if heading.level > MAX_HEADING_LEVEL {
        Some(format!(
            "Heading uses {} '#' characters; Markdown allows at most {}",
            heading.level, MAX_HEADING_LEVEL
        ))
    } else if heading.text.is_empty() {
        Some("Heading has no text".to_string())
    } else if !heading.spaced {
        Some(format!(
            "Heading '{}' needs a space after '{}'",
            heading.text,
            "#".repeat(heading.level)
        ))
    } else {
        None
    }
}
