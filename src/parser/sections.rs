//! Section Parser
//!
//! Splits the content of a documentation block into Markdown-heading
//! delimited sections.

use crate::parser::ast::{Heading, Section};

/// Deepest heading level Markdown defines
pub const MAX_HEADING_LEVEL: usize = 6;

/// Split documentation content lines into sections
///
/// `lines` yields `(line number, content)` pairs with the documentation
/// marker already stripped. Lines before the first heading form an untitled
/// section, omitted when the block opens with a heading. Headings inside
/// fenced code are body text.
pub fn split_sections<'a, I>(lines: I) -> Vec<Section>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut sections = Vec::new();
    let mut current = Section {
        heading: None,
        body: Vec::new(),
    };
    let mut fence: Option<&'static str> = None;

    for (number, content) in lines {
        if let Some(marker) = fence_marker(content) {
            match fence {
                Some(open) if open == marker => fence = None,
                Some(_) => {}
                None => fence = Some(marker),
            }
            current.body.push(content.to_string());
            continue;
        }

        if fence.is_none() {
            if let Some(heading) = parse_heading(number, content) {
                if current.heading.is_some() || !current.body.is_empty() {
                    sections.push(current);
                }
                current = Section {
                    heading: Some(heading),
                    body: Vec::new(),
                };
                continue;
            }
        }

        current.body.push(content.to_string());
    }

    if current.heading.is_some() || !current.body.is_empty() {
        sections.push(current);
    }

    sections
}

/// Parse a heading line like `# Arguments`
///
/// Any line starting with `#` counts; well-formedness (spacing, level,
/// non-empty text) is recorded for the validator to judge.
pub fn parse_heading(number: usize, content: &str) -> Option<Heading> {
    let rest = content.trim_start();
    if !rest.starts_with('#') {
        return None;
    }

    let level = rest.chars().take_while(|c| *c == '#').count();
    let after = &rest[level..];
    let spaced = after.is_empty() || after.starts_with([' ', '\t']);

    Some(Heading {
        line: number,
        level,
        text: strip_closing_hashes(after.trim()).to_string(),
        spaced,
    })
}

/// Drop a closing `#` sequence, which only counts after a space
fn strip_closing_hashes(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        text
    } else if without.is_empty() {
        without
    } else if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}

/// Return the fence marker if the line opens or closes fenced code
fn fence_marker(content: &str) -> Option<&'static str> {
    let trimmed = content.trim_start();
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}
