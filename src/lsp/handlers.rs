use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::parser::{DocBlock, DocKind, SourceFile};
use crate::rules::{LintOptions, Severity};
use crate::validation::Finding;

/// Source name attached to published diagnostics
pub const DIAGNOSTIC_SOURCE: &str = "snip-doclint";

/// Documentation prefix followed by a partial heading, up to the cursor
static HEADING_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*//[/!]\s*#{1,6}\s*([A-Za-z0-9_ ]*)$").expect("heading prefix pattern is valid")
});

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
}

/// Trait for handling document symbols
#[tower_lsp::async_trait]
pub trait HandleDocumentSymbol {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn create_document_state(&self, content: String) -> DocumentState;
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;
        let line_idx = tdpp.position.line as usize;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        Ok(heading_hover(doc_state, line_idx).map(|value| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: None,
        }))
    }
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line_idx = pos.line as usize;
        let line = doc_state.line(line_idx).unwrap_or("");
        let line_up_to_cursor: String = line.chars().take(pos.character as usize).collect();

        let item_name = doc_state
            .block_at(line_idx + 1)
            .and_then(|block| doc_state.parsed.documented_name(block));

        let completions = heading_completions(&line_up_to_cursor, &doc_state.options, item_name);

        if completions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(completions)))
        }
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Create a new document state, applying the document's modeline
    async fn create_document_state(&self, content: String) -> DocumentState {
        DocumentState::new(content, &self.config.options)
    }

    /// Publish diagnostics for a document
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        let diagnostics: Vec<Diagnostic> = doc_state
            .validate()
            .findings
            .iter()
            .map(|finding| create_lsp_diagnostic(finding, doc_state.line(finding.line.saturating_sub(1))))
            .collect();
        drop(docs);

        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }
}

#[tower_lsp::async_trait]
impl HandleDocumentSymbol for Backend {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        Ok(Some(DocumentSymbolResponse::Nested(document_symbols(
            &doc_state.parsed,
            &doc_state.content,
        ))))
    }
}

/// Convert a finding to an LSP diagnostic spanning its whole line
pub fn create_lsp_diagnostic(finding: &Finding, line_text: Option<&str>) -> Diagnostic {
    let severity = match finding.severity {
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
    };

    let line = finding.line.saturating_sub(1) as u32;
    let end = line_text.map_or(0, utf16_len);

    Diagnostic::new(
        Range::new(Position::new(line, 0), Position::new(line, end)),
        Some(severity),
        Some(NumberOrString::String(finding.rule.as_str().to_string())),
        Some(DIAGNOSTIC_SOURCE.to_string()),
        finding.message.clone(),
        None,
        None,
    )
}

/// Heading completions for a documentation line typed up to the cursor
///
/// Offers the documented item's name first, then the vocabulary in its
/// configured order, filtered by the partially typed text.
pub fn heading_completions(
    line_up_to_cursor: &str,
    options: &LintOptions,
    item_name: Option<&str>,
) -> Vec<CompletionItem> {
    let Some(caps) = HEADING_PREFIX_RE.captures(line_up_to_cursor) else {
        return Vec::new();
    };
    let typed = caps.get(1).map_or("", |m| m.as_str()).trim().to_lowercase();

    item_name
        .into_iter()
        .map(|name| (name, "Documented item name"))
        .chain(
            options
                .heading_vocabulary
                .iter()
                .map(|h| (h.as_str(), "Recommended section heading")),
        )
        .filter(|(label, _)| label.to_lowercase().starts_with(&typed))
        .enumerate()
        .map(|(idx, (label, detail))| CompletionItem {
            label: label.to_string(),
            kind: Some(CompletionItemKind::KEYWORD),
            detail: Some(detail.to_string()),
            sort_text: Some(format!("{:03}", idx)),
            ..Default::default()
        })
        .collect()
}

/// Markdown hover text for a heading on a 0-based line
///
/// Only headings the parser recognized count, so `#` lines inside fenced
/// code get no hover.
pub fn heading_hover(doc_state: &DocumentState, line_idx: usize) -> Option<String> {
    let block = doc_state.block_at(line_idx + 1)?;
    let heading = block.headings().find(|h| h.line == line_idx + 1)?;

    let item_name = doc_state.parsed.documented_name(block);
    let status = if heading.text.is_empty() {
        "Empty heading".to_string()
    } else if item_name.is_some_and(|name| name.eq_ignore_ascii_case(&heading.text)) {
        "Names the documented item".to_string()
    } else if doc_state.options.is_recommended_heading(&heading.text, None) {
        "Recommended section heading".to_string()
    } else {
        format!(
            "Not a recommended heading. Recommended: {}",
            doc_state.options.heading_vocabulary.join(", ")
        )
    };

    Some(format!("**{}**\n\n{}", heading.text, status))
}

/// Outline of documentation blocks with their sections as children
#[allow(deprecated)]
pub fn document_symbols(file: &SourceFile, content: &str) -> Vec<DocumentSymbol> {
    let lines: Vec<&str> = content.lines().collect();
    let line_range = |first: usize, last: usize| {
        let end = lines.get(last - 1).map_or(0, |l| utf16_len(l));
        Range::new(
            Position::new((first - 1) as u32, 0),
            Position::new((last - 1) as u32, end),
        )
    };

    file.blocks
        .iter()
        .map(|block| {
            let children: Vec<DocumentSymbol> = block
                .headings()
                .map(|heading| DocumentSymbol {
                    name: if heading.text.is_empty() {
                        "(empty heading)".to_string()
                    } else {
                        heading.text.clone()
                    },
                    detail: None,
                    kind: SymbolKind::STRING,
                    tags: None,
                    deprecated: Some(false),
                    range: line_range(heading.line, heading.line),
                    selection_range: line_range(heading.line, heading.line),
                    children: None,
                })
                .collect();

            let last = block.item.as_ref().map_or(block.end_line, |item| item.line);

            DocumentSymbol {
                name: block_symbol_name(file, block),
                detail: Some(format!("{} documentation", block.kind.marker())),
                kind: block_symbol_kind(block),
                tags: None,
                deprecated: Some(false),
                range: line_range(block.start_line, last),
                selection_range: line_range(block.start_line, block.start_line),
                children: if children.is_empty() {
                    None
                } else {
                    Some(children)
                },
            }
        })
        .collect()
}

fn block_symbol_name(file: &SourceFile, block: &DocBlock) -> String {
    match (block.kind, file.documented_name(block)) {
        (_, Some(name)) => name.to_string(),
        (DocKind::Module, None) => "module documentation".to_string(),
        (DocKind::Item, None) => "item documentation".to_string(),
    }
}

fn block_symbol_kind(block: &DocBlock) -> SymbolKind {
    if block.kind == DocKind::Module {
        return SymbolKind::MODULE;
    }
    let keyword = block.item.as_ref().and_then(|item| item.keyword.as_deref());
    match keyword {
        Some("fn") => SymbolKind::FUNCTION,
        Some("struct") => SymbolKind::STRUCT,
        Some("enum") => SymbolKind::ENUM,
        Some("trait" | "interface") => SymbolKind::INTERFACE,
        Some("mod" | "contract" | "component") => SymbolKind::MODULE,
        Some("impl") => SymbolKind::CLASS,
        Some("const" | "static") => SymbolKind::CONSTANT,
        Some("type") => SymbolKind::TYPE_PARAMETER,
        _ => SymbolKind::OBJECT,
    }
}

fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}
