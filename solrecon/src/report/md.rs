//! Markdown renderer over the document tree.

use super::assemble::ReportTree;
use std::fmt::Write;

/// Renders the document tree as Markdown.
///
/// Pure function of the tree: identical trees render to identical bytes.
#[must_use]
pub fn render(tree: &ReportTree) -> String {
    let mut out = String::new();

    // Infallible: `write!` into a String cannot fail.
    let _ = writeln!(out, "# Entrypoint & Sink Report");
    let _ = writeln!(out);

    if let Some(note) = &tree.sink_note {
        let _ = writeln!(out, "> **Note:** {note}");
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Contents");
    let _ = writeln!(out);
    if tree.toc.is_empty() {
        let _ = writeln!(out, "_No entrypoints or sinks found._");
        let _ = writeln!(out);
    }
    for entry in &tree.toc {
        let _ = writeln!(out, "- [`{}`](#{})", entry.title, entry.anchor);
    }
    if !tree.toc.is_empty() {
        let _ = writeln!(out);
    }

    for file in &tree.files {
        let _ = writeln!(out, "## `{}`", file.path);
        let _ = writeln!(out);
        for contract in &file.contracts {
            let _ = writeln!(out, "### {} ({})", contract.name, contract.kind);
            let _ = writeln!(out);
            for func in &contract.functions {
                let _ = writeln!(out, "<a id=\"{}\"></a>", func.anchor);
                let _ = writeln!(out);
                let _ = writeln!(
                    out,
                    "#### `{}` [{} {}], line {}",
                    func.signature, func.visibility, func.mutability, func.line
                );
                let _ = writeln!(out);
                if !func.modifiers.is_empty() {
                    let _ = writeln!(out, "- modifiers: {}", func.modifiers.join(", "));
                }
                if !func.tags.is_empty() {
                    let _ = writeln!(out, "- tags: {}", func.tags.join(", "));
                }
                for sink in &func.sinks {
                    let _ = writeln!(
                        out,
                        "- sink [{}] at bytes {}..{}: `{}`",
                        sink.tags.join(", "),
                        sink.span.start,
                        sink.span.end,
                        sink.snippet
                    );
                }
                let _ = writeln!(out);
            }
        }
    }

    if !tree.warnings.is_empty() {
        let _ = writeln!(out, "## Warnings");
        let _ = writeln!(out);
        for warning in &tree.warnings {
            let _ = writeln!(out, "- {warning}");
        }
        let _ = writeln!(out);
    }

    out
}
