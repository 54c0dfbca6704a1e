//! Plain-text outline with line ranges

use crate::models::{FileDocument, Node};
use ropey::Rope;

/// Format a file document as an indented outline.
///
/// Line numbers are 1-indexed and inclusive, computed from the root's raw
/// text.
pub fn format_summary(document: &FileDocument) -> String {
    let rope = Rope::from_str(&document.root.raw);
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", document.path.display()));
    if let Some(language) = document.language {
        output.push_str(&format!("Language: {}\n", language.display_name()));
    }
    output.push_str(&format!("Lines: {}\n", document.total_lines));
    output.push_str(&format!("Declarations: {}\n", document.total_declarations()));

    if document.has_diagnostics() {
        output.push_str(&format!("Diagnostics: {}\n", document.diagnostics.len()));
        for diagnostic in &document.diagnostics {
            output.push_str(&format!(
                "  line {}: {}\n",
                line_of(&rope, diagnostic.offset),
                diagnostic.message()
            ));
        }
    }

    output.push_str("\nOutline:\n");
    for (depth, node) in document.root.walk().into_iter().skip(1) {
        output.push_str(&format_node_summary(&rope, node, depth - 1));
    }

    output
}

fn format_node_summary(rope: &Rope, node: &Node, indent: usize) -> String {
    let last_byte = node.end.saturating_sub(1).max(node.start);
    let mut line = format!(
        "{}{} {} ({}:{})",
        "  ".repeat(indent),
        node.kind.label(),
        node.identifier,
        line_of(rope, node.start),
        line_of(rope, last_byte)
    );

    if let Some(comment) = node.first_leading_comment() {
        line.push_str(&format!(" - {}", first_comment_line(comment)));
    }

    line.push('\n');
    line
}

/// 1-indexed line containing byte `offset`
fn line_of(rope: &Rope, offset: usize) -> usize {
    rope.byte_to_line(offset.min(rope.len_bytes())) + 1
}

/// First line of a block comment with delimiters and decoration stripped
fn first_comment_line(comment: &str) -> &str {
    comment
        .trim_start_matches("/*")
        .trim_end_matches("*/")
        .lines()
        .map(|l| l.trim().trim_start_matches('*').trim())
        .find(|l| !l.is_empty())
        .unwrap_or_default()
}
