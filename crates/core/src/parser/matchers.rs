//! Top-level declaration matchers
//!
//! Each matcher looks for the first occurrence of its signature at or after
//! the cursor and turns it into a node: the span runs from the keyword to
//! one past the closing brace of the body, and leading comments are the
//! block comments between the cursor and the keyword. A signature written
//! inside a block comment is not a declaration.

use crate::models::{Diagnostic, Node, NodeKind};
use crate::parser::closure::resolve_closure;
use crate::parser::comments::{block_comment_spans, enclosing_comment, extract_block_comments};
use crate::parser::methods::scan_methods;
use crate::parser::slice;
use once_cell::sync::Lazy;
use regex::Regex;

/// `function name(` with any whitespace between the parts
static FUNCTION_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfunction\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\(")
        .expect("function signature pattern is valid")
});

/// `class Name {` with any whitespace between the parts
static CLASS_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bclass\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\{")
        .expect("class signature pattern is valid")
});

/// Result of a successful signature match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Signature and balanced body
    Found(Node),

    /// Signature whose body never closes
    Unbalanced(Diagnostic),
}

impl MatchOutcome {
    /// Absolute offset of the matched signature
    pub fn signature_start(&self) -> usize {
        match self {
            MatchOutcome::Found(node) => node.start,
            MatchOutcome::Unbalanced(diagnostic) => diagnostic.offset,
        }
    }
}

/// Match the next `function` declaration in `text[cursor..]`
pub fn match_function(text: &str, cursor: usize) -> Option<MatchOutcome> {
    match_declaration(&FUNCTION_SIGNATURE, NodeKind::Function, text, cursor)
}

/// Match the next `class` declaration in `text[cursor..]`, methods included
pub fn match_class(text: &str, cursor: usize) -> Option<MatchOutcome> {
    match_declaration(&CLASS_SIGNATURE, NodeKind::Class, text, cursor)
}

fn match_declaration(
    pattern: &Regex,
    kind: NodeKind,
    text: &str,
    cursor: usize,
) -> Option<MatchOutcome> {
    let remaining = text.get(cursor..)?;
    let comments = block_comment_spans(remaining);

    let mut search_from = 0;
    let captures = loop {
        let captures = pattern.captures_at(remaining, search_from)?;
        let start = captures.get(0)?.start();
        match enclosing_comment(&comments, start) {
            Some(comment) => search_from = comment.end,
            None => break captures,
        }
    };
    let signature = captures.get(0)?;
    let name = captures.name("name")?.as_str();

    let signature_start = cursor + signature.start();

    let Some(closure) = resolve_closure(text, signature_start) else {
        return Some(MatchOutcome::Unbalanced(Diagnostic::unbalanced(
            name,
            signature_start,
        )));
    };

    let end = closure.end();
    let children = match kind {
        NodeKind::Class => scan_methods(text, closure),
        _ => Vec::new(),
    };

    Some(MatchOutcome::Found(Node {
        kind,
        identifier: name.to_string(),
        raw: slice(text, signature_start..end).to_string(),
        start: signature_start,
        end,
        children,
        leading_comments: extract_block_comments(slice(text, cursor..signature_start)),
    }))
}
