//! Method scanning inside class bodies

use crate::models::{Node, NodeKind};
use crate::parser::closure::{resolve_closure, Closure};
use crate::parser::comments::{block_comment_spans, enclosing_comment, extract_block_comments};
use crate::parser::slice;
use once_cell::sync::Lazy;
use regex::Regex;

/// Any `name(...)` shape. Intentionally loose: `if(x)` or a call expression
/// in a field initializer match too. Parameters may contain one level of
/// parentheses (`run(cb = noop())`); deeper nesting makes an inner call the
/// candidate instead.
static METHOD_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<name>[A-Za-z_][A-Za-z0-9_]*)\((?:[^()]|\([^()]*\))*\)")
        .expect("method signature pattern is valid")
});

/// Collect the methods declared in the class body `body` of `text`.
///
/// Candidates are visited left to right. Signatures inside block comments
/// are ignored. A candidate starting before the end of the last accepted
/// method lies inside that method's body and is skipped, as is one with no
/// balanced body within the class.
pub fn scan_methods(text: &str, body: Closure) -> Vec<Node> {
    let interior = body.interior();
    let Some(body_text) = text.get(interior.clone()) else {
        return Vec::new();
    };
    let comments = block_comment_spans(body_text);

    let mut methods = Vec::new();
    // Both relative to `body_text`
    let mut last_end = 0;
    let mut search_from = 0;

    while let Some(captures) = METHOD_SIGNATURE.captures_at(body_text, search_from) {
        let (Some(signature), Some(name)) = (captures.get(0), captures.name("name")) else {
            break;
        };

        if let Some(comment) = enclosing_comment(&comments, signature.start()) {
            search_from = comment.end;
            continue;
        }
        search_from = signature.end();

        if signature.start() < last_end {
            continue;
        }

        let Some(closure) = resolve_closure(body_text, signature.start()) else {
            continue;
        };

        let start = interior.start + signature.start();
        let end = interior.start + closure.end();
        methods.push(Node {
            kind: NodeKind::Method,
            identifier: name.as_str().to_string(),
            raw: slice(text, start..end).to_string(),
            start,
            end,
            children: Vec::new(),
            leading_comments: extract_block_comments(slice(body_text, last_end..signature.start())),
        });
        last_end = closure.end();
        search_from = search_from.max(last_end);
    }

    methods
}
