//! Outline parser
//!
//! A single forward pass over the source text: at each cursor position both
//! declaration matchers are asked for their next signature, the earliest one
//! wins (functions win ties), and the cursor jumps past the winner's body.
//! Scanning ends when nothing matches or a body never closes.
//!
//! This is pattern matching over raw text, not a tokenizer. Braces inside
//! strings, template literals or comments are counted like any other brace.

mod closure;
mod comments;
mod matchers;
mod methods;

pub use closure::{resolve_closure, Closure};
pub use comments::extract_block_comments;
pub use matchers::{match_class, match_function, MatchOutcome};
pub use methods::scan_methods;

use crate::models::{Diagnostic, Node, ParseReport};
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};

/// Parser errors
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Unbalanced input in {label}: {}", join_messages(.diagnostics))]
    Unbalanced {
        label: String,
        diagnostics: Vec<Diagnostic>,
    },
}

fn join_messages(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse `text` into a declaration tree rooted at a `Program` node whose
/// identifier is `file_label`.
///
/// Never fails: malformed input just yields fewer declarations.
pub fn parse(text: &str, file_label: &str) -> Node {
    parse_report(text, file_label).root
}

/// Parse `text` and also report where scanning was cut short
pub fn parse_report(text: &str, file_label: &str) -> ParseReport {
    let mut cursor = 0;
    let mut children = Vec::new();
    let mut diagnostics = Vec::new();

    while cursor + 1 < text.len() {
        let Some(outcome) = earliest(match_function(text, cursor), match_class(text, cursor))
        else {
            break;
        };

        match outcome {
            MatchOutcome::Found(node) => {
                debug!(
                    kind = node.kind.label(),
                    identifier = %node.identifier,
                    start = node.start,
                    end = node.end,
                    methods = node.children.len(),
                    "Accepted declaration"
                );
                cursor = node.end;
                children.push(node);
            }
            MatchOutcome::Unbalanced(diagnostic) => {
                warn!(file = file_label, "{}", diagnostic.message());
                diagnostics.push(diagnostic);
                break;
            }
        }
    }

    ParseReport {
        root: Node::program(file_label, text, children),
        diagnostics,
    }
}

/// Parse `text`, failing instead of truncating when a body never closes
pub fn parse_strict(text: &str, file_label: &str) -> Result<Node, ParserError> {
    let report = parse_report(text, file_label);
    if report.is_clean() {
        Ok(report.root)
    } else {
        Err(ParserError::Unbalanced {
            label: file_label.to_string(),
            diagnostics: report.diagnostics,
        })
    }
}

/// Pick the candidate whose signature starts first; functions win ties
fn earliest(function: Option<MatchOutcome>, class: Option<MatchOutcome>) -> Option<MatchOutcome> {
    match (function, class) {
        (Some(function), Some(class)) => {
            if class.signature_start() < function.signature_start() {
                Some(class)
            } else {
                Some(function)
            }
        }
        (function, class) => function.or(class),
    }
}

/// Bounds-checked slice; offsets always come from matches, so the empty
/// fallback is never expected to be hit.
pub(crate) fn slice(text: &str, range: Range<usize>) -> &str {
    text.get(range).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn assert_spans_consistent(text: &str, node: &Node) {
        for child in &node.children {
            assert!(child.start < child.end, "empty span for {}", child.identifier);
            assert!(child.end <= text.len());
            assert_eq!(child.raw, &text[child.start..child.end]);
            assert_spans_consistent(text, child);
        }
        for pair in node.children.windows(2) {
            assert!(pair[0].end <= pair[1].start, "siblings overlap");
        }
    }

    #[test]
    fn test_parse_empty_file() {
        let root = parse("", "sample.ts");

        assert_eq!(root.kind, NodeKind::Program);
        assert_eq!(root.identifier, "sample.ts");
        assert!(root.children.is_empty());
        assert_eq!(root.span(), (0, 0));
    }

    #[test]
    fn test_root_covers_whole_text() {
        for text in ["x", "function", "}}}{", "/* only a comment */", "class A {"] {
            let root = parse(text, "");
            assert_eq!(root.kind, NodeKind::Program);
            assert_eq!(root.start, 0);
            assert_eq!(root.end, text.len());
            assert_eq!(root.raw, text);
            assert!(root.leading_comments.is_empty());
        }
    }

    #[test]
    fn test_class_with_commented_method() {
        let text = "/* Leading Comment */\nclass MyClass {\n    /* Method Leading Comment */\n    method() {}\n}";
        let root = parse(text, "sample.ts");

        assert_eq!(root.children.len(), 1);
        let class = &root.children[0];
        assert_eq!(class.kind, NodeKind::Class);
        assert_eq!(class.identifier, "MyClass");
        assert_eq!(class.leading_comments, vec!["/* Leading Comment */"]);

        assert_eq!(class.children.len(), 1);
        let method = &class.children[0];
        assert_eq!(method.kind, NodeKind::Method);
        assert_eq!(method.identifier, "method");
        assert_eq!(method.leading_comments, vec!["/* Method Leading Comment */"]);

        assert_spans_consistent(text, &root);
    }

    #[test]
    fn test_class_leading_comments_both_kept() {
        let comments = ["/*\n    * This is a leading comment.\n    */", "/* This is another leading comments. */"];
        let text = format!("{}\n    class MyClass {{\n        // Logic.\n    }}", comments.concat());
        let root = parse(&text, "");

        let class = &root.children[0];
        assert_eq!(class.kind, NodeKind::Class);
        assert_eq!(class.leading_comments, comments);
    }

    #[test]
    fn test_uncommented_and_commented_methods() {
        let text = "class MyClass {\n    myMethod() {\n        // wo.\n    }\n\n    /*\n    * Comment\n    */\n    myCommentedMethod() {\n        // wo.\n    }\n}";
        let root = parse(text, "");
        let class = &root.children[0];

        assert_eq!(class.children.len(), 2);
        assert!(class.children[0].leading_comments.is_empty());
        assert_eq!(class.children[1].leading_comments, vec!["/*\n    * Comment\n    */"]);
    }

    #[test]
    fn test_nested_method_shape_is_suppressed() {
        let text = "class A {\n  outer() {\n    inner() {\n    }\n  }\n}";
        let root = parse(text, "");

        let names: Vec<&str> = root.children[0]
            .children
            .iter()
            .map(|m| m.identifier.as_str())
            .collect();
        assert_eq!(names, vec!["outer"]);
    }

    #[test]
    fn test_mixed_top_level_in_source_order() {
        let text = "\
/* A class */
class First {
  run() {}
}

/* A helper */
function helper(x) {
  function nested() {}
  return x;
}

class Second {
}
";
        let root = parse(text, "mixed.js");

        let top: Vec<(NodeKind, &str)> = root
            .children
            .iter()
            .map(|n| (n.kind, n.identifier.as_str()))
            .collect();
        assert_eq!(
            top,
            vec![
                (NodeKind::Class, "First"),
                (NodeKind::Function, "helper"),
                (NodeKind::Class, "Second"),
            ]
        );
        assert_eq!(root.children[1].leading_comments, vec!["/* A helper */"]);
        assert!(root.children[2].leading_comments.is_empty());
        assert_spans_consistent(text, &root);
    }

    #[test]
    fn test_declarations_named_in_comments_are_ignored() {
        let text = "\
/* Replaces function legacy() */
function modern() {}

/**
 * Wraps class Old {} for callers.
 */
class Adapter {
  /* Must call init() first */
  run() {}
}
";
        let root = parse(text, "docs.js");

        let top: Vec<(NodeKind, &str)> = root
            .children
            .iter()
            .map(|n| (n.kind, n.identifier.as_str()))
            .collect();
        assert_eq!(
            top,
            vec![(NodeKind::Function, "modern"), (NodeKind::Class, "Adapter")]
        );
        assert_eq!(
            root.children[0].leading_comments,
            vec!["/* Replaces function legacy() */"]
        );
        assert_eq!(
            root.children[1].leading_comments,
            vec!["/**\n * Wraps class Old {} for callers.\n */"]
        );

        let run = &root.children[1].children;
        assert_eq!(run.len(), 1);
        assert_eq!(run[0].identifier, "run");
        assert_eq!(run[0].leading_comments, vec!["/* Must call init() first */"]);
        assert_spans_consistent(text, &root);
    }

    #[test]
    fn test_earlier_class_wins_over_later_function() {
        let text = "class Box {\n  open() {}\n}\nfunction after() {}";
        let root = parse(text, "");

        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].identifier, "Box");
        assert_eq!(root.children[1].identifier, "after");
    }

    #[test]
    fn test_function_wins_identical_start() {
        let function = Some(MatchOutcome::Unbalanced(Diagnostic::unbalanced("f", 4)));
        let class = Some(MatchOutcome::Unbalanced(Diagnostic::unbalanced("C", 4)));

        let winner = earliest(function, class).unwrap();
        match winner {
            MatchOutcome::Unbalanced(d) => assert_eq!(d.identifier, "f"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_body_stops_scanning() {
        let text = "function ok() {}\nfunction broken() {\n  if (x) {\n}\nfunction lost() {}";
        let report = parse_report(text, "broken.js");

        let names: Vec<&str> = report
            .root
            .children
            .iter()
            .map(|n| n.identifier.as_str())
            .collect();
        assert_eq!(names, vec!["ok"]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].identifier, "broken");
        assert_eq!(report.diagnostics[0].offset, 17);
    }

    #[test]
    fn test_parse_strict() {
        assert!(parse_strict("function ok() {}", "ok.js").is_ok());

        let err = parse_strict("class Open {", "open.js").unwrap_err();
        let ParserError::Unbalanced { label, diagnostics } = &err;
        assert_eq!(label, "open.js");
        assert_eq!(diagnostics.len(), 1);
        assert!(err.to_string().contains("Open"));
    }

    #[test]
    fn test_non_ascii_text() {
        let text = "/* café ☕ */\nfunction brew() { return \"é\"; }\nclass Tasse { füllen() {} }";
        let root = parse(text, "");

        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].leading_comments, vec!["/* café ☕ */"]);
        assert_spans_consistent(text, &root);
    }

    #[test]
    fn test_arbitrary_garbage_never_panics() {
        let inputs = [
            "{",
            "}",
            "function",
            "function f(",
            "class C",
            "class C {",
            "/*",
            "*/ function f() {}",
            "function f() }{",
            "\u{0}\u{1}{}}}{{",
        ];
        for text in inputs {
            let root = parse(text, "");
            assert_spans_consistent(text, &root);
        }
    }
}
