//! Markdown heading document renderer
//!
//! One heading per declaration in pre-order, each followed by the
//! declaration's first leading comment verbatim (or an empty line).

use crate::models::Node;
use serde::{Deserialize, Serialize};

/// How heading levels are derived from tree depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingScheme {
    /// Every declaration gets a level-3 heading
    #[default]
    Flat,

    /// Level follows depth: classes and functions at 2, methods at 3
    Nested,
}

/// Deepest heading level Markdown supports
const MAX_LEVEL: usize = 6;

impl HeadingScheme {
    /// Heading level for a node at `depth` below the root (depth >= 1)
    pub fn level(&self, depth: usize) -> usize {
        match self {
            HeadingScheme::Flat => 3,
            HeadingScheme::Nested => (depth + 1).min(MAX_LEVEL),
        }
    }
}

/// Render the tree rooted at `root` as a heading document.
///
/// The first line is `# <root identifier>`; lines are joined with `\n` and
/// there is no trailing newline.
pub fn render_markdown(root: &Node, scheme: HeadingScheme) -> String {
    let mut lines = vec![format!("# {}", root.identifier)];

    for (depth, node) in root.walk().into_iter().skip(1) {
        lines.push(format!(
            "{} {}",
            "#".repeat(scheme.level(depth)),
            node.identifier
        ));
        lines.push(node.first_leading_comment().unwrap_or_default().to_string());
    }

    lines.join("\n")
}
