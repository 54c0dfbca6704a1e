//! Data models for outline extraction
//!
//! This module defines the declaration tree produced by the parser, the
//! diagnostics it can report, and the per-file and per-run structures
//! consumed by the output formatters and the generator engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source languages picked up when walking directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    JavaScript,
    TypeScript,
}

impl Language {
    /// Determine language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Some(Language::TypeScript),
            _ => None,
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }
}

/// Kinds of nodes in the declaration tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Program,
    Function,
    Class,
    Method,
}

impl NodeKind {
    /// Get human-readable label for the node kind
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::Function => "function",
            NodeKind::Class => "class",
            NodeKind::Method => "method",
        }
    }
}

/// A declaration, or the root of a parsed file.
///
/// `start..end` is a half-open byte range into the parsed text and `raw` is
/// exactly that slice. For the root the range covers the whole text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Kind of declaration
    pub kind: NodeKind,

    /// Declared name (file label for the root)
    pub identifier: String,

    /// Source text spanned by the node
    pub raw: String,

    /// Starting byte offset (inclusive)
    pub start: usize,

    /// Ending byte offset (exclusive)
    pub end: usize,

    /// Child declarations in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Block comments preceding the signature, delimiters included
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading_comments: Vec<String>,
}

impl Node {
    /// Create the root node for a parsed text
    pub fn program(label: &str, text: &str, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Program,
            identifier: label.to_string(),
            raw: text.to_string(),
            start: 0,
            end: text.len(),
            children,
            leading_comments: Vec::new(),
        }
    }

    /// Byte span as a tuple
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// The comment shown under the node's heading, if any
    pub fn first_leading_comment(&self) -> Option<&str> {
        self.leading_comments.first().map(String::as_str)
    }

    /// Count total nodes in this subtree, self included
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_nodes()).sum::<usize>()
    }

    /// Pre-order walk of the subtree paired with each node's depth (self = 0).
    ///
    /// Uses an explicit stack, so arbitrarily deep trees cannot overflow.
    pub fn walk(&self) -> Vec<(usize, &Node)> {
        let mut visited = Vec::with_capacity(self.total_nodes());
        let mut stack = vec![(0, self)];

        while let Some((depth, node)) = stack.pop() {
            visited.push((depth, node));
            // Reverse so the first child is popped first
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }

        visited
    }
}

/// Kinds of problems the parser can report without failing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A declaration body never closed; scanning stopped at its signature
    UnbalancedClosure,
}

/// A non-fatal parse diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Name of the declaration the diagnostic is attached to
    pub identifier: String,

    /// Byte offset of the declaration signature
    pub offset: usize,
}

impl Diagnostic {
    pub fn unbalanced(identifier: &str, offset: usize) -> Self {
        Self {
            kind: DiagnosticKind::UnbalancedClosure,
            identifier: identifier.to_string(),
            offset,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        match self.kind {
            DiagnosticKind::UnbalancedClosure => format!(
                "body of `{}` at byte {} never closes; later declarations were skipped",
                self.identifier, self.offset
            ),
        }
    }
}

/// Parse result together with its diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    pub root: Node,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Outline of one source file, as handed to the output formatters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDocument {
    /// Path to the source file
    pub path: PathBuf,

    /// Label used for the document title
    pub label: String,

    /// Language detected from the extension, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Total number of lines in the file
    pub total_lines: usize,

    /// Declaration tree
    pub root: Node,

    /// Parse diagnostics (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl FileDocument {
    /// Count declarations (root excluded)
    pub fn total_declarations(&self) -> usize {
        self.root.total_nodes() - 1
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// What happened to a single input file during generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// Input source path
    pub source: PathBuf,

    /// Output path written (absent when printing or on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Number of declarations found
    pub declarations: usize,

    /// Number of diagnostics reported by the parser
    pub diagnostics: usize,

    /// Error message if the file could not be processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentOutcome {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Summary statistics for a generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Total input files processed
    pub total_files: usize,

    /// Documents successfully produced
    pub written: usize,

    /// Files that failed
    pub failed: usize,

    /// Total declarations across all files
    pub total_declarations: usize,

    /// Files with parse diagnostics
    pub files_with_diagnostics: usize,
}

impl GenerationStats {
    pub fn from_outcomes(outcomes: &[DocumentOutcome]) -> Self {
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        Self {
            total_files: outcomes.len(),
            written: outcomes.len() - failed,
            failed,
            total_declarations: outcomes.iter().map(|o| o.declarations).sum(),
            files_with_diagnostics: outcomes.iter().filter(|o| o.diagnostics > 0).count(),
        }
    }
}

/// Metadata about the generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Duration of the run in milliseconds
    pub duration_ms: u64,

    /// ISO timestamp of the run
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

/// Result of a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Directory documents were written to
    pub output_dir: PathBuf,

    /// Per-file outcomes, in input order
    pub documents: Vec<DocumentOutcome>,

    pub stats: GenerationStats,

    pub metadata: GenerationMetadata,
}

impl GenerationReport {
    pub fn has_failures(&self) -> bool {
        self.stats.failed > 0
    }
}
