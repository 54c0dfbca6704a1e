//! mta_docoutline_core - Core library for outline documentation
//!
//! This crate extracts a lightweight outline from JavaScript/TypeScript
//! source files (top-level functions, classes and their methods, each with
//! the block comments written just before it) and renders it as a Markdown
//! heading document.
//!
//! # Features
//!
//! - **Single-pass scanner**: signature patterns plus balanced-brace body
//!   resolution. No tokenizer, so it works on partial or broken files.
//! - **Never fails**: malformed input yields fewer declarations; a body that
//!   never closes is reported as a diagnostic.
//! - **Multiple Output Formats**: Markdown, JSON, YAML and a plain-text
//!   outline.
//! - **Batch generation**: files and directories, processed in parallel.
//!
//! # Example
//!
//! ```rust
//! use mta_docoutline_core::{parse, render_markdown, HeadingScheme};
//!
//! let source = "/* Greets */\nfunction hello(name) {\n  return name;\n}";
//! let root = parse(source, "hello.js");
//!
//! assert_eq!(
//!     render_markdown(&root, HeadingScheme::Flat),
//!     "# hello.js\n### hello\n/* Greets */"
//! );
//! ```

pub mod config;
pub mod engine;
pub mod models;
pub mod output;
pub mod parser;

// Re-exports for convenience
pub use config::{ConfigError, GenerateConfig};
pub use engine::{DocGenerator, GenerateError};
pub use models::{
    Diagnostic, DiagnosticKind, DocumentOutcome, FileDocument, GenerationReport,
    GenerationStats, Language, Node, NodeKind, ParseReport,
};
pub use output::{format_document, render_markdown, FormatError, HeadingScheme, OutputFormat};
pub use parser::{parse, parse_report, parse_strict, ParserError};
