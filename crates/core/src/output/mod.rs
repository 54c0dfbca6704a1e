//! Output formatting module
//!
//! This module renders a parsed file as a Markdown heading document, or
//! serializes it as JSON, YAML, or a plain-text outline.

mod json;
pub mod markdown;
mod summary;
mod yaml;

pub use json::format_json;
pub use markdown::{render_markdown, HeadingScheme};
pub use summary::format_summary;
pub use yaml::format_yaml;

use crate::models::FileDocument;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Markdown heading document
    #[default]
    Markdown,
    /// JSON declaration tree
    Json,
    /// YAML declaration tree
    Yaml,
    /// Plain text outline
    Summary,
}

impl OutputFormat {
    /// File extension for documents in this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Summary => "txt",
        }
    }
}

/// Format a file document in the specified format
pub fn format_document(
    document: &FileDocument,
    format: OutputFormat,
    scheme: HeadingScheme,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(&document.root, scheme)),
        OutputFormat::Json => format_json(document),
        OutputFormat::Yaml => format_yaml(document),
        OutputFormat::Summary => Ok(format_summary(document)),
    }
}
