//! Configuration module for the outline generator
//!
//! This module provides the generator configuration and the ignore filtering
//! used when source directories are walked.

use crate::models::Language;
use crate::output::{HeadingScheme, OutputFormat};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Configuration for the outline generator
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory documents are written to
    pub output_dir: PathBuf,

    /// Output document format
    pub format: OutputFormat,

    /// Heading levels used by the Markdown renderer
    pub heading_scheme: HeadingScheme,

    /// Fail files whose declarations never close instead of truncating
    pub strict: bool,

    /// Custom ignore patterns for directory walks
    pub ignore_patterns: Vec<String>,

    /// Number of threads for parallel processing
    pub threads: usize,

    /// Maximum file size picked up from directory walks (bytes)
    pub max_file_size: usize,

    /// Whether to follow symlinks
    pub follow_symlinks: bool,

    /// Whether to include hidden files
    pub include_hidden: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
            format: OutputFormat::default(),
            heading_scheme: HeadingScheme::default(),
            strict: false,
            ignore_patterns: Vec::new(),
            threads: num_cpus(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

impl GenerateConfig {
    /// Create new config writing into `output_dir`
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Default::default()
        }
    }

    /// Set output format (builder pattern)
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set heading scheme (builder pattern)
    pub fn with_heading_scheme(mut self, scheme: HeadingScheme) -> Self {
        self.heading_scheme = scheme;
        self
    }

    /// Set strict mode (builder pattern)
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set ignore patterns (builder pattern)
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Set number of threads (builder pattern)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set max file size (builder pattern)
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set follow symlinks (builder pattern)
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set include hidden files (builder pattern)
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Check the configuration for values the generator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "output directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get number of available CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Paths skipped during directory walks unless a file is named explicitly
const DEFAULT_IGNORES: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/dist/**",
    "**/build/**",
    "**/out/**",
    "**/coverage/**",
    "**/.next/**",
    "**/.nuxt/**",
    "**/vendor/**",
    "**/*.min.js",
    "**/*.bundle.js",
    "**/*.d.ts",
];

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    /// Gitignore rules, keyed by the walked root
    gitignores: Vec<Gitignore>,

    /// Custom glob patterns
    custom_globs: GlobSet,

    /// Default ignore patterns
    default_ignores: GlobSet,

    /// Whether to include hidden files
    include_hidden: bool,
}

impl IgnoreFilter {
    /// Create a new ignore filter from config
    pub fn new(config: &GenerateConfig) -> Result<Self, ConfigError> {
        let custom_globs = Self::build_globset(&config.ignore_patterns)?;

        let default_patterns: Vec<String> = DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect();
        let default_ignores = Self::build_globset(&default_patterns)?;

        Ok(Self {
            gitignores: Vec::new(),
            custom_globs,
            default_ignores,
            include_hidden: config.include_hidden,
        })
    }

    /// Pick up the `.gitignore` at the root of a directory about to be walked
    pub fn add_root(&mut self, root: &Path) {
        if let Some(gitignore) = Self::build_gitignore(root) {
            self.gitignores.push(gitignore);
        }
    }

    /// Build gitignore from root directory
    fn build_gitignore(root: &Path) -> Option<Gitignore> {
        let gitignore_path = root.join(".gitignore");
        if !gitignore_path.exists() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&gitignore_path) {
            tracing::warn!(path = %gitignore_path.display(), "Skipping unreadable .gitignore: {}", err);
            return None;
        }

        builder.build().ok()
    }

    /// Build a globset from patterns
    fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob(e.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| ConfigError::InvalidGlob(e.to_string()))
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let path_str = path.to_string_lossy();

        // Check hidden files
        if !self.include_hidden {
            if let Some(name) = path.file_name() {
                let name = name.to_string_lossy();
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
            }
        }

        if self.default_ignores.is_match(&*path_str) {
            return true;
        }

        if self.custom_globs.is_match(&*path_str) {
            return true;
        }

        self.gitignores.iter().any(|gi| {
            path.starts_with(gi.path()) && gi.matched(path, is_dir).is_ignore()
        })
    }

    /// Language of a walked file, if it is one we outline
    pub fn language_of(&self, path: &Path) -> Option<Language> {
        let ext = path.extension()?;
        Language::from_extension(&ext.to_string_lossy())
    }
}
