//! Outline generator engine
//!
//! This module resolves input paths into source files, parses them (in
//! parallel when configured) and writes one document per source file into
//! the output directory.

use crate::config::{GenerateConfig, IgnoreFilter};
use crate::models::{
    DocumentOutcome, FileDocument, GenerationMetadata, GenerationReport, GenerationStats,
    Language,
};
use crate::output::{format_document, FormatError};
use crate::parser::{parse_report, ParserError};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Generator errors
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Format error: {0}")]
    FormatError(#[from] FormatError),

    #[error("Parser error: {0}")]
    ParserError(#[from] ParserError),

    #[error("Input does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// Main outline documentation generator
pub struct DocGenerator {
    config: GenerateConfig,
}

impl DocGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: GenerateConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        // Surface bad ignore globs before any work starts
        IgnoreFilter::new(&config)?;
        Ok(Self { config })
    }

    /// Resolve inputs into the list of source files to process.
    ///
    /// Files are taken as given whatever their extension. Directories are
    /// walked recursively, keeping files with a known extension that are not
    /// ignored and not larger than the configured maximum.
    pub fn collect_sources(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>, GenerateError> {
        let mut filter = IgnoreFilter::new(&self.config)?;
        let mut sources = Vec::new();

        for input in inputs {
            if input.is_file() {
                sources.push(input.clone());
            } else if input.is_dir() {
                filter.add_root(input);
                let found = self.walk_directory(input, &filter);
                debug!(root = %input.display(), files = found.len(), "Walked directory");
                sources.extend(found);
            } else {
                return Err(GenerateError::MissingInput(input.clone()));
            }
        }

        Ok(sources)
    }

    /// Find source files below `root`
    fn walk_directory(&self, root: &Path, filter: &IgnoreFilter) -> Vec<PathBuf> {
        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // The root itself was named explicitly
                if e.depth() == 0 {
                    return true;
                }
                if e.file_type().is_dir() {
                    return !filter.should_ignore(e.path(), true);
                }
                true
            });

        let mut files = Vec::new();
        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();

            if filter.should_ignore(path, false) || filter.language_of(path).is_none() {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() as usize > self.config.max_file_size {
                    debug!(path = %path.display(), size = metadata.len(), "Skipping large file");
                    continue;
                }
            }

            files.push(path.to_path_buf());
        }

        files
    }

    /// Parse a single source file and render it in the configured format
    pub fn render_file(&self, path: &Path) -> Result<(FileDocument, String), GenerateError> {
        let bytes = fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes);
        let label = file_label(path);

        let report = parse_report(&source, &label);
        if self.config.strict && !report.is_clean() {
            return Err(ParserError::Unbalanced {
                label,
                diagnostics: report.diagnostics,
            }
            .into());
        }

        let document = FileDocument {
            path: path.to_path_buf(),
            label,
            language: path
                .extension()
                .and_then(|ext| Language::from_extension(&ext.to_string_lossy())),
            total_lines: source.lines().count(),
            root: report.root,
            diagnostics: report.diagnostics,
        };

        let rendered = format_document(&document, self.config.format, self.config.heading_scheme)?;
        Ok((document, rendered))
    }

    /// Where the document for `source` is written
    pub fn output_path(&self, source: &Path) -> PathBuf {
        self.config.output_dir.join(format!(
            "{}.{}",
            file_label(source),
            self.config.format.extension()
        ))
    }

    /// Render every input and write the documents into the output directory.
    ///
    /// Per-file failures are recorded in the report and do not stop the run.
    pub fn generate(&self, inputs: &[PathBuf]) -> Result<GenerationReport, GenerateError> {
        let start = Instant::now();

        let sources = self.collect_sources(inputs)?;
        info!("Processing {} files...", sources.len());

        fs::create_dir_all(&self.config.output_dir)?;
        self.warn_on_collisions(&sources);

        let documents = self.run(&sources, |path| self.generate_one(path))?;

        let stats = GenerationStats::from_outcomes(&documents);
        let metadata = GenerationMetadata {
            duration_ms: start.elapsed().as_millis() as u64,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        info!(
            written = stats.written,
            failed = stats.failed,
            declarations = stats.total_declarations,
            "Generation finished in {}ms",
            metadata.duration_ms
        );

        Ok(GenerationReport {
            output_dir: self.config.output_dir.clone(),
            documents,
            stats,
            metadata,
        })
    }

    /// Render every input and concatenate the documents, separated by a
    /// blank line. Fails on the first file that cannot be rendered.
    pub fn render_to_string(&self, inputs: &[PathBuf]) -> Result<String, GenerateError> {
        let sources = self.collect_sources(inputs)?;

        let rendered = self
            .run(&sources, |path| self.render_file(path).map(|(_, text)| text))?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rendered.join("\n\n"))
    }

    /// Render and write one file, capturing any failure in the outcome
    fn generate_one(&self, path: &Path) -> DocumentOutcome {
        info!("Processing {}", path.display());

        let mut outcome = DocumentOutcome {
            source: path.to_path_buf(),
            output: None,
            declarations: 0,
            diagnostics: 0,
            error: None,
        };

        let result = self.render_file(path).and_then(|(document, rendered)| {
            outcome.declarations = document.total_declarations();
            outcome.diagnostics = document.diagnostics.len();

            let target = self.output_path(path);
            fs::write(&target, rendered)?;
            Ok(target)
        });

        match result {
            Ok(target) => {
                info!("Wrote {}", target.display());
                outcome.output = Some(target);
            }
            Err(err) => {
                error!("Failed to process {}: {}", path.display(), err);
                outcome.error = Some(err.to_string());
            }
        }

        outcome
    }

    /// Apply `f` to every source, in parallel unless a single thread is
    /// configured. Results keep the order of `sources`.
    fn run<T, F>(&self, sources: &[PathBuf], f: F) -> Result<Vec<T>, GenerateError>
    where
        T: Send,
        F: Fn(&Path) -> T + Sync + Send,
    {
        if self.config.threads == 1 {
            return Ok(sources.iter().map(|path| f(path.as_path())).collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| GenerateError::ThreadPoolError(e.to_string()))?;

        Ok(pool.install(|| sources.par_iter().map(|path| f(path.as_path())).collect()))
    }

    /// Documents are named after the source file name, so two sources with
    /// the same name overwrite each other.
    fn warn_on_collisions(&self, sources: &[PathBuf]) {
        let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
        for source in sources {
            let target = self.output_path(source);
            if let Some(previous) = seen.insert(target.clone(), source.as_path()) {
                warn!(
                    "{} and {} both write {}",
                    previous.display(),
                    source.display(),
                    target.display()
                );
            }
        }
    }
}

/// Label used for the document title and output name: the file name
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
