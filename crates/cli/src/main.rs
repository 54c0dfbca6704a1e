//! mta-docoutline CLI
//!
//! Renders outline documentation (functions, classes, methods and their
//! leading comments) for JavaScript and TypeScript source files.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mta_docoutline_core::{
    DocGenerator, GenerateConfig, GenerationReport, HeadingScheme, OutputFormat,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Outline documentation generator for JavaScript and TypeScript
#[derive(Parser)]
#[command(name = "mta-docoutline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Outline documentation for JavaScript/TypeScript - declarations and their leading comments")]
#[command(long_about = r#"
mta-docoutline: Outline Documentation Generator

Finds top-level functions, classes and class methods in each source file,
together with the /* block comments */ written right before them, and writes
one heading document per file.

Directories are walked recursively for:
  - JavaScript (.js, .mjs, .cjs, .jsx)
  - TypeScript (.ts, .mts, .cts, .tsx)
Files named explicitly are processed whatever their extension.

Output formats:
  - markdown (default) - one heading per declaration
  - json / yaml        - the full declaration tree
  - summary            - indented outline with line ranges

Examples:
  mta-docoutline src/index.ts                 # Writes docs/index.ts.md
  mta-docoutline -o api src/                  # Every source under src/
  mta-docoutline --headings nested app.js     # Heading level follows nesting
  mta-docoutline --stdout -f summary app.js   # Print instead of writing
"#)]
pub struct Args {
    /// Source files or directories
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long = "out", default_value = "docs")]
    pub out: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Markdown)]
    pub format: OutputFormatArg,

    /// Heading levels for Markdown output
    #[arg(long, value_enum, default_value_t = HeadingSchemeArg::Flat)]
    pub headings: HeadingSchemeArg,

    /// Print documents to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Fail files whose declaration bodies never close
    #[arg(long)]
    pub strict: bool,

    /// Ignore patterns for directory walks (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Include hidden files when walking directories
    #[arg(long)]
    pub hidden: bool,

    /// Follow symlinks when walking directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip walked files larger than this many bytes
    #[arg(long)]
    pub max_file_size: Option<usize>,

    /// Number of threads for parallel processing (default: auto)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Markdown,
    Json,
    Yaml,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Markdown => OutputFormat::Markdown,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

/// Heading scheme argument
#[derive(ValueEnum, Clone, Debug)]
pub enum HeadingSchemeArg {
    Flat,
    Nested,
}

impl From<HeadingSchemeArg> for HeadingScheme {
    fn from(arg: HeadingSchemeArg) -> Self {
        match arg {
            HeadingSchemeArg::Flat => HeadingScheme::Flat,
            HeadingSchemeArg::Nested => HeadingScheme::Nested,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let generator = DocGenerator::new(build_config(&args)).context("Invalid configuration")?;

    if args.stdout {
        let output = generator
            .render_to_string(&args.sources)
            .context("Failed to render documents")?;
        println!("{}", output);
        return Ok(());
    }

    run_generate(&generator, &args)
}

/// Logs go to stderr; RUST_LOG overrides the -v level
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build generator configuration from args
fn build_config(args: &Args) -> GenerateConfig {
    let mut config = GenerateConfig::new(args.out.clone())
        .with_format(args.format.clone().into())
        .with_heading_scheme(args.headings.clone().into())
        .with_strict(args.strict)
        .with_ignore_patterns(args.ignore.clone())
        .with_include_hidden(args.hidden)
        .with_follow_symlinks(args.follow_symlinks);

    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    if let Some(size) = args.max_file_size {
        config = config.with_max_file_size(size);
    }

    config
}

fn run_generate(generator: &DocGenerator, args: &Args) -> Result<()> {
    // Show progress spinner
    let spinner = if args.verbose > 0 && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Generating documentation...");
        Some(pb)
    } else {
        None
    };

    let report = generator
        .generate(&args.sources)
        .context("Failed to generate documentation")?;

    info!(
        written = report.stats.written,
        failed = report.stats.failed,
        declarations = report.stats.total_declarations,
        duration_ms = report.metadata.duration_ms,
        "Generation finished"
    );

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Wrote {} documents to {} in {}ms",
            report.stats.written,
            report.output_dir.display(),
            report.metadata.duration_ms
        ));
    }

    check_failures(&report)
}

fn check_failures(report: &GenerationReport) -> Result<()> {
    if !report.has_failures() {
        return Ok(());
    }

    for outcome in report.documents.iter().filter(|o| o.is_failure()) {
        eprintln!(
            "{}: {}",
            outcome.source.display(),
            outcome.error.as_deref().unwrap_or_default()
        );
    }

    anyhow::bail!(
        "{} of {} files failed",
        report.stats.failed,
        report.stats.total_files
    )
}
