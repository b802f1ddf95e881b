//! rsdoc: generate markdown documentation pages from Rust doc comments.
//!
//! Supports two modes:
//!
//! - **directory mode**: `rsdoc src -o www/_docs/codebase -l www/_layouts/docs.html`
//!   writes one page per source file, an `index.md`, and splices the
//!   navigation fragment into the layout template.
//! - **stdin mode**: `rsdoc < src/main.rs` prints a single page to stdout.

mod collect;
mod model;
mod parser;
mod render;
mod site;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rsdoc",
    about = "Generate documentation pages from Rust doc comments"
)]
struct Cli {
    /// Source root (directory or single file). If omitted, reads from stdin.
    source: Option<PathBuf>,

    /// Output directory (required when a source root is given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Layout template whose navigation region is regenerated
    #[arg(short = 'l', long)]
    layout: Option<PathBuf>,

    /// Only files whose name ends with this suffix are documented
    #[arg(short = 's', long, default_value = ".rs")]
    suffix: String,

    /// Page format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// URL prefix for module links in the index and navigation
    #[arg(long, default_value = "/docs/codebase")]
    base_url: String,

    /// `id` of the layout element that holds the navigation
    #[arg(long, default_value = "codebase-nav")]
    nav_id: String,

    /// Project name shown in the index description
    #[arg(long)]
    project: Option<String>,

    /// Logical path of the stdin input, used for the page title and path
    #[arg(long, default_value = "lib.rs")]
    name: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Run configuration for [`directory_mode`].
struct Config<'a> {
    output_dir: &'a Path,
    layout: Option<&'a Path>,
    suffix: &'a str,
    format: &'a str,
    base_url: &'a str,
    nav_id: &'a str,
    project: Option<&'a str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(source) = cli.source.as_deref() else {
        return stdin_mode(&cli);
    };

    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when a source root is given")?;
    let config = Config {
        output_dir,
        layout: cli.layout.as_deref(),
        suffix: &cli.suffix,
        format: &cli.format,
        base_url: &cli.base_url,
        nav_id: &cli.nav_id,
        project: cli.project.as_deref(),
    };
    directory_mode(source, &config)
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// stdin mode: read one file from stdin, write its page to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let renderer = render::create_renderer(&cli.format)?;
    let module = model::ModulePath::from_relative(&cli.name);
    let doc = parser::extract(&input);
    print!("{}", renderer.render(&doc, &module));
    Ok(())
}

/// directory mode: one page per collected file, then the index and navigation.
fn directory_mode(source: &Path, config: &Config) -> Result<()> {
    let renderer = render::create_renderer(config.format)?;

    fs::create_dir_all(config.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let files = collect::collect_files(source, config.suffix)?;
    if files.is_empty() {
        warn!(
            "no files ending in {} under {}",
            config.suffix,
            source.display()
        );
    }

    let mut modules = Vec::with_capacity(files.len());
    for path in &files {
        let content = read_source(path)?;
        let module = model::ModulePath::new(source, path);
        let doc = parser::extract(&content);
        let written = render::write_page(config.output_dir, &module, &doc, renderer.as_ref())?;
        debug!(
            source = %module.relative,
            page = %written.display(),
            functions = doc.functions.len(),
            structs = doc.structs.len(),
            traits = doc.traits.len(),
            enums = doc.enums.len(),
            tests = doc.tests.len(),
            "rendered page"
        );
        modules.push(module);
    }

    let index = site::render_index(&modules, config.base_url, config.project);
    site::write_index(config.output_dir, &index)?;

    if let Some(layout) = config.layout {
        let nav = site::render_nav(&modules, config.base_url);
        match site::update_layout(layout, config.nav_id, &nav)? {
            site::LayoutUpdate::Written => info!(layout = %layout.display(), "navigation updated"),
            site::LayoutUpdate::Unchanged => debug!(layout = %layout.display(), "navigation unchanged"),
            site::LayoutUpdate::MarkerMissing => warn!(
                layout = %layout.display(),
                "no <div id=\"{}\"> region found; layout left unchanged",
                config.nav_id
            ),
        }
    }

    info!(
        pages = modules.len(),
        output = %config.output_dir.display(),
        "documentation generated"
    );
    Ok(())
}

/// Read a source file, replacing invalid UTF-8 sequences with U+FFFD.
fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => {
            warn!(file = %path.display(), "not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    })
}
