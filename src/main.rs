//! paradocs: generate cross-linked Markdown API reference pages from
//! Doxygen XML.
//!
//! - **build**: `paradocs [paradocs.xml] [-o docs]` writes `index.md` and one
//!   page per class
//! - **test**: `paradocs --test` prints the pages to stdout instead

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use paradocs::{OnError, Project, Site};

/// Printed between pages in `--test` mode.
const TEST_SEPARATOR: &str = "---------------------------";

#[derive(Parser)]
#[command(
    name = "paradocs",
    version,
    about = "Generate cross-linked Markdown API reference pages from Doxygen XML"
)]
struct Cli {
    /// Project file
    #[arg(default_value = "paradocs.xml")]
    project: PathBuf,

    /// Print every page to stdout instead of writing files
    #[arg(long)]
    test: bool,

    /// Skip malformed class documents instead of stopping the build
    #[arg(long)]
    skip_invalid: bool,

    /// Output directory (overrides the project's outdir)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let project = Project::load(&cli.project)
        .with_context(|| format!("failed to load project {}", cli.project.display()))?;
    let on_error = if cli.skip_invalid {
        OnError::Skip
    } else {
        OnError::Abort
    };
    let site = Site::load(&project, on_error).context("failed to load class documents")?;

    if cli.test {
        test_mode(&site);
        return Ok(());
    }

    let outdir = cli.output.as_deref().unwrap_or(&project.outdir);
    let pages = site
        .write(outdir)
        .with_context(|| format!("failed to write pages to {}", outdir.display()))?;
    tracing::info!(pages = pages.len(), outdir = %outdir.display(), "done");
    Ok(())
}

/// test mode: index page first, then every class page, separated.
fn test_mode(site: &Site) {
    for (i, page) in site.pages().iter().enumerate() {
        if i > 0 {
            println!("{TEST_SEPARATOR}");
        }
        print!("{}", page.content);
    }
}
