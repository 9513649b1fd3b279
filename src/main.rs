// src/main.rs
mod batch;
mod config;
mod injector;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use config::DocsConfig;
use injector::DocInjector;
use storage::DocumentStore;
use utils::AppError;

/// Adds "Code Examples" and "Related Tests" sections to documentation pages
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON page table (defaults to the built-in table)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the page paths are relative to
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Override the link prefix for generated links
    #[arg(long)]
    base_url: Option<String>,

    /// Report what would change without writing any page
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    // 3. Load the page table; failing here is the only fatal error
    let mut docs_config = DocsConfig::load(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        tracing::debug!("Overriding base URL with {}", base_url);
        docs_config.base_url = base_url.clone();
    }

    tracing::info!(
        "Adding example and test sections to {} documentation pages...",
        docs_config.pages.len()
    );

    // 4. Process every page
    let store = DocumentStore::new(&args.root);
    let injector = DocInjector::new(&docs_config, store).with_dry_run(args.dry_run);
    let summary = batch::run(&injector, &docs_config.pages).await;

    // 5. Summary, always emitted even when nothing was updated
    if args.dry_run {
        tracing::info!("Dry run: {} documentation pages would be updated", summary.updated());
    } else {
        tracing::info!("Updated {} documentation pages", summary.updated());
    }
    tracing::info!(
        "Already present: {}, missing anchor: {}, failed: {}",
        summary.already_present(),
        summary.missing_anchor(),
        summary.failed()
    );

    if let Some(report_path) = &args.report {
        storage::save_run_report(report_path, &summary)?;
    }

    Ok(())
}
