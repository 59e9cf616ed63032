// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Set up logging (progress goes to stderr through `tracing`)
// 2. Parse and validate the command-line arguments
// 3. Crawl the site
// 4. Print the collected records and save them in the chosen format
// 5. Exit with a proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use site_scraper::{
    export, CrawlEngine, CrawlStats, ExportOutcome, HttpFetcher, OutputFormat, PageRecord,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.to_config()?;

    let format = config.output_format;
    let fetcher = HttpFetcher::new(&config.user_agent).context("Failed to create HTTP client")?;

    let report = CrawlEngine::new(config, fetcher).run().await;

    print_table(report.results.records());
    print_summary(&report.stats);

    save_results(report.results.records(), format, &cli.output_dir)?;
    Ok(0)
}

fn save_results(records: &[PageRecord], format: OutputFormat, output_dir: &Path) -> Result<()> {
    let outcome = export(records, format, output_dir).context("Failed to save results")?;

    match outcome {
        ExportOutcome::Saved(path) => {
            info!(path = %path.display(), count = records.len(), "Results saved");
            println!("Results saved to {}", path.display());
        }
        ExportOutcome::NoData => {
            info!("No relevant data found");
            println!("No relevant data found.");
        }
    }
    Ok(())
}

// Prints the records as a human-readable table
fn print_table(records: &[PageRecord]) {
    if records.is_empty() {
        return;
    }

    println!("{:<60} {:<40}", "URL", "TITLE");
    println!("{}", "=".repeat(100));

    for record in records {
        println!(
            "{:<60} {:<40}",
            truncate(&record.url, 57),
            truncate(record.title.trim(), 37)
        );
    }

    println!();
}

fn print_summary(stats: &CrawlStats) {
    println!("📊 Summary:");
    println!("   📄 Pages fetched: {}", stats.fetched);
    println!("   ✅ Relevant: {}", stats.matched);
    println!("   ⏱️  Transport errors: {}", stats.transport_errors);
    println!("   ❌ Bad status: {}", stats.status_errors);
    println!();
}

// Cuts long text for display, respecting char boundaries
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
