// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is the "external caller" of the library: it collects the seed URL
// and crawl settings, validates them, and turns them into a CrawlConfig.
// Everything is validated before the first request goes out, including the
// output format.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use site_scraper::{parse_keywords, CrawlConfig, OutputFormat};

// #[derive(Parser)] tells clap to generate the parsing code for this struct
#[derive(Parser, Debug)]
#[command(
    name = "site-scraper",
    version,
    about = "Crawl a website and export the titles of relevant pages",
    long_about = "site-scraper follows links from a seed URL up to a maximum depth, \
                  keeps pages whose title contains one of your keywords, and saves \
                  them as JSON, CSV or an Excel spreadsheet."
)]
pub struct Cli {
    /// URL to start from (e.g., https://example.com)
    ///
    /// Only links that start with this exact text are followed
    pub seed_url: String,

    /// Maximum crawl depth
    ///
    /// Depth 1 = just the seed page
    /// Depth 2 = seed page + the pages it links to
    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    /// Seconds to wait after each visited page (fractions allowed)
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Comma-separated keywords; a page is kept if its title contains any
    ///
    /// Leave empty to keep every page
    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Output format: json, csv or excel
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Directory the output file is written to (created if missing)
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Number of requests in flight; 1 keeps the sequential depth-first crawl
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Follow only links on the seed's scheme, host and port
    /// instead of links that start with the seed URL
    #[arg(long)]
    pub strict_origin: bool,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl Cli {
    // Builds and validates the crawl configuration
    pub fn to_config(&self) -> Result<CrawlConfig> {
        let format: OutputFormat = self.format.parse()?;
        let delay = CrawlConfig::delay_from_secs(self.delay)?;

        let mut config = CrawlConfig::new(self.seed_url.trim())
            .with_max_depth(self.max_depth)
            .with_delay(delay)
            .with_keywords(parse_keywords(&self.keywords))
            .with_output_format(format)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_concurrency(self.concurrency)
            .with_strict_origin(self.strict_origin);

        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.as_str());
        }

        config.validate().context("Invalid crawl configuration")?;
        Ok(config)
    }
}
