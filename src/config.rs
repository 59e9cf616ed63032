// src/config.rs
// =============================================================================
// Crawl configuration.
//
// A CrawlConfig is built once (by the CLI or any other caller), validated,
// and then stays immutable for the whole crawl.
//
// Rust concepts:
// - Builder methods: `with_*` methods that take and return `self`
// - FromStr: Lets us write `"json".parse::<OutputFormat>()`
// - BTreeSet: An ordered set, so keyword order is stable in logs
// =============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::crawl::ScopeRule;
use crate::store::ExportError;

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("site-scraper/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout used by the reference crawler.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Errors found while validating a configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("Unsupported seed URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Maximum depth must be at least 1")]
    ZeroDepth,

    #[error("Delay must be a finite, non-negative number of seconds (got {0})")]
    InvalidDelay(f64),

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

/// The export formats we know how to write.
///
/// Parsing is case-insensitive and ignores surrounding whitespace, so
/// `" Excel "` is accepted. Anything else is an
/// [`ExportError::UnsupportedFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Spreadsheet,
}

impl OutputFormat {
    /// File name written under the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "scraped_data.json",
            OutputFormat::Csv => "scraped_data.csv",
            OutputFormat::Spreadsheet => "scraped_data.xlsx",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "excel" => Ok(OutputFormat::Spreadsheet),
            _ => Err(ExportError::UnsupportedFormat(token.trim().to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Spreadsheet => "excel",
        };
        f.write_str(token)
    }
}

// Turns "Shop, Sale,,BLOG" into {"blog", "sale", "shop"}
//
// Entries are trimmed and lowercased. Empty entries are dropped, so an
// empty input (or one made only of commas) yields an empty set, which the
// relevance filter treats as "keep everything".
pub fn parse_keywords(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}

/// Everything the crawl engine needs to know for one run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL, kept exactly as given: it doubles as the scope prefix.
    pub seed_url: String,
    /// Maximum link depth; the seed page is depth 1.
    pub max_depth: usize,
    /// Pause after each successfully visited page.
    pub delay: Duration,
    /// Lowercase keywords; empty means no filtering.
    pub keywords: BTreeSet<String>,
    pub output_format: OutputFormat,
    pub timeout: Duration,
    pub user_agent: String,
    /// 1 selects the sequential depth-first traversal.
    pub concurrency: usize,
    pub scope: ScopeRule,
}

impl CrawlConfig {
    /// Creates a config with the reference defaults:
    /// depth 2, 1 second delay, no keywords, JSON output.
    pub fn new(seed_url: impl Into<String>) -> Self {
        let seed_url = seed_url.into();
        Self {
            scope: ScopeRule::prefix(&seed_url),
            seed_url,
            max_depth: 2,
            delay: Duration::from_secs(1),
            keywords: BTreeSet::new(),
            output_format: OutputFormat::Json,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 1,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    // Keywords are normalized here too, so callers can pass raw words
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|kw| kw.as_ref().trim().to_lowercase())
            .filter(|kw| !kw.is_empty())
            .collect();
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Restricts the crawl to the seed's scheme, host and port instead of
    /// the literal string prefix.
    pub fn with_strict_origin(mut self, strict: bool) -> Self {
        self.scope = if strict {
            // validate() reports a bad seed; fall back to prefix until then
            Url::parse(&self.seed_url)
                .map(|seed| ScopeRule::same_origin(&seed))
                .unwrap_or_else(|_| ScopeRule::prefix(&self.seed_url))
        } else {
            ScopeRule::prefix(&self.seed_url)
        };
        self
    }

    /// Converts a delay given in (possibly fractional) seconds.
    pub fn delay_from_secs(secs: f64) -> Result<Duration, ConfigError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(ConfigError::InvalidDelay(secs));
        }
        Ok(Duration::from_secs_f64(secs))
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seed = Url::parse(&self.seed_url).map_err(|e| ConfigError::InvalidSeedUrl {
            url: self.seed_url.clone(),
            reason: e.to_string(),
        })?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(seed.scheme().to_string()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}
