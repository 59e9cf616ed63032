// src/lib.rs
// =============================================================================
// site-scraper: a bounded-depth crawler that keeps the titles of relevant
// pages and exports them as JSON, CSV or a spreadsheet.
//
// Data flow for one page:
//   fetch (HTTP GET) -> parser (title + links) -> relevance (keywords)
//   -> store (append record) -> crawl (follow in-scope links)
// =============================================================================

pub mod config;
pub mod crawl;
pub mod fetch;
pub mod parser;
pub mod relevance;
pub mod store;

pub use config::{parse_keywords, ConfigError, CrawlConfig, OutputFormat};
pub use crawl::{CrawlEngine, CrawlReport, CrawlStats, ScopeRule};
pub use fetch::{FetchError, FetchResponse, HttpFetcher, PageFetcher};
pub use parser::{parse_page, ParsedPage, NO_TITLE};
pub use relevance::{is_relevant, RelevanceFilter};
pub use store::{export, ExportError, ExportOutcome, PageRecord, ResultStore};
