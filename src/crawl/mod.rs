// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling from a seed URL, one request at a time
// - Optional level-by-level crawling with several requests in flight
// - Scope rule that keeps the crawler on the seed's site
// - Configurable depth limit and polite delay between pages
//
// Submodules:
// - engine: CrawlEngine and the sequential traversal
// - concurrent: the bounded-concurrency traversal
// - scope: which links may be followed
// =============================================================================

mod concurrent;
mod engine;
mod scope;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{CrawlEngine, CrawlReport, CrawlStats};
pub use scope::ScopeRule;
