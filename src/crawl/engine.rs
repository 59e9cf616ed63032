// src/crawl/engine.rs
// =============================================================================
// This module implements the crawl itself.
//
// How it works (sequential, depth-first):
// 1. Visit the seed URL at depth 1
// 2. Visiting a URL = skip it if already visited or deeper than max_depth,
//    otherwise fetch it, parse it and keep a record if the title is relevant
// 3. Follow each in-scope link on the page, in document order, one level
//    deeper, finishing each link's whole subtree before the next link
// 4. When all of a page's links are done, pause for the configured delay
//
// A URL only enters the visited set after a successful (200) fetch. A URL
// that failed can therefore be tried again if another page links to it.
//
// Failures never stop the crawl: they are logged and only the failing
// page's subtree is skipped.
//
// Rust concepts:
// - Generics: CrawlEngine<F> works with any PageFetcher
// - An explicit stack (Vec<Frame>) instead of recursion, since recursive
//   async functions need boxing
// =============================================================================

use std::collections::HashSet;
use std::vec;

use tracing::{debug, info, warn};

use crate::config::CrawlConfig;
use crate::fetch::{FetchError, FetchResponse, PageFetcher};
use crate::parser::parse_page;
use crate::relevance::RelevanceFilter;
use crate::store::{PageRecord, ResultStore};

/// Counters collected during one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Fetches started.
    pub attempted: usize,
    /// Pages fetched with status 200 (equals the visited-set size).
    pub fetched: usize,
    /// Timeouts, refused connections and other transport failures.
    pub transport_errors: usize,
    /// Responses with a status other than 200.
    pub status_errors: usize,
    /// Records kept by the relevance filter.
    pub matched: usize,
}

/// Result of a finished crawl.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub results: ResultStore,
    pub stats: CrawlStats,
}

// A page whose links are still being walked
struct Frame {
    links: vec::IntoIter<String>,
    depth: usize,
}

/// Owns the state of exactly one crawl run.
pub struct CrawlEngine<F> {
    pub(super) config: CrawlConfig,
    pub(super) fetcher: F,
    filter: RelevanceFilter,
    pub(super) visited: HashSet<String>,
    results: ResultStore,
    pub(super) stats: CrawlStats,
}

impl<F: PageFetcher> CrawlEngine<F> {
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        let filter = RelevanceFilter::new(config.keywords.clone());
        Self {
            config,
            fetcher,
            filter,
            visited: HashSet::new(),
            results: ResultStore::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Crawls from the seed URL and returns everything collected.
    ///
    /// With `concurrency == 1` this is the sequential depth-first crawl.
    /// Higher values switch to the level-by-level concurrent crawl.
    pub async fn run(mut self) -> CrawlReport {
        info!(
            seed = %self.config.seed_url,
            max_depth = self.config.max_depth,
            keywords = ?self.config.keywords,
            concurrency = self.config.concurrency,
            "Starting web scraping"
        );

        if self.config.concurrency > 1 {
            self.crawl_concurrent().await;
        } else {
            self.crawl_depth_first().await;
        }

        info!(
            fetched = self.stats.fetched,
            failed = self.stats.transport_errors + self.stats.status_errors,
            matched = self.stats.matched,
            "Crawl finished"
        );

        CrawlReport {
            results: self.results,
            stats: self.stats,
        }
    }

    async fn crawl_depth_first(&mut self) {
        let seed = self.config.seed_url.clone();
        let mut stack = Vec::new();

        if let Some(links) = self.visit(&seed, 1).await {
            stack.push(Frame {
                links: links.into_iter(),
                depth: 1,
            });
        }

        while let Some(frame) = stack.last_mut() {
            let next = frame.links.next();
            let depth = frame.depth + 1;

            match next {
                Some(link) => {
                    if !self.config.scope.allows(&link) {
                        debug!(url = %link, "Out of scope, not following");
                        continue;
                    }
                    if let Some(links) = self.visit(&link, depth).await {
                        stack.push(Frame {
                            links: links.into_iter(),
                            depth,
                        });
                    }
                }
                None => {
                    // All children done: pay this page's delay
                    stack.pop();
                    self.pause().await;
                }
            }
        }
    }

    // Fetches and processes one URL, returning its links on success
    async fn visit(&mut self, url: &str, depth: usize) -> Option<Vec<String>> {
        if self.visited.contains(url) {
            debug!(url = %url, "Already visited");
            return None;
        }
        if depth > self.config.max_depth {
            debug!(url = %url, depth, "Beyond max depth");
            return None;
        }

        info!(url = %url, depth, "Fetching");
        self.stats.attempted += 1;
        let result = self.fetcher.get(url, self.config.timeout).await;

        self.handle_response(url, result)
    }

    // Shared by both traversals: checks the fetch outcome, marks the URL as
    // visited, records it if relevant and hands back its links
    pub(super) fn handle_response(
        &mut self,
        url: &str,
        result: Result<FetchResponse, FetchError>,
    ) -> Option<Vec<String>> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Request failed");
                self.stats.transport_errors += 1;
                return None;
            }
        };

        if !response.is_ok() {
            warn!(url = %url, status = response.status, "Unexpected status code");
            self.stats.status_errors += 1;
            return None;
        }

        self.visited.insert(url.to_string());
        self.stats.fetched += 1;

        let page = parse_page(&response.body, url);
        if self.filter.is_relevant(&page.title) {
            debug!(url = %url, title = %page.title, "Relevant page");
            self.results.append(PageRecord::new(url, page.title));
            self.stats.matched += 1;
        }

        Some(page.links)
    }

    async fn pause(&self) {
        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }
    }
}
