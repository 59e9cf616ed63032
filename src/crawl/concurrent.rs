// src/crawl/concurrent.rs
// =============================================================================
// Level-by-level crawl with several fetches in flight.
//
// How it works:
// 1. The frontier starts as [seed] at depth 1
// 2. Drop frontier URLs that are already visited, then fetch the rest
//    concurrently (at most `concurrency` at a time)
// 3. Handle the responses in frontier order: mark visited, record, and
//    collect in-scope links for the next level (each URL queued once)
// 4. Repeat one level deeper until the frontier is empty or max_depth is hit
//
// Only this coordinating loop touches the visited set, so the
// check-then-insert per URL can't race. `buffered` (not `buffer_unordered`)
// keeps responses in frontier order, which makes the results reproducible.
//
// Each worker pauses for the delay after a successful fetch, so the total
// pacing time matches the sequential crawl, spread over the workers.
// =============================================================================

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use super::engine::CrawlEngine;
use crate::fetch::PageFetcher;

impl<F: PageFetcher> CrawlEngine<F> {
    pub(super) async fn crawl_concurrent(&mut self) {
        let mut frontier = vec![self.config.seed_url.clone()];
        let mut depth = 1;

        while depth <= self.config.max_depth {
            // A page fetched earlier in the previous level may have been
            // queued again by a sibling
            frontier.retain(|url| !self.visited.contains(url));
            if frontier.is_empty() {
                break;
            }

            info!(depth, pages = frontier.len(), "Fetching level");
            self.stats.attempted += frontier.len();

            let fetcher = &self.fetcher;
            let timeout = self.config.timeout;
            let delay = self.config.delay;

            let responses: Vec<_> = stream::iter(frontier)
                .map(move |url| async move {
                    info!(url = %url, depth, "Fetching");
                    let result = fetcher.get(&url, timeout).await;
                    if matches!(&result, Ok(response) if response.is_ok()) && !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    (url, result)
                })
                .buffered(self.config.concurrency)
                .collect()
                .await;

            let mut next = Vec::new();
            let mut queued = HashSet::new();

            for (url, result) in responses {
                let Some(links) = self.handle_response(&url, result) else {
                    continue;
                };
                if depth == self.config.max_depth {
                    continue;
                }

                for link in links {
                    if !self.config.scope.allows(&link) {
                        debug!(url = %link, "Out of scope, not following");
                        continue;
                    }
                    if self.visited.contains(&link) {
                        continue;
                    }
                    if queued.insert(link.clone()) {
                        next.push(link);
                    }
                }
            }

            frontier = next;
            depth += 1;
        }
    }
}
