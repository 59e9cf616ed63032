// src/parser.rs
// =============================================================================
// This module pulls the two things the crawler needs out of an HTML page:
// - the page title (or "No Title")
// - every <a href> target, resolved to an absolute URL
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Never fails on broken markup: html5ever repairs it like a browser would
//
// We also use the `url` crate to resolve relative links against the page URL.
//
// No filtering happens here. Deduplication and scope checks belong to the
// crawler.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

/// Title used when a page has no usable <title>.
pub const NO_TITLE: &str = "No Title";

/// What the crawler needs from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub title: String,
    /// Absolute link targets, in document order, duplicates kept.
    pub links: Vec<String>,
}

// Parses a raw response body
//
// Parameters:
//   body: the raw bytes of the response (invalid UTF-8 is replaced, not rejected)
//   page_url: the URL the body came from, used as the base for relative links
pub fn parse_page(body: &[u8], page_url: &str) -> ParsedPage {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, page_url),
    }
}

// Text of the first <title> element, as written (surrounding whitespace kept)
fn extract_title(document: &Html) -> String {
    // Constant selector, known to be valid
    let selector = Selector::parse("title").expect("valid title selector");

    document
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

// Every <a href>, resolved against the page URL
fn extract_links(document: &Html, page_url: &str) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("valid anchor selector");

    // If the page URL itself is unusable we can't resolve anything
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(url = %page_url, error = %e, "Cannot resolve links against page URL");
            return Vec::new();
        }
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(&base, href))
        .collect()
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples (base = "https://example.com/docs/page"):
//   "/about"              -> "https://example.com/about"
//   "intro"               -> "https://example.com/docs/intro"
//   "//cdn.example.com/x" -> "https://cdn.example.com/x"
//   "?q=1#top"            -> "https://example.com/docs/page?q=1#top"
//   "http://[::1"         -> None (malformed, skipped)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(String::from)
}
