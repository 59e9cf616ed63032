// src/crawl/scope.rs
// =============================================================================
// Decides which discovered links the crawler is allowed to follow.
//
// Two rules:
// - Prefix: the link must start with the seed URL, compared as plain text.
//   This is the default. Note that "https://example.com.evil.com" passes a
//   "https://example.com" prefix.
// - SameOrigin: the link must share the seed's scheme, host and port.
// =============================================================================

use url::{Origin, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeRule {
    Prefix(String),
    SameOrigin(Origin),
}

impl ScopeRule {
    pub fn prefix(seed_url: &str) -> Self {
        ScopeRule::Prefix(seed_url.to_string())
    }

    pub fn same_origin(seed: &Url) -> Self {
        ScopeRule::SameOrigin(seed.origin())
    }

    /// Returns true if the crawler may follow `link`.
    pub fn allows(&self, link: &str) -> bool {
        match self {
            ScopeRule::Prefix(prefix) => link.starts_with(prefix.as_str()),
            ScopeRule::SameOrigin(origin) => Url::parse(link)
                .map(|url| url.origin() == *origin)
                .unwrap_or(false),
        }
    }
}
