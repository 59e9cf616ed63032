// src/relevance.rs
// =============================================================================
// Keyword relevance check applied to page titles.
//
// A text is relevant when its lowercased form contains at least one keyword
// as a plain substring ("shop" matches "Workshop"). No keywords means no
// filtering at all.
// =============================================================================

use std::collections::BTreeSet;

/// Keyword filter over lowercase keywords.
#[derive(Debug, Clone, Default)]
pub struct RelevanceFilter {
    keywords: BTreeSet<String>,
}

impl RelevanceFilter {
    /// Keywords are expected to be lowercase already (see `parse_keywords`).
    pub fn new(keywords: BTreeSet<String>) -> Self {
        Self { keywords }
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        is_relevant(&self.keywords, text)
    }
}

pub fn is_relevant(keywords: &BTreeSet<String>, text: &str) -> bool {
    if keywords.is_empty() {
        return true;
    }

    let text = text.to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}
