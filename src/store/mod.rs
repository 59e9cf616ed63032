// src/store/mod.rs
// =============================================================================
// This module holds the crawl results and writes them to disk.
//
// Submodules:
// - export: JSON / CSV / spreadsheet writers
//
// Records are appended in discovery order and never changed afterwards.
// =============================================================================

mod export;

pub use export::{export, write_csv, write_json, write_spreadsheet, ExportError, ExportOutcome};

use serde::{Deserialize, Serialize};

/// One relevant page found during the crawl.
///
/// Field order matters: it is the column order of the CSV and spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Ordered, append-only collection of matched records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    records: Vec<PageRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: PageRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<PageRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_discovery_order() {
        let mut store = ResultStore::new();
        assert!(store.is_empty());

        store.append(PageRecord::new("https://example.com", "Home"));
        store.append(PageRecord::new("https://example.com/about", "About"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].title, "Home");
        assert_eq!(store.into_records()[1].url, "https://example.com/about");
    }
}
