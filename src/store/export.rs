// src/store/export.rs
// =============================================================================
// Writers for the three output formats.
//
// - JSON: array of {"url", "title"} objects, 4-space indent
// - CSV: header row `url,title`, one row per record
// - Spreadsheet: one sheet, header row `url`, `title`, one row per record
//
// The writers accept an empty slice. `export` itself refuses to write
// anything for an empty crawl and reports `ExportOutcome::NoData` instead.
// =============================================================================

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use thiserror::Error;

use super::PageRecord;
use crate::config::OutputFormat;

const HEADERS: [&str; 2] = ["url", "title"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] XlsxError),
}

/// What `export` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Records were written to this file.
    Saved(PathBuf),
    /// Nothing matched, nothing was written.
    NoData,
}

// Writes the records in the chosen format under `dir`
//
// The directory is created if needed, but only when there is something to
// write.
pub fn export(
    records: &[PageRecord],
    format: OutputFormat,
    dir: &Path,
) -> Result<ExportOutcome, ExportError> {
    if records.is_empty() {
        return Ok(ExportOutcome::NoData);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(format.file_name());

    match format {
        OutputFormat::Json => write_json(records, &path)?,
        OutputFormat::Csv => write_csv(records, &path)?,
        OutputFormat::Spreadsheet => write_spreadsheet(records, &path)?,
    }

    tracing::debug!(path = %path.display(), count = records.len(), "Export written");
    Ok(ExportOutcome::Saved(path))
}

pub fn write_json(records: &[PageRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;

    writer.flush()?;
    Ok(())
}

// The header is written by hand so an empty slice still gets one
pub fn write_csv(records: &[PageRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?;

    writer.write_record(HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_spreadsheet(records: &[PageRecord], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, header) in (0u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, header, &bold)?;
    }

    for (row, record) in (1u32..).zip(records) {
        worksheet.write_string(row, 0, record.url.as_str())?;
        worksheet.write_string(row, 1, record.title.as_str())?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<PageRecord> {
        vec![
            PageRecord::new("https://example.com", "Example Domain"),
            PageRecord::new("https://example.com/shop", "Shop, \"Sale\""),
        ]
    }

    #[test]
    fn test_empty_records_write_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("output");

        let outcome = export(&[], OutputFormat::Csv, &out).unwrap();

        assert_eq!(outcome, ExportOutcome::NoData);
        assert!(!out.exists());
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("output");

        let outcome = export(&sample(), OutputFormat::Json, &out).unwrap();
        let path = out.join("scraped_data.json");
        assert_eq!(outcome, ExportOutcome::Saved(path.clone()));

        let text = fs::read_to_string(&path).unwrap();
        let parsed: Vec<PageRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_json_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        write_json(&sample()[..1], &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let expected = "[\n    {\n        \"url\": \"https://example.com\",\n        \"title\": \"Example Domain\"\n    }\n]";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_json_empty_slice_is_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        write_json(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_csv_has_header_and_quotes_fields() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("output");

        export(&sample(), OutputFormat::Csv, &out).unwrap();

        let text = fs::read_to_string(out.join("scraped_data.csv")).unwrap();
        assert_eq!(
            text,
            "url,title\r\nhttps://example.com,Example Domain\r\nhttps://example.com/shop,\"Shop, \"\"Sale\"\"\"\r\n"
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");

        write_csv(&sample(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let parsed: Vec<PageRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_csv_empty_slice_is_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");

        write_csv(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "url,title\r\n");
    }

    #[test]
    fn test_spreadsheet_is_written() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("output");

        let outcome = export(&sample(), OutputFormat::Spreadsheet, &out).unwrap();
        let path = out.join("scraped_data.xlsx");
        assert_eq!(outcome, ExportOutcome::Saved(path.clone()));

        // .xlsx files are zip archives
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_spreadsheet_empty_slice_is_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.xlsx");

        write_spreadsheet(&[], &path).unwrap();

        assert!(path.exists());
    }
}
