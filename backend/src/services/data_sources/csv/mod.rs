//! CSV input handling for the batch import.
//!
//! - `headers`: resolves free-form column titles (`Nome`, `E-mail`, `Cargo`, ...)
//!   to the canonical fields of a user.
//! - `normalize`: builds a `NormalizedRow` per record, deriving first/last/full
//!   names and title-casing them.
//!
//! This module reads the raw text: it strips a UTF-8 BOM, picks the delimiter
//! from the header line and loads every record into memory. Blank lines are
//! skipped by the reader; a record of empty cells (`,,,`) is kept so it is
//! reported against its own row. Records may be shorter or longer than the header.

pub mod headers;
pub mod normalize;

use crate::error::{ImportError, ImportResult};

/// Parsed CSV: header titles plus the data records in file order.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl CsvTable {
    /// Records paired with their 1-based line number (the header is line 1).
    pub fn numbered_records(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (i + 2, record.as_slice()))
    }
}

/// Picks the candidate delimiter that occurs most often in the header line.
pub fn detect_delimiter(header_line: &str) -> u8 {
    [b',', b';', b'\t', b'|']
        .into_iter()
        .rev()
        .max_by_key(|&d| header_line.bytes().filter(|&b| b == d).count())
        .unwrap_or(b',')
}

pub fn read_table(text: &str) -> ImportResult<CsvTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text.lines().next().unwrap_or_default();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(detect_delimiter(header_line))
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::NoHeaders);
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable { headers, records })
}
