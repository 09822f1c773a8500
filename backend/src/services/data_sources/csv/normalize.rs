//! Turns one raw CSV record into a `NormalizedRow`, deriving the name fields the
//! spreadsheet left out.

use super::headers::{FieldKey, HeaderMapping};
use crate::error::RowError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Runs of letters or digits, the unit that gets title-cased.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("static regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    pub role: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl NormalizedRow {
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Role => &self.role,
            FieldKey::Name => &self.name,
            FieldKey::FirstName => &self.first_name,
            FieldKey::LastName => &self.last_name,
            FieldKey::Email => &self.email,
            FieldKey::Phone => &self.phone,
        }
    }

    fn slot(&mut self, key: FieldKey) -> &mut String {
        match key {
            FieldKey::Role => &mut self.role,
            FieldKey::Name => &mut self.name,
            FieldKey::FirstName => &mut self.first_name,
            FieldKey::LastName => &mut self.last_name,
            FieldKey::Email => &mut self.email,
            FieldKey::Phone => &mut self.phone,
        }
    }

    /// Required fields that are still empty, in alphabetical order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .filter(|key| self.get(**key).is_empty())
            .map(FieldKey::as_str)
            .collect();
        missing.sort_unstable();
        missing
    }

    pub fn check_required(&self) -> Result<(), RowError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RowError::MissingFields(missing))
        }
    }
}

const REQUIRED_FIELDS: [FieldKey; 5] = [
    FieldKey::Role,
    FieldKey::FirstName,
    FieldKey::LastName,
    FieldKey::Email,
    FieldKey::Phone,
];

/// Normalizes one record. `values` are the record's cells by position; columns
/// beyond the end of a short record read as empty.
pub fn normalize_row<S: AsRef<str>>(
    values: &[S],
    mapping: &HeaderMapping,
    default_last_name: &str,
) -> NormalizedRow {
    let mut row = NormalizedRow::default();
    for column in mapping.columns() {
        let value = values
            .get(column.index)
            .map(|v| v.as_ref().trim())
            .unwrap_or_default();
        *row.slot(column.key) = value.to_string();
    }

    if row.name.is_empty() {
        let combined = format!("{} {}", row.first_name, row.last_name);
        let combined = combined.trim();
        if !combined.is_empty() {
            row.name = combined.to_string();
        }
    }

    if !row.name.is_empty() && (row.first_name.is_empty() || row.last_name.is_empty()) {
        let (first, last) = split_name(&row.name);
        if row.first_name.is_empty() && !first.is_empty() {
            row.first_name = first;
        }
        if row.last_name.is_empty() && !last.is_empty() {
            row.last_name = last;
        }
    }

    if row.last_name.is_empty() {
        row.last_name = default_last_name.to_string();
    }

    for key in [FieldKey::Name, FieldKey::FirstName, FieldKey::LastName] {
        let slot = row.slot(key);
        if !slot.is_empty() {
            *slot = title_case(slot);
        }
    }

    row
}

/// First whitespace-delimited token, and the rest joined by single spaces.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}

/// Upper-cases the first character of every run of letters or digits and
/// lower-cases the rest; separators are left as they are.
pub fn title_case(value: &str) -> String {
    WORD_RE
        .replace_all(value, |caps: &Captures| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .into_owned()
}
