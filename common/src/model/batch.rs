use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of a single CSV row within a batch run.
///
/// Serialized as the plain strings the front end renders: `created`, `dry-run`,
/// `error` and `failed (<status>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// The remote API accepted the user (HTTP 200 or 201).
    Created,
    /// The payload was built but never sent.
    DryRun,
    /// The row was rejected locally, or the request never got a response.
    Error,
    /// The remote API answered with a non-success status.
    Failed(u16),
}

impl RowStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RowStatus::Created | RowStatus::DryRun)
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::Created => f.write_str("created"),
            RowStatus::DryRun => f.write_str("dry-run"),
            RowStatus::Error => f.write_str("error"),
            RowStatus::Failed(status) => write!(f, "failed ({})", status),
        }
    }
}

impl Serialize for RowStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result recorded for one CSV row. `row` is the 1-based line number in the
/// file, so the first data row is row 2.
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    pub row: usize,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Serialized request body, only present for dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub success: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_front_end() {
        assert_eq!(RowStatus::Created.to_string(), "created");
        assert_eq!(RowStatus::DryRun.to_string(), "dry-run");
        assert_eq!(RowStatus::Failed(422).to_string(), "failed (422)");
        assert_eq!(RowStatus::Error.to_string(), "error");
        assert!(!RowStatus::Failed(500).is_success());
    }

    #[test]
    fn row_result_omits_empty_fields() {
        let result = RowResult {
            row: 2,
            status: RowStatus::Created,
            message: None,
            body: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"row": 2, "status": "created"}));
    }
}
