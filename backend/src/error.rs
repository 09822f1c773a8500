//! Error taxonomy for the importer.
//!
//! `ImportError` aborts a whole run (CLI exit code 1 or 2, HTTP 400 on the front
//! door). `RowError` only rejects the CSV row it was raised for.

use std::path::PathBuf;
use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Missing API token. Set GHL_ACCESS_TOKEN or pass --token.")]
    MissingToken,

    #[error("Missing --csv. Use the list command to export existing users.")]
    MissingCsv,

    #[error("CSV not found: {}", .0.display())]
    CsvNotFound(PathBuf),

    #[error("Cannot read CSV {}: {source}", .path.display())]
    UnreadableCsv {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV is empty.")]
    EmptyCsv,

    #[error("CSV has no headers.")]
    NoHeaders,

    #[error("No recognized headers found in CSV.")]
    NoRecognizedHeaders,

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Invalid template {}: {source}", .path.display())]
    InvalidTemplate {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Provide --location-id or --company-id to list users.")]
    MissingLocation,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("List users failed ({status}) -> {snippet}")]
    Api { status: u16, snippet: String },

    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),
}

impl ImportError {
    /// Misconfiguration that no retry or later row could fix.
    pub fn is_fatal_config(&self) -> bool {
        matches!(
            self,
            ImportError::MissingToken
                | ImportError::MissingCsv
                | ImportError::CsvNotFound(_)
                | ImportError::UnreadableCsv { .. }
                | ImportError::EmptyCsv
                | ImportError::NoHeaders
                | ImportError::NoRecognizedHeaders
                | ImportError::TemplateNotFound(_)
                | ImportError::InvalidTemplate { .. }
                | ImportError::MissingLocation
        )
    }

    /// Process exit code for the CLI: 2 for misconfiguration, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_fatal_config() {
            2
        } else {
            1
        }
    }
}

/// Reasons a single CSV row is rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid role '{0}'. Use Vendedor or Administrador.")]
    InvalidRole(String),

    #[error("missing locationIds in template or args.")]
    MissingLocationIds,

    #[error("unable to resolve companyId.")]
    MissingCompanyId,

    #[error("Template missing role/type fields.")]
    TemplateMissingRoleType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_split_config_from_remote_failures() {
        assert_eq!(ImportError::MissingToken.exit_code(), 2);
        assert_eq!(ImportError::MissingCsv.exit_code(), 2);
        assert_eq!(ImportError::CsvNotFound(PathBuf::from("users.csv")).exit_code(), 2);
        assert_eq!(
            ImportError::UnreadableCsv {
                path: PathBuf::from("users.csv"),
                source: std::io::Error::from(std::io::ErrorKind::InvalidData),
            }
            .exit_code(),
            2
        );
        assert_eq!(
            ImportError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied)).exit_code(),
            1
        );
        assert_eq!(ImportError::NoRecognizedHeaders.exit_code(), 2);
        assert_eq!(
            ImportError::TemplateNotFound(PathBuf::from("templates/vendedor.json")).exit_code(),
            2
        );
        assert_eq!(
            ImportError::Api {
                status: 401,
                snippet: "unauthorized".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn row_errors_read_as_messages() {
        let err = RowError::MissingFields(vec!["email", "phone"]);
        assert_eq!(err.to_string(), "missing fields: email, phone");
        assert_eq!(
            RowError::InvalidRole("Gerente".into()).to_string(),
            "invalid role 'Gerente'. Use Vendedor or Administrador."
        );
    }
}
