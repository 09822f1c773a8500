use crate::model::batch::{BatchSummary, RowResult};
use crate::model::user::UserSummary;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub summary: BatchSummary,
    pub results: Vec<RowResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub count: usize,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportFiles {
    pub json: String,
    pub csv: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub summary: ListSummary,
    pub files: ExportFiles,
    pub users: Vec<UserSummary>,
}

/// Body of every 4xx answer from the front door.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
        }
    }
}
