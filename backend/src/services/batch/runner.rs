//! Sequential batch import.
//!
//! Each record goes through normalize, role, template, location/company and
//! payload stages before it is sent (or only printed, in dry-run mode). A stage
//! that rejects the record records a failure for that row and moves on, unless
//! `stop_on_error` is set. Only configuration problems abort the whole run.

use crate::config::Config;
use crate::error::{ImportError, ImportResult, RowError};
use crate::services::data_sources::csv::headers::{resolve_headers, HeaderMapping};
use crate::services::data_sources::csv::normalize::normalize_row;
use crate::services::data_sources::csv::read_table;
use crate::services::ghl::{snippet, GhlClient};
use crate::services::templates::load::TemplateStore;
use crate::services::templates::payload::{
    build_body, resolve_company_id, resolve_location_ids, UserCreationRequest,
};
use crate::services::templates::role::{resolve_role, Role};
use common::model::batch::{BatchSummary, RowResult, RowStatus};
use common::responses::RunResponse;
use log::{info, warn};

/// Totals and per-row results of one run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub summary: BatchSummary,
    pub results: Vec<RowResult>,
    /// Set when `stop_on_error` cut the run short.
    pub aborted: bool,
}

impl BatchOutcome {
    fn record(&mut self, result: RowResult) {
        if result.status.is_success() {
            self.summary.success += 1;
        } else {
            self.summary.failed += 1;
        }
        self.results.push(result);
    }
}

impl From<BatchOutcome> for RunResponse {
    fn from(outcome: BatchOutcome) -> Self {
        RunResponse {
            summary: outcome.summary,
            results: outcome.results,
        }
    }
}

/// Why a record did not produce a request body.
#[derive(Debug)]
enum RowFailure {
    Rejected(RowError),
    Fatal(ImportError),
}

impl From<RowError> for RowFailure {
    fn from(err: RowError) -> Self {
        RowFailure::Rejected(err)
    }
}

impl From<ImportError> for RowFailure {
    fn from(err: ImportError) -> Self {
        RowFailure::Fatal(err)
    }
}

#[derive(Debug)]
struct PreparedRow {
    role: Role,
    body: UserCreationRequest,
    /// Sent as the `LocationId` header.
    location_id: String,
}

fn prepare_row(
    config: &Config,
    templates: &TemplateStore,
    mapping: &HeaderMapping,
    values: &[String],
) -> Result<PreparedRow, RowFailure> {
    let row = normalize_row(values, mapping, &config.default_last_name);
    row.check_required()?;

    let role = resolve_role(&row.role).ok_or_else(|| RowError::InvalidRole(row.role.clone()))?;
    let template = templates.load(role)?;

    let location_ids = resolve_location_ids(config.location_id.as_deref(), &template)?;
    let company_id = resolve_company_id(config.company_id.as_deref(), &template, &location_ids)?;
    let location_id = config
        .location_id
        .clone()
        .or_else(|| location_ids.first().cloned())
        .unwrap_or_default();

    let body = build_body(&template, &row, company_id, location_ids)?;
    Ok(PreparedRow {
        role,
        body,
        location_id,
    })
}

async fn send_row(client: &GhlClient, row_number: usize, prepared: &PreparedRow) -> RowResult {
    match client
        .create_user(&prepared.body, Some(&prepared.location_id))
        .await
    {
        Ok(response) if response.is_created() => {
            info!("Row {}: created ({})", row_number, response.status);
            RowResult {
                row: row_number,
                status: RowStatus::Created,
                message: None,
                body: None,
            }
        }
        Ok(response) => {
            let message = snippet(&response.body);
            warn!("Row {}: failed ({}) -> {}", row_number, response.status, message);
            RowResult {
                row: row_number,
                status: RowStatus::Failed(response.status),
                message: Some(message),
                body: None,
            }
        }
        Err(err) => {
            warn!("Row {}: {}", row_number, err);
            RowResult {
                row: row_number,
                status: RowStatus::Error,
                message: Some(snippet(&err.to_string())),
                body: None,
            }
        }
    }
}

/// Runs the import over the CSV text.
///
/// Returns `Err` only for conditions that invalidate the whole run: missing
/// token on a live run, unreadable or unrecognized headers, a missing or broken
/// role template.
pub async fn run_batch(config: &Config, csv_text: &str) -> ImportResult<BatchOutcome> {
    if !config.dry_run && config.token.is_none() {
        return Err(ImportError::MissingToken);
    }

    let table = read_table(csv_text)?;
    let mapping = resolve_headers(table.headers.as_slice());
    if mapping.is_empty() {
        return Err(ImportError::NoRecognizedHeaders);
    }

    let templates = TemplateStore::new(&config.template_dir);
    let client = GhlClient::new(config)?;
    let mut outcome = BatchOutcome::default();

    for (row_number, values) in table.numbered_records() {
        let prepared = match prepare_row(config, &templates, &mapping, values) {
            Ok(prepared) => prepared,
            Err(RowFailure::Fatal(err)) => return Err(err),
            Err(RowFailure::Rejected(reason)) => {
                warn!("Row {}: {}", row_number, reason);
                outcome.record(RowResult {
                    row: row_number,
                    status: RowStatus::Error,
                    message: Some(reason.to_string()),
                    body: None,
                });
                if config.stop_on_error {
                    outcome.aborted = true;
                    break;
                }
                continue;
            }
        };

        if config.dry_run {
            let body = serde_json::to_string(&prepared.body)?;
            info!("Row {}: {} -> {}", row_number, prepared.role, body);
            outcome.record(RowResult {
                row: row_number,
                status: RowStatus::DryRun,
                message: None,
                body: Some(body),
            });
            continue;
        }

        let result = send_row(&client, row_number, &prepared).await;
        let failed = !result.status.is_success();
        outcome.record(result);
        if failed && config.stop_on_error {
            outcome.aborted = true;
            break;
        }

        if !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    info!(
        "Batch finished: {} created, {} failed{}",
        outcome.summary.success,
        outcome.summary.failed,
        if outcome.aborted { " (stopped on error)" } else { "" }
    );
    Ok(outcome)
}
