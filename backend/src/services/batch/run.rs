//! `POST /run`: imports the CSV text embedded in the request body and answers
//! with the summary and one result per row.

use super::runner::run_batch;
use crate::config::Config;
use crate::error::ImportError;
use actix_web::{web, HttpResponse, Responder};
use common::requests::RunRequest;
use common::responses::{ErrorResponse, RunResponse};
use log::warn;

pub(crate) async fn process(
    config: web::Data<Config>,
    payload: web::Json<RunRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    match start_run(&config, &request).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            warn!("/run rejected: {}", err);
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
    }
}

async fn start_run(config: &Config, request: &RunRequest) -> Result<RunResponse, ImportError> {
    if request.csv.trim().is_empty() {
        return Err(ImportError::EmptyCsv);
    }
    let config = config.with_options(&request.options);
    let outcome = run_batch(&config, &request.csv).await?;
    Ok(outcome.into())
}
