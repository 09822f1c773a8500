//! # User Export
//!
//! Fetches every user of one location and, optionally, stores two snapshots: a
//! JSON file carrying the raw records and a flat CSV. Used by the `list` CLI
//! command and by `POST /list`.

use super::writer::{write_users_csv, write_users_json};
use crate::config::Config;
use crate::error::{ImportError, ImportResult};
use crate::services::ghl::GhlClient;
use actix_web::{web, HttpResponse, Responder};
use common::model::user::{RemoteUser, UserSummary};
use common::requests::ListRequest;
use common::responses::{ErrorResponse, ExportFiles, ListResponse, ListSummary};
use log::{info, warn};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub location_id: String,
    pub users: Vec<Value>,
    /// Count reported by the API, or the number of users when it sent none.
    pub total: u64,
}

impl ExportOutcome {
    pub fn summaries(&self) -> Vec<UserSummary> {
        self.users
            .iter()
            .map(|user| UserSummary::from(&RemoteUser::from_value(user)))
            .collect()
    }
}

pub async fn export_users(config: &Config, save_files: bool) -> ImportResult<ExportOutcome> {
    if config.token.is_none() {
        return Err(ImportError::MissingToken);
    }
    let location_id = config
        .list_location()
        .ok_or(ImportError::MissingLocation)?
        .to_string();

    let client = GhlClient::new(config)?;
    let page = client.list_users(&location_id).await?;
    let total = page.count.unwrap_or(page.users.len() as u64);

    if save_files {
        write_users_json(&config.users_json, &page.users, &location_id)?;
        write_users_csv(&config.users_csv, &page.users)?;
        info!(
            "Stored {} users -> {}, {}",
            page.users.len(),
            config.users_json.display(),
            config.users_csv.display()
        );
    }

    Ok(ExportOutcome {
        location_id,
        users: page.users,
        total,
    })
}

pub(crate) async fn process(
    config: web::Data<Config>,
    payload: web::Json<ListRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    let config = config.with_options(&request.options);
    match export_users(&config, request.save_files.unwrap_or(true)).await {
        Ok(outcome) => HttpResponse::Ok().json(ListResponse {
            summary: ListSummary {
                count: outcome.users.len(),
                total: outcome.total,
            },
            files: ExportFiles {
                json: config.users_json.display().to_string(),
                csv: config.users_csv.display().to_string(),
            },
            users: outcome.summaries(),
        }),
        Err(err) => {
            warn!("/list rejected: {}", err);
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn export_page(page: Value) -> ExportOutcome {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page))
            .mount(&server)
            .await;

        let config = Config {
            base_url: format!("{}/", server.uri()),
            token: Some("pit-test".into()),
            location_id: Some("L1".into()),
            ..Config::default()
        };
        export_users(&config, false).await.unwrap()
    }

    #[tokio::test]
    async fn total_falls_back_to_user_count() {
        let outcome = export_page(json!({"users": [{"id": "u1"}, {"id": "u2"}]})).await;
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.location_id, "L1");
        assert_eq!(outcome.summaries().len(), 2);
    }

    #[tokio::test]
    async fn reported_count_wins_over_page_size() {
        let outcome = export_page(json!({"count": 57, "users": [{"id": "u1"}]})).await;
        assert_eq!(outcome.total, 57);
        assert_eq!(outcome.users.len(), 1);
    }

    #[tokio::test]
    async fn listing_needs_a_location() {
        let config = Config {
            token: Some("pit-test".into()),
            ..Config::default()
        };
        assert!(matches!(
            export_users(&config, false).await,
            Err(ImportError::MissingLocation)
        ));
    }
}
