use crate::config::Config;
use crate::error::{ImportError, ImportResult};
use crate::services::templates::payload::UserCreationRequest;
use common::model::user::UsersPage;
use log::{debug, warn};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

const USERS_PATH: &str = "/users/";
const SNIPPET_LIMIT: usize = 500;

/// Status code and raw body of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_created(&self) -> bool {
        matches!(self.status, 200 | 201)
    }
}

/// The remote API rejects some template scopes with a 422 listing the allowed
/// enum values. Only that exact answer to a body that carried `scopes` is
/// worth one more attempt without them.
pub fn should_retry_without_scopes(status: u16, request_had_scopes: bool, response: &str) -> bool {
    status == 422 && request_had_scopes && response.contains("scopes") && response.contains("enum")
}

/// Trimmed response text, cut to 500 characters with a trailing `...`.
pub fn snippet(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(SNIPPET_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Authenticated client for the two user endpoints.
pub struct GhlClient {
    http: Client,
    base_url: String,
    api_version: String,
    user_agent: String,
    token: String,
    timeout: Duration,
}

impl std::fmt::Debug for GhlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GhlClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl GhlClient {
    pub fn new(config: &Config) -> ImportResult<Self> {
        let http = Client::builder().build()?;
        Ok(GhlClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            user_agent: config.user_agent.clone(),
            token: config.token.clone().unwrap_or_default(),
            timeout: config.timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout);
        if self.api_version.is_empty() {
            request
        } else {
            request.header("Version", &self.api_version)
        }
    }

    async fn send(request: RequestBuilder) -> ImportResult<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }

    /// Single `POST /users/` without any retry.
    pub async fn post_user(
        &self,
        body: &UserCreationRequest,
        location_id: Option<&str>,
    ) -> ImportResult<ApiResponse> {
        let mut request = self.authorized(self.http.post(self.url(USERS_PATH))).json(body);
        if let Some(location_id) = location_id.filter(|l| !l.is_empty()) {
            request = request.header("LocationId", location_id);
        }
        debug!("POST {} for {}", USERS_PATH, body.email);
        Self::send(request).await
    }

    /// Creates a user, retrying once without `scopes` when the API rejects them.
    pub async fn create_user(
        &self,
        body: &UserCreationRequest,
        location_id: Option<&str>,
    ) -> ImportResult<ApiResponse> {
        let response = self.post_user(body, location_id).await?;
        if should_retry_without_scopes(response.status, body.has_scopes(), &response.body) {
            warn!(
                "API rejected scopes for {} ({}), retrying without scopes",
                body.email, response.status
            );
            return self.post_user(&body.without_scopes(), location_id).await;
        }
        Ok(response)
    }

    /// Every user of one location. `locationId` travels as a query parameter;
    /// the API returns the full set in a single response.
    pub async fn list_users(&self, location_id: &str) -> ImportResult<UsersPage> {
        let request = self
            .authorized(self.http.get(self.url(USERS_PATH)))
            .query(&[("locationId", location_id)]);
        debug!("GET {} for location {}", USERS_PATH, location_id);
        let response = Self::send(request).await?;

        if response.status != 200 {
            return Err(ImportError::Api {
                status: response.status,
                snippet: snippet(&response.body),
            });
        }
        serde_json::from_str(&response.body)
            .map_err(|e| ImportError::InvalidResponse(format!("{}: {}", e, snippet(&response.body))))
    }
}
