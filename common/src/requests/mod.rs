use serde::Deserialize;

/// Options every front-door request may carry. Anything left out falls back to
/// the configuration the server was started with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestOptions {
    pub base_url: Option<String>,
    pub api_version: Option<String>,
    pub location_id: Option<String>,
    pub company_id: Option<String>,
    /// Seconds to wait after each live request.
    pub delay: Option<f64>,
    /// Per-request timeout in seconds.
    pub timeout: Option<f64>,
    pub dry_run: Option<bool>,
    pub stop_on_error: Option<bool>,
    pub list_limit: Option<u32>,
    pub users_json: Option<String>,
    pub users_csv: Option<String>,
}

/// Payload of `POST /run`: the CSV text to import plus options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub csv: String,
    #[serde(flatten)]
    pub options: RequestOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[serde(default)]
    pub save_files: Option<bool>,
    #[serde(flatten)]
    pub options: RequestOptions,
}
