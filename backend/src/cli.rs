use crate::config::{
    non_blank, resolve_template_dir, seconds, timeout_seconds, Config, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_LAST_NAME, DEFAULT_LIST_LIMIT, DEFAULT_TEMPLATE_DIR, DEFAULT_TIMEOUT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USERS_CSV, DEFAULT_USERS_JSON, DEFAULT_USER_AGENT,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variables checked, in order, when `--token` is not given.
const TOKEN_FALLBACK_VARS: [&str; 2] = ["GHL_API_KEY", "GHL_TOKEN"];

#[derive(Debug, Parser)]
#[command(
    name = "ghl-importer",
    version,
    about = "Create GoHighLevel users from a CSV using role templates."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create one user per CSV row.
    Create(CreateArgs),
    /// List existing users of a location and store them as JSON and CSV.
    List(ListArgs),
    /// Serve the browser UI and its JSON endpoints on 127.0.0.1.
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// API base URL
    #[arg(long, global = true, env = "GHL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Value of the `Version` header
    #[arg(long, global = true, env = "GHL_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    #[arg(long, global = true, env = "GHL_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Bearer token (falls back to GHL_API_KEY, then GHL_TOKEN)
    #[arg(long, global = true, env = "GHL_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Location ID; replaces the template's locationIds
    #[arg(long, global = true, env = "GHL_LOCATION_ID")]
    pub location_id: Option<String>,

    /// Company ID; overrides the template value
    #[arg(long, global = true, env = "GHL_COMPANY_ID")]
    pub company_id: Option<String>,

    /// Delay in seconds after each request
    #[arg(long, global = true, default_value_t = 0.0)]
    pub delay: f64,

    /// Timeout per request in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Directory holding vendedor.json and administrador.json
    #[arg(long, global = true, env = "GHL_TEMPLATE_DIR", default_value = DEFAULT_TEMPLATE_DIR)]
    pub template_dir: PathBuf,

    /// Last name used when a row has none
    #[arg(long, global = true, default_value = DEFAULT_LAST_NAME)]
    pub default_last_name: String,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Path to the CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Build the payloads without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first rejected row or failed request
    #[arg(long)]
    pub stop_on_error: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Page size hint (not used by the API)
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub list_limit: u32,

    #[arg(long, default_value = DEFAULT_USERS_JSON)]
    pub users_json: PathBuf,

    #[arg(long, default_value = DEFAULT_USERS_CSV)]
    pub users_csv: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Do not open the UI in a browser on startup
    #[arg(long)]
    pub no_browser: bool,
}

impl GlobalArgs {
    pub fn to_config(&self) -> Config {
        let token = non_blank(self.token.as_deref()).or_else(|| {
            TOKEN_FALLBACK_VARS
                .iter()
                .find_map(|var| non_blank(std::env::var(var).ok().as_deref()))
        });

        Config {
            base_url: self.base_url.clone(),
            api_version: self.api_version.clone(),
            user_agent: self.user_agent.clone(),
            token,
            location_id: non_blank(self.location_id.as_deref()),
            company_id: non_blank(self.company_id.as_deref()),
            delay: seconds(self.delay, Duration::ZERO),
            timeout: timeout_seconds(self.timeout, DEFAULT_TIMEOUT),
            template_dir: resolve_template_dir(&self.template_dir),
            default_last_name: self.default_last_name.clone(),
            ..Config::default()
        }
    }
}

impl CreateArgs {
    pub fn apply(&self, mut config: Config) -> Config {
        config.dry_run = self.dry_run;
        config.stop_on_error = self.stop_on_error;
        config
    }
}

impl ListArgs {
    pub fn apply(&self, mut config: Config) -> Config {
        config.list_limit = self.list_limit;
        config.users_json = self.users_json.clone();
        config.users_csv = self.users_csv.clone();
        config
    }
}
