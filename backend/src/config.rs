//! Immutable run configuration.
//!
//! Built once at startup from CLI flags and environment (see `cli`) and passed by
//! reference to every component. The HTTP front door derives a per-request copy
//! with [`Config::with_options`]; nothing mutates the startup value.

use common::requests::RequestOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://services.leadconnectorhq.com";
pub const DEFAULT_API_VERSION: &str = "2021-07-28";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_LAST_NAME: &str = "Sem Sobrenome";
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";
pub const DEFAULT_USERS_JSON: &str = "users_existing.json";
pub const DEFAULT_USERS_CSV: &str = "users_existing.csv";
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_version: String,
    pub user_agent: String,
    pub token: Option<String>,
    pub location_id: Option<String>,
    pub company_id: Option<String>,
    pub delay: Duration,
    pub timeout: Duration,
    pub dry_run: bool,
    pub stop_on_error: bool,
    /// Page size hint for listing. The API ignores it; kept for CLI compatibility.
    pub list_limit: u32,
    pub users_json: PathBuf,
    pub users_csv: PathBuf,
    pub template_dir: PathBuf,
    pub default_last_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            location_id: None,
            company_id: None,
            delay: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
            dry_run: false,
            stop_on_error: false,
            list_limit: DEFAULT_LIST_LIMIT,
            users_json: PathBuf::from(DEFAULT_USERS_JSON),
            users_csv: PathBuf::from(DEFAULT_USERS_CSV),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            default_last_name: DEFAULT_LAST_NAME.to_string(),
        }
    }
}

impl Config {
    /// Returns a copy with the request's overrides applied. The token and the
    /// user agent always come from the startup configuration.
    pub fn with_options(&self, options: &RequestOptions) -> Config {
        let mut config = self.clone();
        if let Some(base_url) = non_blank(options.base_url.as_deref()) {
            config.base_url = base_url;
        }
        if let Some(api_version) = non_blank(options.api_version.as_deref()) {
            config.api_version = api_version;
        }
        if let Some(location_id) = non_blank(options.location_id.as_deref()) {
            config.location_id = Some(location_id);
        }
        if let Some(company_id) = non_blank(options.company_id.as_deref()) {
            config.company_id = Some(company_id);
        }
        if let Some(delay) = options.delay {
            config.delay = seconds(delay, Duration::ZERO);
        }
        if let Some(timeout) = options.timeout {
            config.timeout = timeout_seconds(timeout, self.timeout);
        }
        if let Some(dry_run) = options.dry_run {
            config.dry_run = dry_run;
        }
        if let Some(stop_on_error) = options.stop_on_error {
            config.stop_on_error = stop_on_error;
        }
        if let Some(list_limit) = options.list_limit {
            config.list_limit = list_limit;
        }
        if let Some(users_json) = non_blank(options.users_json.as_deref()) {
            config.users_json = PathBuf::from(users_json);
        }
        if let Some(users_csv) = non_blank(options.users_csv.as_deref()) {
            config.users_csv = PathBuf::from(users_csv);
        }
        config
    }

    /// Location used for listing users. Location and company IDs are the same
    /// value for this API, so either one works.
    pub fn list_location(&self) -> Option<&str> {
        self.location_id.as_deref().or(self.company_id.as_deref())
    }
}

/// Trimmed value, or `None` when the input is missing or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Converts user-supplied seconds, falling back when the value is negative or not finite.
pub fn seconds(value: f64, fallback: Duration) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(fallback)
}

/// Like [`seconds`], but a zero timeout also means `fallback`: reqwest would fail
/// every request immediately.
pub fn timeout_seconds(value: f64, fallback: Duration) -> Duration {
    if value > 0.0 {
        seconds(value, fallback)
    } else {
        fallback
    }
}

/// Locates a relative template directory when the process runs from elsewhere:
/// the working directory, then beside the executable, then this crate's sources.
/// Returns `dir` unchanged when none of them exists.
pub fn resolve_template_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() || dir.is_dir() {
        return dir.to_path_buf();
    }
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|parent| parent.join(dir)));
    let in_crate = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);

    beside_exe
        .into_iter()
        .chain(std::iter::once(in_crate))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_options_override_a_copy() {
        let base = Config {
            token: Some("secret".into()),
            ..Config::default()
        };
        let options = RequestOptions {
            base_url: Some("http://127.0.0.1:9999".into()),
            location_id: Some("  LOC1 ".into()),
            company_id: Some("   ".into()),
            delay: Some(1.5),
            timeout: Some(-3.0),
            dry_run: Some(true),
            ..RequestOptions::default()
        };

        let derived = base.with_options(&options);

        assert_eq!(derived.base_url, "http://127.0.0.1:9999");
        assert_eq!(derived.location_id.as_deref(), Some("LOC1"));
        assert_eq!(derived.company_id, None);
        assert_eq!(derived.delay, Duration::from_millis(1500));
        assert_eq!(derived.timeout, Duration::from_secs(30));
        assert!(derived.dry_run);
        assert_eq!(derived.token.as_deref(), Some("secret"));
        assert_eq!(base.base_url, DEFAULT_BASE_URL);
        assert!(!base.dry_run);
    }

    #[test]
    fn zero_timeout_keeps_the_default() {
        let base = Config::default();
        for timeout in [0.0, -1.0, f64::NAN] {
            let derived = base.with_options(&RequestOptions {
                timeout: Some(timeout),
                delay: Some(0.0),
                ..RequestOptions::default()
            });
            assert_eq!(derived.timeout, DEFAULT_TIMEOUT, "{timeout}");
            assert_eq!(derived.delay, Duration::ZERO);
        }
        assert_eq!(timeout_seconds(2.5, DEFAULT_TIMEOUT), Duration::from_millis(2500));
    }

    #[test]
    fn bundled_templates_are_found() {
        let dir = resolve_template_dir(Path::new(DEFAULT_TEMPLATE_DIR));
        assert!(dir.join("vendedor.json").is_file());
        assert!(dir.join("administrador.json").is_file());

        let missing = Path::new("no/such/templates");
        assert_eq!(resolve_template_dir(missing), missing);
    }

    #[test]
    fn list_location_falls_back_to_company() {
        let config = Config {
            company_id: Some("C1".into()),
            ..Config::default()
        };
        assert_eq!(config.list_location(), Some("C1"));
    }
}
