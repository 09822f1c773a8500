//! The `create` and `list` subcommands. Each returns the process exit code for
//! a completed run; errors carry their own code via [`ImportError::exit_code`].

use crate::cli::{CreateArgs, ListArgs};
use crate::config::Config;
use crate::error::{ImportError, ImportResult};
use crate::services::batch::runner::run_batch;
use crate::services::export::list::export_users;
use std::fs;
use std::path::Path;

/// Reads the input CSV. A missing file and undecodable contents (e.g. a Latin-1
/// export) are both configuration errors.
pub fn read_csv_file(path: &Path) -> ImportResult<String> {
    if !path.exists() {
        return Err(ImportError::CsvNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| ImportError::UnreadableCsv {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn create(config: Config, args: &CreateArgs) -> ImportResult<u8> {
    let config = args.apply(config);
    let path = args.csv.as_deref().ok_or(ImportError::MissingCsv)?;
    let text = read_csv_file(path)?;

    let outcome = run_batch(&config, &text).await?;
    println!(
        "Done. Success: {}, Failed: {}",
        outcome.summary.success, outcome.summary.failed
    );
    Ok(if outcome.summary.failed == 0 { 0 } else { 1 })
}

pub async fn list(config: Config, args: &ListArgs) -> ImportResult<u8> {
    let config = args.apply(config);
    let outcome = export_users(&config, true).await?;
    println!(
        "Users stored for {}: {} (total reported: {}) -> {}, {}",
        outcome.location_id,
        outcome.users.len(),
        outcome.total,
        config.users_json.display(),
        config.users_csv.display()
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(csv: Option<PathBuf>) -> CreateArgs {
        CreateArgs {
            csv,
            dry_run: true,
            stop_on_error: false,
        }
    }

    fn config(dir: &TempDir) -> Config {
        fs::write(
            dir.path().join("vendedor.json"),
            r#"{"type": "account", "role": "user", "roles": {"locationIds": ["L1"]}}"#,
        )
        .unwrap();
        Config {
            template_dir: dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn missing_csv_argument_exits_with_config_code() {
        let dir = TempDir::new().unwrap();
        let err = create(config(&dir), &args(None)).await.unwrap_err();
        assert!(matches!(err, ImportError::MissingCsv));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn absent_csv_file_exits_with_config_code() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");
        let err = create(config(&dir), &args(Some(path))).await.unwrap_err();
        assert!(matches!(err, ImportError::CsvNotFound(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn latin1_csv_exits_with_config_code() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.csv");
        fs::write(&path, b"Nome,Email,Telefone,Cargo\nJo\xe3o,j@x.com,111,Vendedor\n").unwrap();

        let err = create(config(&dir), &args(Some(path))).await.unwrap_err();
        assert!(matches!(err, ImportError::UnreadableCsv { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn exit_code_reflects_row_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, "Nome,Email,Telefone,Cargo\nAna Lima,a@x.com,111,Vendedor\n").unwrap();
        assert_eq!(create(config(&dir), &args(Some(good))).await.unwrap(), 0);

        let mixed = dir.path().join("mixed.csv");
        fs::write(
            &mixed,
            "Nome,Email,Telefone,Cargo\nAna Lima,a@x.com,111,Vendedor\nBia,b@x.com,222,Gerente\n",
        )
        .unwrap();
        assert_eq!(create(config(&dir), &args(Some(mixed))).await.unwrap(), 1);
    }
}
