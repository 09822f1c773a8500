use clap::Parser;
use env_logger::Env;
use ghl_importer::cli::{Cli, Command, ServeArgs};
use ghl_importer::commands::{create, list};
use ghl_importer::config::Config;
use ghl_importer::error::ImportResult;
use ghl_importer::server::run_server;
use log::error;
use std::process::ExitCode;

async fn serve(config: Config, args: &ServeArgs) -> ImportResult<u8> {
    run_server(config, args.port, !args.no_browser).await?;
    Ok(0)
}

#[actix_web::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    let config = cli.global.to_config();

    let result = match &cli.command {
        Command::Create(args) => create(config, args).await,
        Command::List(args) => list(config, args).await,
        Command::Serve(args) => serve(config, args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
