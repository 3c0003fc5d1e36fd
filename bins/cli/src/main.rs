//! R-KAS command-line front end.
//!
//! Lists, edits, imports, and exports the Kertas Kerja Perubahan worksheet
//! kept in the local data directory.

mod cli;
mod commands;
mod render;

use std::process::ExitCode;

use clap::Parser;
use rkas_shared::{AppConfig, AppError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::App;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rkas=info,rkas_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            match err.downcast_ref::<AppError>() {
                Some(app) => eprintln!("error [{}]: {app}", app.error_code()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(AppError::from)?;
    App::new(config, cli.data_dir).run(cli.command)
}
