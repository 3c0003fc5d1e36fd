//! Sample worksheet seeder for R-KAS development and demos.
//!
//! Seeds the local record cache with deterministic sample records, starting
//! with the worked example, and can also write them as a legacy CSV for
//! exercising the importer.
//!
//! Usage: cargo run --bin seeder -- --count 25

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::Parser;
use rkas_core::import::ImportService;
use rkas_core::sample;
use rkas_core::store::JsonFileStore;
use rkas_core::worksheet::{ImportMode, Worksheet};
use rkas_shared::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "seeder")]
#[command(about = "Seed the R-KAS worksheet with sample records")]
struct Args {
    /// Number of records to generate.
    #[arg(long, default_value_t = 25)]
    count: usize,

    /// Budget year of the generated records (defaults to the current year).
    #[arg(long)]
    year: Option<i32>,

    /// Keep existing records and add the samples after them.
    #[arg(long)]
    append: bool,

    /// Also write the samples as a legacy semicolon CSV to this path.
    #[arg(long)]
    legacy_csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,rkas_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    let year = args.year.unwrap_or_else(|| Utc::now().year());

    info!(count = args.count, year, "generating sample records");
    let records = sample::generate(year, args.count);

    if let Some(path) = &args.legacy_csv {
        let csv = ImportService::to_legacy_csv(&records)?;
        fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "legacy CSV written");
    }

    let records_path = config.storage.records_path();
    let mut sheet = Worksheet::open(JsonFileStore::new(&records_path))?;
    let mode = if args.append {
        ImportMode::Append
    } else {
        ImportMode::Replace
    };
    let seeded = sheet.import(records, mode)?;

    info!(
        seeded,
        total = sheet.len(),
        path = %records_path.display(),
        "seeding complete"
    );
    Ok(())
}
