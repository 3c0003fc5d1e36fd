//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rkas_core::budget::Field;
use rkas_core::export::ExportFormat;
use rkas_core::query::RecordFilter;
use rkas_shared::types::RecordId;

#[derive(Parser, Debug)]
#[command(name = "rkas")]
#[command(about = "Kertas Kerja Perubahan: R-KAS budget worksheet")]
#[command(version)]
pub struct Cli {
    /// Override the data directory from configuration.
    #[arg(long, global = true, env = "RKAS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List records, filtered, sorted, and paginated.
    List(ListArgs),
    /// Show every field of one record.
    Show(ShowArgs),
    /// Add a record from field assignments or a draft file.
    Add(AddArgs),
    /// Change fields of one record.
    Edit(EditArgs),
    /// Delete records.
    Delete(DeleteArgs),
    /// Import a legacy CSV or a JSON export.
    Import(ImportArgs),
    /// Export records to a file.
    Export(ExportArgs),
    /// Validate a draft file, or every stored record.
    Validate(ValidateArgs),
    /// Show dashboard totals.
    Summary(SummaryArgs),
    /// Manage visible columns.
    Columns(ColumnsArgs),
}

/// Filter flags shared by listing and export.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Free-text search across codes, names, and specifications.
    #[arg(long, short)]
    pub search: Option<String>,
    /// Budget year.
    #[arg(long)]
    pub year: Option<i32>,
    /// Bidang code.
    #[arg(long)]
    pub bidang: Option<String>,
    /// Standard code.
    #[arg(long)]
    pub standard: Option<String>,
    /// Activity code.
    #[arg(long)]
    pub activity: Option<String>,
    /// Fund code.
    #[arg(long)]
    pub fund: Option<String>,
    /// Account code.
    #[arg(long)]
    pub account: Option<String>,
    /// Only records with an amount in this month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            search: self.search.clone(),
            year: self.year,
            bidang_code: self.bidang.clone(),
            standard_code: self.standard.clone(),
            activity_code: self.activity.clone(),
            fund_code: self.fund.clone(),
            account_code: self.account.clone(),
            month: self.month,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Field key to sort by, e.g. `unitPrice` or `plannedTotal`.
    #[arg(long, value_parser = parse_field)]
    pub sort: Option<Field>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page (defaults to the configured page size).
    #[arg(long)]
    pub per_page: Option<u32>,
    /// Print the page as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record id.
    pub id: RecordId,
    /// Print the record as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Field assignment `key=value`, repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(Field, String)>,
    /// JSON object of raw field values to start from.
    #[arg(long)]
    pub from: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Record id.
    pub id: RecordId,
    /// Field assignment `key=value`, repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment, required = true)]
    pub assignments: Vec<(Field, String)>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Record ids.
    #[arg(required_unless_present = "all")]
    pub ids: Vec<RecordId>,
    /// Delete every record.
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceFormat {
    /// Semicolon-separated legacy worksheet.
    Legacy,
    /// JSON array of records.
    Json,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File to import.
    pub file: PathBuf,
    /// Input format; guessed from the extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<SourceFormat>,
    /// Keep existing records instead of replacing them.
    #[arg(long)]
    pub append: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format: csv, json, excel, or print.
    #[arg(long, short, default_value = "csv", value_parser = parse_export_format)]
    pub format: ExportFormat,
    /// Output directory (defaults to the configured export directory).
    #[arg(long, short)]
    pub out: Option<PathBuf>,
    /// Export every schema field instead of the visible columns.
    #[arg(long)]
    pub all_columns: bool,
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON object of raw field values; validates stored records when omitted.
    pub draft: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print the dashboard as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ColumnsArgs {
    #[command(subcommand)]
    pub action: Option<ColumnsAction>,
}

#[derive(Subcommand, Debug)]
pub enum ColumnsAction {
    /// Print visible columns (default).
    List,
    /// Print every available field key.
    Available,
    /// Show columns.
    Show {
        /// Field keys.
        #[arg(required = true, value_parser = parse_field)]
        fields: Vec<Field>,
    },
    /// Hide columns.
    Hide {
        /// Field keys.
        #[arg(required = true, value_parser = parse_field)]
        fields: Vec<Field>,
    },
    /// Restore the default columns.
    Reset,
}

fn parse_field(raw: &str) -> Result<Field, String> {
    raw.trim().parse().map_err(|err| format!("{err}"))
}

fn parse_assignment(raw: &str) -> Result<(Field, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    Ok((parse_field(key)?, value.to_string()))
}

fn parse_export_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse().map_err(|err| format!("{err}"))
}
