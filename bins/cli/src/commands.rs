//! Subcommand handlers.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rkas_core::budget::{Draft, Field, validate};
use rkas_core::export::{ExportService, ReportHeader};
use rkas_core::import::ImportService;
use rkas_core::query::{RecordQuery, SortDirection, SortSpec};
use rkas_core::store::{ColumnSettings, JsonFileStore};
use rkas_core::worksheet::{ImportMode, Worksheet, WorksheetError};
use rkas_shared::AppConfig;
use rkas_shared::AppError;
use rkas_shared::types::PageRequest;

use crate::cli::{
    AddArgs, ColumnsAction, ColumnsArgs, Command, DeleteArgs, EditArgs, ExportArgs, ImportArgs,
    ListArgs, ShowArgs, SourceFormat, SummaryArgs, ValidateArgs,
};
use crate::render;

/// Resolved configuration for one invocation.
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(mut config: AppConfig, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            config.storage.data_dir = dir;
        }
        Self { config }
    }

    fn open(&self) -> Result<Worksheet<JsonFileStore>, AppError> {
        let store = JsonFileStore::new(self.config.storage.records_path());
        Ok(Worksheet::open(store)?)
    }

    fn columns(&self) -> Result<ColumnSettings, AppError> {
        ColumnSettings::load(self.config.storage.columns_path())
            .map_err(|err| AppError::Storage(err.to_string()))
    }

    pub fn run(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::List(args) => self.list(&args),
            Command::Show(args) => self.show(&args),
            Command::Add(args) => self.add(args),
            Command::Edit(args) => self.edit(&args),
            Command::Delete(args) => self.delete(&args),
            Command::Import(args) => self.import(&args),
            Command::Export(args) => self.export(&args),
            Command::Validate(args) => self.validate(&args),
            Command::Summary(args) => self.summary(&args),
            Command::Columns(args) => self.columns_command(args),
        }
    }

    fn list(&self, args: &ListArgs) -> anyhow::Result<()> {
        let sheet = self.open()?;
        let per_page = args.per_page.unwrap_or(self.config.display.page_size);
        let mut query = RecordQuery::new()
            .with_filter(args.filter.to_filter())
            .with_page(PageRequest::new(args.page, per_page));
        if let Some(field) = args.sort {
            let direction = if args.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            query = query.with_sort(SortSpec { field, direction });
        }

        let page = sheet.query(&query);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&page)?);
            return Ok(());
        }
        let columns = self.columns()?;
        print!("{}", render::table(&page.data, columns.fields()));
        println!("{}", render::page_footer(&page.meta));
        Ok(())
    }

    fn show(&self, args: &ShowArgs) -> anyhow::Result<()> {
        let sheet = self.open()?;
        let item = sheet
            .get(args.id)
            .ok_or_else(|| AppError::NotFound(format!("record {}", args.id)))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(item)?);
        } else {
            print!("{}", render::detail(item));
        }
        Ok(())
    }

    fn add(&self, args: AddArgs) -> anyhow::Result<()> {
        let mut draft = match &args.from {
            Some(path) => read_draft(path)?,
            None => Draft::new(),
        };
        for (field, raw) in args.assignments {
            draft.set(field, raw);
        }

        let mut sheet = self.open()?;
        let added = sheet.add(&draft).map_err(rejected)?;
        println!("Ditambahkan: {}", added.id);
        Ok(())
    }

    fn edit(&self, args: &EditArgs) -> anyhow::Result<()> {
        let mut sheet = self.open()?;
        let changes = args
            .assignments
            .iter()
            .map(|(field, raw)| (*field, raw.as_str()));
        let edited = sheet.edit_fields(args.id, changes).map_err(rejected)?;
        println!("Diperbarui: {}", edited.id);
        Ok(())
    }

    fn delete(&self, args: &DeleteArgs) -> anyhow::Result<()> {
        let mut sheet = self.open()?;
        if args.all {
            let count = sheet.len();
            sheet.clear().map_err(AppError::from)?;
            println!("Dihapus: {count} baris");
            return Ok(());
        }

        let removed = sheet.delete_many(&args.ids).map_err(AppError::from)?;
        if removed == 0 {
            return Err(AppError::NotFound("no matching records".to_string()).into());
        }
        if removed < args.ids.len() {
            tracing::warn!(requested = args.ids.len(), removed, "some ids were not found");
        }
        println!("Dihapus: {removed} baris");
        Ok(())
    }

    fn import(&self, args: &ImportArgs) -> anyhow::Result<()> {
        let format = args.format.unwrap_or_else(|| guess_format(&args.file));
        let items = match format {
            SourceFormat::Legacy => ImportService::legacy_csv_file(&args.file),
            SourceFormat::Json => ImportService::json_file(&args.file),
        }
        .map_err(AppError::from)?;

        let mode = if args.append {
            ImportMode::Append
        } else {
            ImportMode::Replace
        };
        let mut sheet = self.open()?;
        let count = sheet.import(items, mode).map_err(rejected)?;
        println!("Diimpor: {count} baris (total {})", sheet.len());
        Ok(())
    }

    fn export(&self, args: &ExportArgs) -> anyhow::Result<()> {
        let sheet = self.open()?;
        let query = RecordQuery::new().with_filter(args.filter.to_filter());
        let records: Vec<_> = query.select(sheet.records()).into_iter().cloned().collect();

        let columns = if args.all_columns {
            ColumnSettings::all()
        } else {
            self.columns()?
        };
        let header = ReportHeader::new(
            self.config.export.report_title.clone(),
            self.config.export.school_name.clone(),
        );
        let dir = args
            .out
            .clone()
            .unwrap_or_else(|| self.config.export.output_dir.clone());

        let path =
            ExportService::write_to_dir(&dir, args.format, &records, columns.fields(), &header)
                .map_err(AppError::from)?;
        println!("Diekspor: {} ({} baris)", path.display(), records.len());
        Ok(())
    }

    fn validate(&self, args: &ValidateArgs) -> anyhow::Result<()> {
        if let Some(path) = &args.draft {
            let outcome = read_draft(path)?.evaluate_new();
            if outcome.is_submittable() {
                println!("Valid");
                return Ok(());
            }
            eprint!("{}", render::errors(&outcome.errors));
            return Err(AppError::Validation(format!("{} field(s) failed", outcome.errors.len())).into());
        }

        let sheet = self.open()?;
        let mut failed = 0usize;
        for item in sheet.records() {
            let errors = validate(item);
            if !errors.is_empty() {
                failed += 1;
                eprintln!("{}:", item.id);
                eprint!("{}", render::errors(&errors));
            }
        }
        if failed > 0 {
            return Err(AppError::Validation(format!("{failed} record(s) failed")).into());
        }
        println!("Valid: {} baris", sheet.len());
        Ok(())
    }

    fn summary(&self, args: &SummaryArgs) -> anyhow::Result<()> {
        let dashboard = self.open()?.dashboard();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        } else {
            print!("{}", render::dashboard(&dashboard));
        }
        Ok(())
    }

    fn columns_command(&self, args: ColumnsArgs) -> anyhow::Result<()> {
        let path = self.config.storage.columns_path();
        let mut settings = self.columns()?;
        match args.action.unwrap_or(ColumnsAction::List) {
            ColumnsAction::List => {
                print_fields(settings.fields());
                return Ok(());
            }
            ColumnsAction::Available => {
                print_fields(Field::all());
                return Ok(());
            }
            ColumnsAction::Show { fields } => fields.into_iter().for_each(|f| settings.show(f)),
            ColumnsAction::Hide { fields } => fields.into_iter().for_each(|f| settings.hide(f)),
            ColumnsAction::Reset => settings = ColumnSettings::default(),
        }
        settings
            .save(&path)
            .map_err(|err| AppError::Storage(err.to_string()))?;
        print_fields(settings.fields());
        Ok(())
    }
}

fn print_fields(fields: &[Field]) {
    for field in fields {
        println!("{field:<20} {}", field.label());
    }
}

fn read_draft(path: &Path) -> anyhow::Result<Draft> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let draft = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| AppError::InvalidInput(format!("{}: {err}", path.display())))?;
    Ok(draft)
}

fn guess_format(path: &Path) -> SourceFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
        _ => SourceFormat::Legacy,
    }
}

/// Prints per-field messages for validation failures before converting.
fn rejected(err: WorksheetError) -> AppError {
    if let WorksheetError::Invalid(errors) = &err {
        eprint!("{}", render::errors(errors));
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format(Path::new("rkas.JSON")), SourceFormat::Json);
        assert_eq!(guess_format(Path::new("kertas-kerja.csv")), SourceFormat::Legacy);
        assert_eq!(guess_format(Path::new("tanpa-ekstensi")), SourceFormat::Legacy);
    }

    #[test]
    fn test_data_dir_override() {
        let ctx = App::new(AppConfig::default(), Some(PathBuf::from("/tmp/rkas")));
        assert_eq!(ctx.config.storage.records_path(), PathBuf::from("/tmp/rkas/records.json"));
    }
}
