//! Import service.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rkas_shared::types::money::{format_id_decimal, parse_id_number};
use super::error::ImportError;
use crate::budget::{BudgetError, BudgetLineItem, BudgetService, Field, FieldValue, PureValue};

/// Column separator of the legacy CSV.
pub const LEGACY_DELIMITER: u8 = b';';

/// Legacy column layout after the leading row-number column: every schema
/// field in schema order.
#[must_use]
pub fn legacy_columns() -> &'static [Field] {
    Field::all()
}

/// Service for reading records from files.
pub struct ImportService;

impl ImportService {
    /// Reads the legacy CSV at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` if the file cannot be read or any row is rejected.
    pub fn legacy_csv_file(path: &Path) -> Result<Vec<BudgetLineItem>, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::legacy_csv(file)?;
        tracing::info!(path = %path.display(), count = records.len(), "legacy CSV imported");
        Ok(records)
    }

    /// Reads the legacy CSV: one header row, `;` separated, a row-number
    /// column, then [`legacy_columns`]. Extra trailing columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::ShortRow` for rows missing columns,
    /// `ImportError::InvalidNumber` for text in numeric columns, and
    /// `ImportError::InvalidRow` for rows that do not validate.
    pub fn legacy_csv(reader: impl Read) -> Result<Vec<BudgetLineItem>, ImportError> {
        let columns = legacy_columns();
        let expected = columns.len() + 1;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(LEGACY_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut items = Vec::new();
        for (row, fallback_line) in reader.records().zip(2u64..) {
            let row = row?;
            let line = row.position().map_or(fallback_line, csv::Position::line);
            if row.iter().all(str::is_empty) {
                tracing::debug!(line, "skipping blank row");
                continue;
            }
            if row.len() < expected {
                return Err(ImportError::ShortRow {
                    line,
                    expected,
                    found: row.len(),
                });
            }

            let mut item = BudgetLineItem::new();
            for (&field, cell) in columns.iter().zip(row.iter().skip(1)) {
                set_legacy_cell(&mut item, field, cell, line)?;
            }
            items.push(prepare_row(&item, line)?);
        }
        Ok(items)
    }

    /// Reads a JSON array of records, as written by the JSON export.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Json` for malformed input and
    /// `ImportError::InvalidRow` (numbered by array position) for records that
    /// do not validate.
    pub fn json(reader: impl Read) -> Result<Vec<BudgetLineItem>, ImportError> {
        let raw: Vec<BudgetLineItem> = serde_json::from_reader(reader)?;
        raw.iter()
            .zip(1u64..)
            .map(|(item, line)| prepare_row(item, line))
            .collect()
    }

    /// Reads the JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` if the file cannot be read or any record is rejected.
    pub fn json_file(path: &Path) -> Result<Vec<BudgetLineItem>, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::json(std::io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), count = records.len(), "JSON imported");
        Ok(records)
    }

    /// Writes records in the legacy layout, for templates and hand-offs to
    /// the legacy tool.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Csv` if the writer fails.
    pub fn to_legacy_csv(records: &[BudgetLineItem]) -> Result<String, ImportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(LEGACY_DELIMITER)
            .from_writer(Vec::new());

        let header = std::iter::once("No".to_string())
            .chain(legacy_columns().iter().map(|field| field.label()));
        writer.write_record(header)?;

        for (number, item) in (1u64..).zip(records) {
            let cells = std::iter::once(number.to_string()).chain(
                legacy_columns().iter().map(|&field| match item.get(field) {
                    FieldValue::Number(n) if field == Field::Year => n.to_string(),
                    FieldValue::Number(n) => format_id_decimal(n),
                    FieldValue::Text(s) => s.to_string(),
                }),
            );
            writer.write_record(cells)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| ImportError::Csv(err.into_error().into()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn set_legacy_cell(
    item: &mut BudgetLineItem,
    field: Field,
    cell: &str,
    line: u64,
) -> Result<(), ImportError> {
    if !field.descriptor().kind.is_numeric() {
        item.set_lenient(field, cell);
        return Ok(());
    }
    if cell.is_empty() {
        return Ok(());
    }
    let invalid = || ImportError::InvalidNumber {
        line,
        field,
        value: cell.to_string(),
    };
    let value = parse_id_number(cell).ok_or_else(invalid)?;
    if field == Field::Year && (!value.fract().is_zero() || value.is_sign_negative()) {
        return Err(invalid());
    }
    item.set_number(field, value);
    Ok(())
}

fn prepare_row(item: &BudgetLineItem, line: u64) -> Result<BudgetLineItem, ImportError> {
    BudgetService::prepare(item, PureValue::Keep).map_err(|err| match err {
        BudgetError::Invalid(errors) => ImportError::InvalidRow { line, errors },
        source => ImportError::Record { line, source },
    })
}
