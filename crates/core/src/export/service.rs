//! Export service.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use super::error::ExportError;
use super::format::ExportFormat;
use super::html;
use crate::budget::{BudgetLineItem, Field};

/// Heading printed on HTML exports.
#[derive(Debug, Clone)]
pub struct ReportHeader {
    /// Report title.
    pub title: String,
    /// School name; omitted when empty.
    pub school_name: String,
    /// Date printed on the report and used in file names.
    pub generated_on: NaiveDate,
}

impl ReportHeader {
    /// Creates a header dated today.
    #[must_use]
    pub fn new(title: impl Into<String>, school_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            school_name: school_name.into(),
            generated_on: Utc::now().date_naive(),
        }
    }
}

/// Service for rendering records into export formats.
pub struct ExportService;

impl ExportService {
    /// Renders `records` in `format`.
    ///
    /// JSON exports carry full records; the other formats show `columns`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if an encoder fails.
    pub fn render(
        format: ExportFormat,
        records: &[BudgetLineItem],
        columns: &[Field],
        header: &ReportHeader,
    ) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => Self::to_csv(records, columns),
            ExportFormat::Json => Self::to_json(records),
            ExportFormat::Excel => html::excel_document(records, columns, &header.title),
            ExportFormat::Print => html::print_document(
                records,
                columns,
                &header.title,
                &header.school_name,
                header.generated_on,
            ),
        }
    }

    /// Comma-separated values with a header row of field labels.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Csv` if the writer fails.
    pub fn to_csv(records: &[BudgetLineItem], columns: &[Field]) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(columns.iter().map(|field| field.label()))?;
        for item in records {
            writer.write_record(columns.iter().map(|&field| item.get(field).to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| ExportError::Encoding(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| ExportError::Encoding(err.to_string()))
    }

    /// Pretty-printed JSON array of full records.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Json` if encoding fails.
    pub fn to_json(records: &[BudgetLineItem]) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(records)?)
    }

    /// Renders and writes an export into `dir` under its dated file name.
    /// Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering or writing fails.
    pub fn write_to_dir(
        dir: &Path,
        format: ExportFormat,
        records: &[BudgetLineItem],
        columns: &[Field],
        header: &ReportHeader,
    ) -> Result<PathBuf, ExportError> {
        let body = Self::render(format, records, columns, header)?;
        let path = dir.join(format.filename(header.generated_on));
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, body).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), %format, count = records.len(), "export written");
        Ok(path)
    }
}
