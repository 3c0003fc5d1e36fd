//! Export formats.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ExportError;

/// Base name of exported files.
const FILE_STEM: &str = "kertas-kerja-perubahan";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values with a label header.
    Csv,
    /// JSON array of full records.
    Json,
    /// HTML table that spreadsheet software opens as a workbook.
    Excel,
    /// Printable HTML report with a totals row.
    Print,
}

impl ExportFormat {
    /// Every format.
    pub const ALL: [Self; 4] = [Self::Csv, Self::Json, Self::Excel, Self::Print];

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Excel => "xls",
            Self::Print => "html",
        }
    }

    /// MIME type of the rendered output.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Json => "application/json",
            Self::Excel => "application/vnd.ms-excel",
            Self::Print => "text/html;charset=utf-8",
        }
    }

    /// Dated file name such as `kertas-kerja-perubahan-2025-08-17.csv`.
    #[must_use]
    pub fn filename(self, date: NaiveDate) -> String {
        format!("{FILE_STEM}-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Excel => "excel",
            Self::Print => "print",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "excel" | "xls" => Ok(Self::Excel),
            "print" | "pdf" | "html" => Ok(Self::Print),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        assert_eq!(ExportFormat::Csv.filename(date), "kertas-kerja-perubahan-2025-08-17.csv");
        assert_eq!(ExportFormat::Excel.filename(date), "kertas-kerja-perubahan-2025-08-17.xls");
    }

    #[test]
    fn test_parse_names() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Print);
        assert!(matches!("docx".parse::<ExportFormat>(), Err(ExportError::UnknownFormat(_))));
    }
}
