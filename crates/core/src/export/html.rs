//! HTML documents for the Excel and print exports.

use askama::Template;
use chrono::NaiveDate;
use rkas_shared::types::money::format_id_number;
use rust_decimal::Decimal;

use super::error::ExportError;
use crate::budget::{BudgetLineItem, Field, FieldKind, FieldValue};

/// One rendered table cell.
struct Cell {
    text: String,
    numeric: bool,
}

impl Cell {
    fn number(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: true,
        }
    }

    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: false,
        }
    }
}

/// Spreadsheet workbook as an HTML table with the Office namespaces.
#[derive(Template)]
#[template(path = "export/excel.html")]
struct ExcelTemplate<'a> {
    sheet: &'a str,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Printable report: heading, Indonesian-formatted table, totals row.
#[derive(Template)]
#[template(path = "export/print.html")]
struct PrintTemplate<'a> {
    title: &'a str,
    school_name: &'a str,
    generated_on: String,
    row_count: usize,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    totals: Vec<Cell>,
}

pub(super) fn excel_document(
    records: &[BudgetLineItem],
    columns: &[Field],
    sheet: &str,
) -> Result<String, ExportError> {
    let rows = records
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|&field| match item.get(field) {
                    FieldValue::Number(n) => Cell::number(n.normalize().to_string()),
                    FieldValue::Text(s) => Cell::text(s),
                })
                .collect()
        })
        .collect();

    let template = ExcelTemplate {
        sheet,
        headers: headers(columns),
        rows,
    };
    Ok(template.render()?)
}

pub(super) fn print_document(
    records: &[BudgetLineItem],
    columns: &[Field],
    title: &str,
    school_name: &str,
    generated_on: NaiveDate,
) -> Result<String, ExportError> {
    let rows = records
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|&field| match item.get(field) {
                    FieldValue::Number(n) if field == Field::Year => {
                        Cell::text(n.normalize().to_string())
                    }
                    FieldValue::Number(n) => Cell::number(format_id_number(n)),
                    FieldValue::Text(s) => Cell::text(s),
                })
                .collect()
        })
        .collect();

    let template = PrintTemplate {
        title,
        school_name: school_name.trim(),
        generated_on: generated_on.format("%d/%m/%Y").to_string(),
        row_count: records.len(),
        headers: headers(columns),
        rows,
        totals: totals(records, columns),
    };
    Ok(template.render()?)
}

fn headers(columns: &[Field]) -> Vec<String> {
    columns.iter().map(|field| field.label().to_string()).collect()
}

/// Sums amount columns; labels the first other column `TOTAL`.
fn totals(records: &[BudgetLineItem], columns: &[Field]) -> Vec<Cell> {
    columns
        .iter()
        .enumerate()
        .map(|(i, &field)| {
            if field.descriptor().kind == FieldKind::Amount {
                let total = records.iter().fold(Decimal::ZERO, |acc, item| {
                    acc.saturating_add(item.get(field).as_decimal())
                });
                Cell::number(format_id_number(total))
            } else if i == 0 {
                Cell::text("TOTAL")
            } else {
                Cell::text("")
            }
        })
        .collect()
}
