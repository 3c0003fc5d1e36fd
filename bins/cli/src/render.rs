//! Plain-text rendering for terminal output.

use std::fmt::Write;

use rkas_core::budget::{BudgetLineItem, Field, FieldValue, ValidationErrors};
use rkas_core::dashboard::Dashboard;
use rkas_shared::types::money::format_id_number;
use rkas_shared::types::{PageMeta, Rupiah};

/// Widest a text cell may get before it is cut.
const MAX_CELL: usize = 32;

/// Renders a table of `records` showing `columns`, prefixed by the id.
pub fn table(records: &[BudgetLineItem], columns: &[Field]) -> String {
    let mut header = vec!["ID".to_string()];
    header.extend(columns.iter().map(|field| field.label()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|item| {
            std::iter::once(item.id.to_string())
                .chain(columns.iter().map(|&field| cell(item, field)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let numeric: Vec<bool> = std::iter::once(false)
        .chain(columns.iter().map(|field| field.descriptor().kind.is_numeric()))
        .collect();

    let mut out = String::new();
    push_row(&mut out, &header, &widths, &[]);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths, &[]);
    for row in &rows {
        push_row(&mut out, row, &widths, &numeric);
    }
    out
}

fn cell(item: &BudgetLineItem, field: Field) -> String {
    match item.get(field) {
        FieldValue::Number(n) if field == Field::Year => n.to_string(),
        FieldValue::Number(n) => format_id_number(n),
        FieldValue::Text(s) if s.chars().count() > MAX_CELL => {
            let cut: String = s.chars().take(MAX_CELL - 1).collect();
            format!("{cut}…")
        }
        FieldValue::Text(s) => s.to_string(),
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize], numeric: &[bool]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (value, &width))| {
            if numeric.get(i).copied().unwrap_or(false) {
                format!("{value:>width$}")
            } else {
                format!("{value:<width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Page position line shown under a listing.
pub fn page_footer(meta: &PageMeta) -> String {
    format!(
        "Halaman {} dari {} ({} baris)",
        meta.page, meta.total_pages, meta.total
    )
}

/// Every field of one record as `label: value` lines.
pub fn detail(item: &BudgetLineItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", item.id);
    for &field in Field::all() {
        let value = item.get(field);
        if value.is_blank() {
            continue;
        }
        let _ = writeln!(out, "{} ({field}): {}", field.label(), cell_full(item, field));
    }
    let _ = writeln!(out, "Realisasi: {}%", item.realization_percent());
    let _ = writeln!(out, "Dibuat: {}", item.created_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out, "Diubah: {}", item.updated_at.format("%Y-%m-%d %H:%M"));
    out
}

fn cell_full(item: &BudgetLineItem, field: Field) -> String {
    match item.get(field) {
        FieldValue::Number(n) if field == Field::Year => n.to_string(),
        FieldValue::Number(n) => format_id_number(n),
        FieldValue::Text(s) => s.to_string(),
    }
}

/// Validation failures, one per line.
pub fn errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}

/// Dashboard totals and breakdowns.
pub fn dashboard(dashboard: &Dashboard) -> String {
    let summary = &dashboard.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Jumlah baris     : {}", summary.record_count);
    let _ = writeln!(out, "Nilai rincian    : {}", Rupiah::new(summary.total_detail_value));
    let _ = writeln!(out, "Total AKB        : {}", Rupiah::new(summary.total_planned));
    let _ = writeln!(out, "Total realisasi  : {}", Rupiah::new(summary.total_actual));
    let _ = writeln!(out, "Sisa anggaran    : {}", Rupiah::new(summary.remaining));
    let _ = writeln!(out, "Realisasi        : {}%", summary.realization_percent);
    if summary.over_budget_count > 0 {
        let _ = writeln!(out, "Melebihi AKB     : {} baris", summary.over_budget_count);
    }

    out.push_str("\nPer triwulan\n");
    for point in &dashboard.by_quarter {
        let _ = writeln!(
            out,
            "  {:<10} {:>20} {:>20}",
            point.label,
            format_id_number(point.planned),
            format_id_number(point.actual)
        );
    }

    out.push_str("\nPer bulan\n");
    for point in &dashboard.by_month {
        let _ = writeln!(
            out,
            "  {:<10} {:>20} {:>20}",
            point.label,
            format_id_number(point.planned),
            format_id_number(point.actual)
        );
    }

    out.push_str("\nPer bidang\n");
    for row in &dashboard.by_bidang {
        let _ = writeln!(
            out,
            "  {:<4} {:<28} {:>4} baris {:>20} {:>8}%",
            row.code,
            row.name,
            row.record_count,
            format_id_number(row.variance.planned),
            row.variance.realization_percent
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rkas_core::budget::Series;
    use rkas_core::dashboard::DashboardService;
    use rkas_core::sample;

    #[test]
    fn test_table_aligns_numbers_right() {
        let records = sample::generate(2025, 2);
        let text = table(&records, &[Field::ComponentName, Field::Total(Series::Planned)]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Nama Komponen"));
        assert!(lines[2].ends_with("1.062.656"));
    }

    #[test]
    fn test_detail_skips_blank_text() {
        let item = sample::worked_example(2025);
        let text = detail(&item);

        assert!(text.contains("Harga Satuan (unitPrice): 214.245"));
        assert!(!text.contains("(brand)"));
        assert!(text.contains("Realisasi: 0"));
    }

    #[test]
    fn test_dashboard_text() {
        let records = sample::generate(2025, 5);
        let text = dashboard(&DashboardService::build(&records));
        assert!(text.contains("Jumlah baris     : 5"));
        assert!(text.contains("TW 3"));
        assert!(text.contains("Agustus"));
    }
}
