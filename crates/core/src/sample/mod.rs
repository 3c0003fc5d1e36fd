//! Deterministic sample records for demos and development.
//!
//! Records are built from small classification catalogs by index, so the
//! same `(year, count)` always yields the same worksheet content (ids and
//! timestamps aside). Output has derived fields refreshed and validates
//! clean; callers still hand it to the worksheet, which applies the usual
//! submission gate.

use rust_decimal::Decimal;

use crate::budget::{
    Activity, BudgetLineItem, CodeName, Component, MONTHS, PureValue, recompute_with,
};

const BIDANG: [(&str, &str); 4] = [
    ("01", "Kurikulum"),
    ("02", "Kesiswaan"),
    ("03", "Sarana dan Prasarana"),
    ("04", "Hubungan Masyarakat"),
];

const STANDARDS: [(&str, &str); 4] = [
    ("02", "Standar Isi"),
    ("03", "Standar Proses"),
    ("05", "Standar Pendidik dan Tenaga Kependidikan"),
    ("06", "Standar Sarana dan Prasarana"),
];

const ACTIVITIES: [(&str, &str, &str); 5] = [
    ("02.02.01", "Pengembangan Perpustakaan", "Pengadaan buku teks"),
    ("03.03.02", "Pelaksanaan Kegiatan Pembelajaran", "Kegiatan harian"),
    ("05.02.01", "Pengembangan Kompetensi Guru", "Pelatihan kurikulum"),
    ("06.01.03", "Pemeliharaan Sarana Sekolah", "Perawatan ruang kelas"),
    ("03.06.01", "Pelaksanaan Asesmen Sekolah", "Penilaian akhir semester"),
];

const FUNDS: [(&str, &str); 2] = [("3.02", "BOS Reguler"), ("3.03", "BOS Kinerja")];

const ACCOUNTS: [(&str, &str); 4] = [
    ("5.1.02.01.01.0024", "Belanja Alat Tulis Kantor"),
    ("5.1.02.01.01.0026", "Belanja Bahan Cetak"),
    ("5.1.02.02.01.0011", "Belanja Jasa Tenaga Pendidikan"),
    ("5.1.02.03.02.0035", "Belanja Pemeliharaan Gedung"),
];

/// Component catalog: code, name, unit, unit price.
const COMPONENTS: [(&str, &str, &str, i64); 6] = [
    ("1.1.12.01.03.0004", "Kertas HVS A4 70 gram", "Rim", 52_000),
    ("1.1.12.01.03.0012", "Tinta Printer", "Botol", 85_000),
    ("1.1.12.01.01.0007", "Buku Tulis", "Pak", 45_500),
    ("1.1.12.02.01.0003", "Honor Narasumber", "OJ", 900_000),
    ("1.1.12.03.02.0015", "Cat Tembok", "Kaleng", 214_245),
    ("1.1.12.01.03.0020", "Map Plastik", "Lusin", 36_000),
];

/// Realized share of each planned month, in percent, cycled per record.
const REALIZATION: [i64; 5] = [0, 25, 50, 100, 75];

/// The worked example from the legacy fixtures: four units at 214.245
/// planned in January and August, nothing realized.
#[must_use]
pub fn worked_example(year: i32) -> BudgetLineItem {
    let mut item = base_record(year, 3, 4);
    item.volume = Decimal::from(4);
    item.unit_price = Decimal::from(214_245);
    item.coefficient = "4 Kaleng".to_string();
    item.planned.months[0] = Decimal::from(102_838);
    item.planned.months[7] = Decimal::from(959_818);
    recompute_with(&item, PureValue::Mirror)
}

/// Generates `count` records for `year`, starting with [`worked_example`].
#[must_use]
pub fn generate(year: i32, count: usize) -> Vec<BudgetLineItem> {
    let mut records = Vec::with_capacity(count);
    if count == 0 {
        return records;
    }
    records.push(worked_example(year));
    records.extend((1..count).map(|i| generated(year, i)));
    records
}

fn generated(year: i32, i: usize) -> BudgetLineItem {
    let component = i % COMPONENTS.len();
    let mut item = base_record(year, i, component);

    let (_, _, unit, price) = COMPONENTS[component];
    let volume = Decimal::from(i % 9 + 1);
    item.volume = volume;
    item.unit_price = Decimal::from(price);
    item.coefficient = format!("{volume} {unit}");

    // Spread the detail value over two months, the later one taking the rest.
    let detail = volume * item.unit_price;
    let first = i % MONTHS;
    let second = (first + 4 + i % 3) % MONTHS;
    let half = (detail / Decimal::TWO).floor();
    item.planned.months[first] = half;
    item.planned.months[second] += detail - half;

    let share = Decimal::from(REALIZATION[i % REALIZATION.len()]);
    for m in [first, second] {
        item.actual.months[m] = (item.planned.months[m] * share / Decimal::ONE_HUNDRED).floor();
    }
    recompute_with(&item, PureValue::Mirror)
}

fn base_record(year: i32, i: usize, component: usize) -> BudgetLineItem {
    let (bidang_code, bidang_name) = BIDANG[i % BIDANG.len()];
    let (standard_code, standard_name) = STANDARDS[i % STANDARDS.len()];
    let (activity_code, activity_name, subtitle) = ACTIVITIES[i % ACTIVITIES.len()];
    let (fund_code, fund_name) = FUNDS[i % FUNDS.len()];
    let (account_code, account_name) = ACCOUNTS[i % ACCOUNTS.len()];
    let (component_code, component_name, unit, _) = COMPONENTS[component];

    let mut item = BudgetLineItem::new();
    item.year = year;
    item.bidang = CodeName::new(bidang_code, bidang_name);
    item.standard = CodeName::new(standard_code, standard_name);
    item.activity = Activity {
        id: format!("KGT-{:03}", i % ACTIVITIES.len() + 1),
        code: activity_code.to_string(),
        name: activity_name.to_string(),
        subtitle: subtitle.to_string(),
    };
    item.fund = CodeName::new(fund_code, fund_name);
    item.account = CodeName::new(account_code, account_name);
    item.component = Component {
        id: format!("KMP-{:03}", component + 1),
        code: component_code.to_string(),
        name: component_name.to_string(),
    };
    item.unit = unit.to_string();
    item.tax_rate = if i % 2 == 0 { "11%" } else { "0%" }.to_string();
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::validate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_worked_example_totals() {
        let item = worked_example(2025);

        assert_eq!(item.detail_value, dec!(856980));
        assert_eq!(item.detail_value_pure, dec!(856980));
        assert_eq!(item.planned.quarters, [dec!(102838), dec!(0), dec!(959818), dec!(0)]);
        assert_eq!(item.planned.total, dec!(1062656));
        assert_eq!(item.actual.total, dec!(0));
        assert!(validate(&item).is_empty(), "{}", validate(&item));
    }

    #[test]
    fn test_generated_records_validate() {
        let items = generate(2025, 40);
        for item in &items {
            let errors = validate(item);
            assert!(errors.is_empty(), "{}: {errors}", item.component.name);
            assert!(item.actual.total <= item.planned.total);
        }
        // The worked example plans more than its detail value.
        for item in &items[1..] {
            assert_eq!(item.planned.total, item.detail_value, "{}", item.component.name);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let strip = |items: Vec<BudgetLineItem>| -> Vec<_> {
            items
                .into_iter()
                .map(|item| (item.activity.code, item.component.name, item.planned.months, item.actual.months))
                .collect()
        };
        assert_eq!(strip(generate(2025, 12)), strip(generate(2025, 12)));
    }

    #[test]
    fn test_count() {
        assert!(generate(2025, 0).is_empty());
        assert_eq!(generate(2025, 1).len(), 1);
        assert_eq!(generate(2025, 7).len(), 7);
    }
}
