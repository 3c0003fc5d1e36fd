//! Records shared by unit tests across the crate.

use rust_decimal_macros::dec;

use super::types::{Activity, BudgetLineItem, CodeName, Component};

/// The smallest consistent record: one planned and realized August
/// allocation of 1.000 for one unit at 1.000.
pub(crate) fn valid_item() -> BudgetLineItem {
    let mut item = BudgetLineItem::new();
    item.year = 2025;
    item.bidang = CodeName::new("02", "Kesiswaan");
    item.standard = CodeName::new("05", "Standar Pendidik dan Tenaga Kependidikan");
    item.activity = Activity {
        id: "KGT-001".to_string(),
        code: "05.02.01".to_string(),
        name: "Pengembangan Kompetensi Guru".to_string(),
        subtitle: "Pelatihan kurikulum".to_string(),
    };
    item.fund = CodeName::new("3.02", "BOS Reguler");
    item.account = CodeName::new("5.1.02.01.01.0024", "Belanja Alat Tulis Kantor");
    item.component = Component {
        id: "KMP-001".to_string(),
        code: "1.1.12.01.03.0004".to_string(),
        name: "Kertas HVS A4".to_string(),
    };
    item.unit = "Paket".to_string();
    item.tax_rate = "11%".to_string();
    item.coefficient = "1 Paket".to_string();
    item.volume = dec!(1);
    item.unit_price = dec!(1000);
    item.detail_value = dec!(1000);
    item.detail_value_pure = dec!(1000);
    item.planned.months[7] = dec!(1000);
    item.planned.quarters[2] = dec!(1000);
    item.planned.total = dec!(1000);
    item.actual.months[7] = dec!(1000);
    item.actual.quarters[2] = dec!(1000);
    item.actual.total = dec!(1000);
    item
}
