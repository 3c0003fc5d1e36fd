//! Field descriptors and typed field access for budget line items.
//!
//! Column-driven code (sorting, filtering, CSV/HTML export, the legacy
//! import, and the CLI `edit --set`) iterates over [`Field::all`] and reads
//! or writes values through [`BudgetLineItem::get`] / [`BudgetLineItem::set`]
//! instead of naming every struct field.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rkas_shared::types::money::parse_plain_number;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::BudgetError;
use super::types::{BudgetLineItem, MONTHS, QUARTERS, Series};

/// Upper bound for any monetary amount.
pub const MAX_AMOUNT: i64 = 999_999_999_999;

/// Upper bound for volume / quantity fields.
pub const MAX_QUANTITY: i64 = 999_999;

/// Accepted budget years.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

/// A scalar field of [`BudgetLineItem`], keyed by a stable camelCase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// `year`
    Year,
    /// `bidangCode`
    BidangCode,
    /// `bidangName`
    BidangName,
    /// `standardCode`
    StandardCode,
    /// `standardName`
    StandardName,
    /// `activityId`
    ActivityId,
    /// `activityCode`
    ActivityCode,
    /// `activityName`
    ActivityName,
    /// `activitySubtitle`
    ActivitySubtitle,
    /// `fundCode`
    FundCode,
    /// `fundName`
    FundName,
    /// `accountCode`
    AccountCode,
    /// `accountName`
    AccountName,
    /// `componentId`
    ComponentId,
    /// `componentCode`
    ComponentCode,
    /// `componentName`
    ComponentName,
    /// `unit`
    Unit,
    /// `brand`
    Brand,
    /// `spec`
    Spec,
    /// `taxRate`
    TaxRate,
    /// `volume`
    Volume,
    /// `unitPrice`
    UnitPrice,
    /// `coefficient`
    Coefficient,
    /// `detailValuePure`
    DetailValuePure,
    /// `detailValue`
    DetailValue,
    /// `plannedMonthN` / `actualMonthN`, month 1..=12.
    Month(Series, u8),
    /// `plannedQuarterN` / `actualQuarterN`, quarter 1..=4.
    Quarter(Series, u8),
    /// `plannedTotal` / `actualTotal`.
    Total(Series),
}

/// How a field is stored and which rules apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Budget year.
    Year,
    /// Classification code restricted to digits, dots, and uppercase letters.
    Code,
    /// Short text.
    Text,
    /// Free text, exempt from pattern rules.
    FreeText,
    /// Percentage token such as `11%`.
    Percent,
    /// Quantity bounded by [`MAX_QUANTITY`].
    Quantity,
    /// Monetary amount bounded by [`MAX_AMOUNT`].
    Amount,
}

impl FieldKind {
    /// Returns true for numeric kinds.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Year | Self::Quantity | Self::Amount)
    }
}

/// Constraints attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field.
    pub field: Field,
    /// Storage kind.
    pub kind: FieldKind,
    /// Must be non-empty.
    pub required: bool,
    /// Minimum character count for non-empty values.
    pub min_len: Option<usize>,
    /// Maximum character count.
    pub max_len: Option<usize>,
}

impl FieldDescriptor {
    const fn new(field: Field, kind: FieldKind) -> Self {
        Self {
            field,
            kind,
            required: false,
            min_len: None,
            max_len: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn len(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_len = min;
        self.max_len = max;
        self
    }

    /// Inclusive numeric ceiling for numeric kinds.
    #[must_use]
    pub fn max_value(&self) -> Option<Decimal> {
        match self.kind {
            FieldKind::Amount => Some(Decimal::from(MAX_AMOUNT)),
            FieldKind::Quantity => Some(Decimal::from(MAX_QUANTITY)),
            FieldKind::Year => Some(Decimal::from(*YEAR_RANGE.end())),
            _ => None,
        }
    }
}

static ALL_FIELDS: LazyLock<Vec<Field>> = LazyLock::new(|| {
    let mut fields = vec![
        Field::Year,
        Field::BidangCode,
        Field::BidangName,
        Field::StandardCode,
        Field::StandardName,
        Field::ActivityId,
        Field::ActivityCode,
        Field::ActivityName,
        Field::ActivitySubtitle,
        Field::FundCode,
        Field::FundName,
        Field::AccountCode,
        Field::AccountName,
        Field::ComponentId,
        Field::ComponentCode,
        Field::ComponentName,
        Field::Unit,
        Field::Brand,
        Field::Spec,
        Field::TaxRate,
        Field::Volume,
        Field::UnitPrice,
        Field::Coefficient,
        Field::DetailValuePure,
        Field::DetailValue,
    ];
    for series in [Series::Planned, Series::Actual] {
        fields.extend((1..=MONTHS as u8).map(|m| Field::Month(series, m)));
        fields.extend((1..=QUARTERS as u8).map(|q| Field::Quarter(series, q)));
        fields.push(Field::Total(series));
    }
    fields
});

impl Field {
    /// Every field in display order: identity, classification, pricing,
    /// then the planned and actual series.
    #[must_use]
    pub fn all() -> &'static [Field] {
        &ALL_FIELDS
    }

    /// Planned month field, 1-based.
    #[must_use]
    pub const fn planned_month(month: u8) -> Self {
        Self::Month(Series::Planned, month)
    }

    /// Actual month field, 1-based.
    #[must_use]
    pub const fn actual_month(month: u8) -> Self {
        Self::Month(Series::Actual, month)
    }

    /// Planned quarter field, 1-based.
    #[must_use]
    pub const fn planned_quarter(quarter: u8) -> Self {
        Self::Quarter(Series::Planned, quarter)
    }

    /// Actual quarter field, 1-based.
    #[must_use]
    pub const fn actual_quarter(quarter: u8) -> Self {
        Self::Quarter(Series::Actual, quarter)
    }

    /// Stable camelCase key.
    #[must_use]
    pub fn key(self) -> String {
        self.to_string()
    }

    /// Indonesian label shown in tables, exports, and messages.
    #[must_use]
    pub fn label(self) -> String {
        let fixed = match self {
            Self::Year => "Tahun",
            Self::BidangCode => "Kode Bidang",
            Self::BidangName => "Nama Bidang",
            Self::StandardCode => "Kode Standar",
            Self::StandardName => "Nama Standar",
            Self::ActivityId => "ID Kegiatan",
            Self::ActivityCode => "Kode Kegiatan",
            Self::ActivityName => "Nama Kegiatan",
            Self::ActivitySubtitle => "Subjudul Kegiatan",
            Self::FundCode => "Kode Dana",
            Self::FundName => "Nama Dana",
            Self::AccountCode => "Kode Rekening",
            Self::AccountName => "Nama Rekening",
            Self::ComponentId => "ID Komponen",
            Self::ComponentCode => "Kode Komponen",
            Self::ComponentName => "Nama Komponen",
            Self::Unit => "Satuan",
            Self::Brand => "Merk",
            Self::Spec => "Spesifikasi",
            Self::TaxRate => "Pajak",
            Self::Volume => "Volume",
            Self::UnitPrice => "Harga Satuan",
            Self::Coefficient => "Koefisien",
            Self::DetailValuePure => "Nilai Rincian Murni",
            Self::DetailValue => "Nilai Rincian",
            Self::Month(series, m) => return format!("{} Bulan {m}", series_label(series)),
            Self::Quarter(series, q) => return format!("{} TW {q}", series_label(series)),
            Self::Total(series) => return format!("Total {}", series_label(series)),
        };
        fixed.to_string()
    }

    /// Constraints for this field.
    #[must_use]
    pub const fn descriptor(self) -> FieldDescriptor {
        use FieldKind::{Amount, Code, FreeText, Percent, Quantity, Text};

        match self {
            Self::Year => FieldDescriptor::new(self, FieldKind::Year),
            Self::BidangCode
            | Self::StandardCode
            | Self::ActivityCode
            | Self::FundCode
            | Self::AccountCode => FieldDescriptor::new(self, Code)
                .required()
                .len(None, Some(50)),
            Self::ComponentCode => FieldDescriptor::new(self, Code).len(None, Some(50)),
            Self::BidangName
            | Self::StandardName
            | Self::ActivityName
            | Self::FundName
            | Self::AccountName
            | Self::ComponentName => FieldDescriptor::new(self, Text)
                .required()
                .len(Some(3), Some(255)),
            Self::ActivityId | Self::ComponentId => {
                FieldDescriptor::new(self, Text).len(None, Some(64))
            }
            Self::ActivitySubtitle => FieldDescriptor::new(self, FreeText).len(Some(3), None),
            Self::Unit => FieldDescriptor::new(self, Text).required().len(None, Some(50)),
            Self::Brand => FieldDescriptor::new(self, Text).len(None, Some(100)),
            Self::Spec => FieldDescriptor::new(self, FreeText).len(None, Some(1000)),
            Self::TaxRate => FieldDescriptor::new(self, Percent).len(None, Some(10)),
            Self::Coefficient => FieldDescriptor::new(self, FreeText).len(None, Some(100)),
            Self::Volume => FieldDescriptor::new(self, Quantity),
            Self::UnitPrice
            | Self::DetailValuePure
            | Self::DetailValue
            | Self::Month(..)
            | Self::Quarter(..)
            | Self::Total(_) => FieldDescriptor::new(self, Amount),
        }
    }

    /// Returns true for fields the calculator overwrites.
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::DetailValue | Self::Quarter(..) | Self::Total(_))
    }
}

const fn series_label(series: Series) -> &'static str {
    match series {
        Series::Planned => "AKB",
        Series::Actual => "Realisasi",
    }
}

const fn series_prefix(series: Series) -> &'static str {
    match series {
        Series::Planned => "planned",
        Series::Actual => "actual",
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = match self {
            Self::Year => "year",
            Self::BidangCode => "bidangCode",
            Self::BidangName => "bidangName",
            Self::StandardCode => "standardCode",
            Self::StandardName => "standardName",
            Self::ActivityId => "activityId",
            Self::ActivityCode => "activityCode",
            Self::ActivityName => "activityName",
            Self::ActivitySubtitle => "activitySubtitle",
            Self::FundCode => "fundCode",
            Self::FundName => "fundName",
            Self::AccountCode => "accountCode",
            Self::AccountName => "accountName",
            Self::ComponentId => "componentId",
            Self::ComponentCode => "componentCode",
            Self::ComponentName => "componentName",
            Self::Unit => "unit",
            Self::Brand => "brand",
            Self::Spec => "spec",
            Self::TaxRate => "taxRate",
            Self::Volume => "volume",
            Self::UnitPrice => "unitPrice",
            Self::Coefficient => "coefficient",
            Self::DetailValuePure => "detailValuePure",
            Self::DetailValue => "detailValue",
            Self::Month(series, m) => return write!(f, "{}Month{m}", series_prefix(*series)),
            Self::Quarter(series, q) => {
                return write!(f, "{}Quarter{q}", series_prefix(*series));
            }
            Self::Total(series) => return write!(f, "{}Total", series_prefix(*series)),
        };
        f.write_str(fixed)
    }
}

impl FromStr for Field {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|field| field.to_string() == s)
            .ok_or_else(|| BudgetError::UnknownField(s.to_string()))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}

/// A field value read through the typed accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// String-valued field.
    Text(&'a str),
    /// Numeric field.
    Number(Decimal),
}

impl FieldValue<'_> {
    /// Numeric value, or 0 for text.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        match self {
            Self::Number(n) => *n,
            Self::Text(_) => Decimal::ZERO,
        }
    }

    /// Returns true for empty text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n.normalize()),
        }
    }
}

impl BudgetLineItem {
    /// Reads a field through the typed accessor.
    #[must_use]
    pub fn get(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Year => FieldValue::Number(Decimal::from(self.year)),
            Field::Volume => FieldValue::Number(self.volume),
            Field::UnitPrice => FieldValue::Number(self.unit_price),
            Field::DetailValuePure => FieldValue::Number(self.detail_value_pure),
            Field::DetailValue => FieldValue::Number(self.detail_value),
            Field::Month(series, m) => {
                FieldValue::Number(self.schedule(series).month(usize::from(m)))
            }
            Field::Quarter(series, q) => {
                FieldValue::Number(self.schedule(series).quarter(usize::from(q)))
            }
            Field::Total(series) => FieldValue::Number(self.schedule(series).total),
            text => FieldValue::Text(self.text_ref(text).map_or("", String::as_str)),
        }
    }

    fn text_ref(&self, field: Field) -> Option<&String> {
        Some(match field {
            Field::BidangCode => &self.bidang.code,
            Field::BidangName => &self.bidang.name,
            Field::StandardCode => &self.standard.code,
            Field::StandardName => &self.standard.name,
            Field::ActivityId => &self.activity.id,
            Field::ActivityCode => &self.activity.code,
            Field::ActivityName => &self.activity.name,
            Field::ActivitySubtitle => &self.activity.subtitle,
            Field::FundCode => &self.fund.code,
            Field::FundName => &self.fund.name,
            Field::AccountCode => &self.account.code,
            Field::AccountName => &self.account.name,
            Field::ComponentId => &self.component.id,
            Field::ComponentCode => &self.component.code,
            Field::ComponentName => &self.component.name,
            Field::Unit => &self.unit,
            Field::Brand => &self.brand,
            Field::Spec => &self.spec,
            Field::TaxRate => &self.tax_rate,
            Field::Coefficient => &self.coefficient,
            _ => return None,
        })
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::BidangCode => &mut self.bidang.code,
            Field::BidangName => &mut self.bidang.name,
            Field::StandardCode => &mut self.standard.code,
            Field::StandardName => &mut self.standard.name,
            Field::ActivityId => &mut self.activity.id,
            Field::ActivityCode => &mut self.activity.code,
            Field::ActivityName => &mut self.activity.name,
            Field::ActivitySubtitle => &mut self.activity.subtitle,
            Field::FundCode => &mut self.fund.code,
            Field::FundName => &mut self.fund.name,
            Field::AccountCode => &mut self.account.code,
            Field::AccountName => &mut self.account.name,
            Field::ComponentId => &mut self.component.id,
            Field::ComponentCode => &mut self.component.code,
            Field::ComponentName => &mut self.component.name,
            Field::Unit => &mut self.unit,
            Field::Brand => &mut self.brand,
            Field::Spec => &mut self.spec,
            Field::TaxRate => &mut self.tax_rate,
            Field::Coefficient => &mut self.coefficient,
            _ => return None,
        })
    }

    fn number_mut(&mut self, field: Field) -> Option<&mut Decimal> {
        let slot = match field {
            Field::Volume => &mut self.volume,
            Field::UnitPrice => &mut self.unit_price,
            Field::DetailValuePure => &mut self.detail_value_pure,
            Field::DetailValue => &mut self.detail_value,
            Field::Month(series, m) => {
                let i = usize::from(m).checked_sub(1)?;
                self.schedule_mut(series).months.get_mut(i)?
            }
            Field::Quarter(series, q) => {
                let i = usize::from(q).checked_sub(1)?;
                self.schedule_mut(series).quarters.get_mut(i)?
            }
            Field::Total(series) => &mut self.schedule_mut(series).total,
            _ => return None,
        };
        Some(slot)
    }

    /// Writes a decimal into a numeric field. Text fields are left untouched.
    pub fn set_number(&mut self, field: Field, value: Decimal) {
        if field == Field::Year {
            if let Some(year) = value.to_i32() {
                self.year = year;
            }
        } else if let Some(slot) = self.number_mut(field) {
            *slot = value;
        }
    }

    /// Writes a raw string into a field, rejecting non-numeric input for
    /// numeric fields.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), BudgetError> {
        if let Some(slot) = self.text_mut(field) {
            *slot = raw.trim().to_string();
            return Ok(());
        }

        let value = parse_plain_number(raw).ok_or_else(|| BudgetError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
        if field == Field::Year && (value.fract() != Decimal::ZERO || value.is_sign_negative()) {
            return Err(BudgetError::InvalidNumber {
                field,
                value: raw.to_string(),
            });
        }
        self.set_number(field, value);
        Ok(())
    }

    /// Writes a raw string into a field, coercing non-numeric input to 0.
    pub fn set_lenient(&mut self, field: Field, raw: &str) {
        if self.set(field, raw).is_err() {
            self.set_number(field, Decimal::ZERO);
        }
    }
}
