//! Promotion agreement records: the draft filled during extraction and the
//! validated document consumed by the break builder.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Yes/no flag in the downstream system's notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl Flag {
    pub fn from_bool(value: bool) -> Self {
        if value { Flag::Yes } else { Flag::No }
    }

    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }
}

/// Which customers a compiled schema applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// All customers, individual allocation (IA).
    #[default]
    #[serde(rename = "IA")]
    IndividualAllocation,
    /// Only the listed customers (ISC).
    #[serde(rename = "ISC")]
    IndividualSelectedCustomers,
    /// Everyone except the listed customers (ESC).
    #[serde(rename = "ESC")]
    ExcludedSelectedCustomers,
}

impl SelectionMode {
    /// Short code used by the downstream system.
    pub fn code(&self) -> &'static str {
        match self {
            SelectionMode::IndividualAllocation => "IA",
            SelectionMode::IndividualSelectedCustomers => "ISC",
            SelectionMode::ExcludedSelectedCustomers => "ESC",
        }
    }
}

/// One quantity break of a strata discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrataTier {
    /// Inclusive lower bound (> 0).
    pub break_from: u32,

    /// Inclusive upper bound; `None` means inferred when compiling.
    pub break_to: Option<u32>,

    /// Vendor cashback discount, in percent.
    pub discount_percent: Decimal,

    /// Distributor share discount, in percent.
    pub share_discount_percent: Decimal,
}

impl StrataTier {
    /// Zero-discount tier covering every quantity.
    pub fn open_default() -> Self {
        Self {
            break_from: 1,
            break_to: None,
            discount_percent: Decimal::ZERO,
            share_discount_percent: Decimal::ZERO,
        }
    }
}

/// An outlet explicitly listed by the agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    /// Business partner identifier.
    pub partner_id: String,
    /// Outlet name.
    pub name: String,
}

/// Area resolved from the distributor code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Two-character suffix of the distributor code.
    pub code: String,
    /// Area short name.
    pub name: String,
    /// Organization the schema is assigned to.
    pub org_id: u32,
}

/// A product line while the document is still being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftSkuEntry {
    pub sku: String,
    pub qty_allocated: Option<u32>,
    pub uom: Option<String>,
    pub uom_code: Option<u32>,
    pub strata_tiers: Vec<StrataTier>,
}

impl DraftSkuEntry {
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            ..Self::default()
        }
    }
}

/// Mutable accumulator threaded through the extraction stages.
///
/// Field rules and row parsers only ever fill this in; the validator turns
/// it into a [`Document`] or rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftDocument {
    /// Name of the source file, used as a last-resort SKU hint.
    pub source_name: Option<String>,
    pub identifier: Option<String>,
    pub brand: Option<String>,
    pub sub_promo_type: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub qty_allocated: Option<u32>,
    pub vendor_cashback: Option<Flag>,
    pub area_code: Option<String>,
    pub area_name: Option<String>,
    pub org_id: Option<u32>,
    /// First SKU seen; strata rows without a SKU fall back to it.
    pub sku: Option<String>,
    pub uom: Option<String>,
    pub uom_code: Option<u32>,
    pub sku_entries: Vec<DraftSkuEntry>,
    pub outlets: Vec<Outlet>,
}

impl DraftDocument {
    /// Create an empty draft for one source document.
    pub fn new(source_name: Option<String>) -> Self {
        Self {
            source_name,
            ..Self::default()
        }
    }

    /// Get the entry for `sku`, appending an empty one if it is new.
    pub fn upsert_entry(&mut self, sku: &str) -> &mut DraftSkuEntry {
        let index = match self.sku_entries.iter().position(|e| e.sku == sku) {
            Some(index) => index,
            None => {
                self.sku_entries.push(DraftSkuEntry::new(sku));
                self.sku_entries.len() - 1
            }
        };
        &mut self.sku_entries[index]
    }

    pub fn has_sku(&self, sku: &str) -> bool {
        self.sku_entries.iter().any(|e| e.sku == sku)
    }
}

/// A validated product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuEntry {
    pub sku: String,
    pub qty_allocated: u32,
    pub uom: String,
    pub uom_code: u32,
    /// Never empty.
    pub strata_tiers: Vec<StrataTier>,
}

impl SkuEntry {
    /// Tiers ordered by lower bound, ties kept in source order.
    pub fn sorted_tiers(&self) -> Vec<&StrataTier> {
        let mut tiers: Vec<&StrataTier> = self.strata_tiers.iter().collect();
        tiers.sort_by_key(|t| t.break_from);
        tiers
    }
}

/// A validated promotion agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Promo contract number.
    pub identifier: String,
    pub brand: String,
    pub sub_promo_type: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    /// Document-level default quantity.
    pub qty_allocated: u32,
    pub vendor_cashback: Flag,
    pub area: Area,
    pub uom: String,
    pub uom_code: u32,
    pub sku_entries: Vec<SkuEntry>,
    pub outlets: Vec<Outlet>,
    /// Derived by the pipeline, never read from the source.
    pub selection_mode: SelectionMode,
}

impl Document {
    /// `"{brand} {sub promo type} {area}"`.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.brand, self.sub_promo_type, self.area.name)
            .trim()
            .to_string()
    }

    /// `"{identifier} {brand} {sub promo type} {area}"`.
    pub fn break_name(&self) -> String {
        format!(
            "{} {} {} {}",
            self.identifier, self.brand, self.sub_promo_type, self.area.name
        )
        .trim()
        .to_string()
    }
}
