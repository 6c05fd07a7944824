//! Row parsing strategies, one per table kind.

mod fallback;
mod outlet;
mod sales;
mod strata;

pub use fallback::HeaderlessParser;
pub use outlet::OutletListParser;
pub use sales::SalesCommitmentParser;
pub use strata::StrataDiscountParser;

use super::classifier::{Classification, TableKind};
use super::header_map::HeaderMap;
use crate::extract::rules::brand_from_sku;
use crate::models::{DraftDocument, DschemaConfig};

/// A data row: raw cells plus the same cells keyed by header.
#[derive(Debug, Clone)]
pub struct DataRow<'a> {
    pub cells: &'a [String],
    pub fields: HeaderMap,
}

/// What a parser did with one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row changed the draft.
    Applied,
    /// The row carries nothing to apply (blank, or a non-positive minimum).
    Skipped,
    /// The row looked like data but could not be resolved.
    Unresolved(String),
}

/// Strategy that folds data rows of one block into the draft.
pub trait RowParser {
    fn parse_row(
        &mut self,
        row: &DataRow<'_>,
        draft: &mut DraftDocument,
        config: &DschemaConfig,
    ) -> RowOutcome;
}

/// Parser for a classified block. A fresh parser is used per block so
/// carried-forward values never leak between blocks.
pub fn parser_for(classification: &Classification) -> Box<dyn RowParser> {
    let columns = classification.columns.clone();
    match classification.kind {
        TableKind::SalesCommitment => Box::new(SalesCommitmentParser::new(columns)),
        TableKind::StrataDiscount => Box::new(StrataDiscountParser::new(columns)),
        TableKind::OutletList => Box::new(OutletListParser),
        TableKind::Unclassified => Box::new(HeaderlessParser),
    }
}

/// Backfill document-level SKU/UOM the first time a table names them.
pub(crate) fn backfill_document(
    draft: &mut DraftDocument,
    sku: &str,
    uom: Option<&str>,
    config: &DschemaConfig,
) {
    if draft.sku.is_none() {
        draft.sku = Some(sku.to_string());
    }
    if let Some(uom) = uom {
        if draft.uom.is_none() {
            draft.uom = Some(uom.to_string());
            draft.uom_code = Some(config.uom_code(uom));
        }
    }
    if draft.brand.is_none() {
        draft.brand = brand_from_sku(sku);
    }
}
