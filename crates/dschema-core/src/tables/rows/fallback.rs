//! Loose scan of blocks without a recognizable header.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::{DataRow, RowOutcome, RowParser};
use crate::extract::rules::patterns::{LOOSE_PERCENT, LOOSE_QUANTITY};
use crate::extract::rules::{FieldExtractor, SkuExtractor};
use crate::models::{DraftDocument, DschemaConfig, StrataTier};

/// Picks catalog SKUs, a bare quantity and percentages out of any cell.
pub struct HeaderlessParser;

impl RowParser for HeaderlessParser {
    fn parse_row(
        &mut self,
        row: &DataRow<'_>,
        draft: &mut DraftDocument,
        _config: &DschemaConfig,
    ) -> RowOutcome {
        let skus = SkuExtractor::new();
        let mut applied = false;

        for cell in row.cells.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
            if let Some(sku) = skus.extract(cell) {
                debug!("SKU in header-less table: {}", sku);
                draft.upsert_entry(&sku);
                if draft.sku.is_none() {
                    draft.sku = Some(sku);
                }
                applied = true;
            }

            if let Some(caps) = LOOSE_QUANTITY.captures(cell) {
                if draft.qty_allocated.is_none() {
                    if let Ok(qty) = caps[1].parse::<u32>() {
                        debug!("Quantity in header-less table: {}", qty);
                        draft.qty_allocated = Some(qty);
                        applied = true;
                    }
                }
            }

            if let Some(caps) = LOOSE_PERCENT.captures(cell) {
                let Ok(discount) = Decimal::from_str(&caps[1]) else {
                    continue;
                };
                if let Some(entry) = draft.sku_entries.first_mut() {
                    debug!("Discount in header-less table: {}%", discount);
                    entry.strata_tiers.push(StrataTier {
                        discount_percent: discount,
                        ..StrataTier::open_default()
                    });
                    applied = true;
                }
            }
        }

        if applied {
            RowOutcome::Applied
        } else {
            RowOutcome::Skipped
        }
    }
}
