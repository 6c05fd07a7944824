//! Sales commitment rows: allocated quantity per SKU.

use tracing::debug;

use super::{backfill_document, DataRow, RowOutcome, RowParser};
use crate::extract::rules::patterns::{QUANTITY_HEADER, SKU_HEADER, UOM_HEADER};
use crate::extract::rules::scan_uom_value;
use crate::models::{DraftDocument, DschemaConfig};
use crate::tables::classifier::HeaderColumns;
use crate::tables::values::parse_quantity;

/// Canonical quantity header, preferred over any family match.
const QTY_IN_CTN: &str = "QTY IN CTN";

pub struct SalesCommitmentParser {
    columns: HeaderColumns,
}

impl SalesCommitmentParser {
    pub fn new(columns: HeaderColumns) -> Self {
        Self { columns }
    }
}

impl RowParser for SalesCommitmentParser {
    fn parse_row(
        &mut self,
        row: &DataRow<'_>,
        draft: &mut DraftDocument,
        config: &DschemaConfig,
    ) -> RowOutcome {
        if row.fields.is_blank() {
            return RowOutcome::Skipped;
        }

        let fields = &row.fields;
        let qty_cell = fields
            .get(QTY_IN_CTN)
            .or_else(|| fields.resolve(self.columns.quantity.as_deref(), &QUANTITY_HEADER));
        let qty = qty_cell.and_then(parse_quantity);

        let sku = fields.resolve(self.columns.sku.as_deref(), &SKU_HEADER);

        let uom = fields
            .resolve(self.columns.uom.as_deref(), &UOM_HEADER)
            .map(str::to_uppercase)
            .or_else(|| scan_uom_value(fields.values()));

        let (sku, qty) = match (sku, qty) {
            (Some(sku), Some(qty)) => (sku.to_string(), qty),
            (None, _) => return RowOutcome::Unresolved("no SKU column".to_string()),
            (Some(_), None) => {
                return RowOutcome::Unresolved(format!(
                    "unreadable quantity {:?}",
                    qty_cell.unwrap_or_default()
                ));
            }
        };

        debug!("Sales commitment: {} qty {} uom {:?}", sku, qty, uom);

        let entry = draft.upsert_entry(&sku);
        entry.qty_allocated = Some(qty);
        if let Some(uom) = &uom {
            entry.uom = Some(uom.clone());
            entry.uom_code = Some(config.uom_code(uom));
        }

        if draft.qty_allocated.is_none() {
            draft.qty_allocated = Some(qty);
        }
        backfill_document(draft, &sku, uom.as_deref(), config);

        RowOutcome::Applied
    }
}
