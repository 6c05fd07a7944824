//! Strata discount rows: quantity breaks with their discounts.

use tracing::debug;

use super::{backfill_document, DataRow, RowOutcome, RowParser};
use crate::extract::rules::patterns::{
    DISCOUNT_HEADER, MIN_QTY_HEADER, SHARE_HEADER, SKU_HEADER, UOM_HEADER,
};
use crate::extract::rules::scan_uom_value;
use crate::models::{DraftDocument, DschemaConfig, StrataTier};
use crate::tables::classifier::HeaderColumns;
use crate::tables::values::{parse_discount, parse_min_qty, parse_share};

/// Rows without SKU or UOM reuse the last ones seen in the same block.
pub struct StrataDiscountParser {
    columns: HeaderColumns,
    last_sku: Option<String>,
    last_uom: Option<String>,
}

impl StrataDiscountParser {
    pub fn new(columns: HeaderColumns) -> Self {
        Self {
            columns,
            last_sku: None,
            last_uom: None,
        }
    }
}

impl RowParser for StrataDiscountParser {
    fn parse_row(
        &mut self,
        row: &DataRow<'_>,
        draft: &mut DraftDocument,
        config: &DschemaConfig,
    ) -> RowOutcome {
        let fields = &row.fields;

        if self.columns.min_qty.is_none() && !fields.is_blank() {
            return RowOutcome::Unresolved("no minimum quantity column".to_string());
        }
        let min_cell = fields
            .resolve(self.columns.min_qty.as_deref(), &MIN_QTY_HEADER)
            .unwrap_or_default();
        let Some(min_qty) = parse_min_qty(min_cell) else {
            return RowOutcome::Skipped;
        };

        let discount_cell = fields
            .resolve(self.columns.discount.as_deref(), &DISCOUNT_HEADER)
            .unwrap_or_default();
        let Some(discount_percent) = parse_discount(discount_cell) else {
            return RowOutcome::Unresolved(format!("unreadable discount {:?}", discount_cell));
        };

        let share_discount_percent = parse_share(
            fields
                .resolve(self.columns.share.as_deref(), &SHARE_HEADER)
                .unwrap_or_default(),
        );

        let row_uom = fields
            .resolve(self.columns.uom.as_deref(), &UOM_HEADER)
            .map(str::to_uppercase)
            .or_else(|| scan_uom_value(fields.values()));
        let row_sku = fields
            .resolve(self.columns.sku.as_deref(), &SKU_HEADER)
            .map(str::to_string);

        if let Some(sku) = &row_sku {
            self.last_sku = Some(sku.clone());
        }
        if let Some(uom) = &row_uom {
            self.last_uom = Some(uom.clone());
        }

        let sku = row_sku.or_else(|| self.last_sku.clone()).or_else(|| draft.sku.clone());
        let uom = row_uom.or_else(|| self.last_uom.clone()).or_else(|| draft.uom.clone());

        let (sku, uom) = match (sku, uom) {
            (Some(sku), Some(uom)) => (sku, uom),
            (None, _) => return RowOutcome::Unresolved("no SKU for strata row".to_string()),
            (Some(sku), None) => {
                return RowOutcome::Unresolved(format!("no UOM for strata row of {}", sku));
            }
        };

        let tier = StrataTier {
            break_from: min_qty.from,
            break_to: min_qty.to,
            discount_percent,
            share_discount_percent,
        };
        debug!("Strata tier for {}: {:?}", sku, tier);

        let is_new = !draft.has_sku(&sku);
        let doc_qty = draft.qty_allocated;
        let uom_code = config.uom_code(&uom);

        let entry = draft.upsert_entry(&sku);
        if is_new {
            entry.qty_allocated = doc_qty;
        }
        entry.uom = Some(uom.clone());
        entry.uom_code = Some(uom_code);
        entry.strata_tiers.push(tier);

        backfill_document(draft, &sku, Some(&uom), config);

        RowOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::header_map::HeaderMap;
    use rust_decimal::Decimal;

    const HEADERS: &[&str] = &["SKU", "UOM", "MIN QTY / CTN", "DISC %", "SHARE DIST %"];

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn columns() -> HeaderColumns {
        HeaderColumns {
            min_qty: Some("MIN QTY / CTN".to_string()),
            discount: Some("DISC %".to_string()),
            share: Some("SHARE DIST %".to_string()),
            sku: Some("SKU".to_string()),
            uom: Some("UOM".to_string()),
            ..HeaderColumns::default()
        }
    }

    fn feed(parser: &mut StrataDiscountParser, cells: &[&str], draft: &mut DraftDocument) -> RowOutcome {
        let cells = strings(cells);
        let row = DataRow {
            cells: &cells,
            fields: HeaderMap::zip(&strings(HEADERS), &cells),
        };
        parser.parse_row(&row, draft, &DschemaConfig::default())
    }

    #[test]
    fn test_rows_carry_sku_forward() {
        let mut draft = DraftDocument::new(None);
        draft.qty_allocated = Some(120);
        let mut parser = StrataDiscountParser::new(columns());

        feed(&mut parser, &["FORTUNE PCH @1LT", "CTN", "1-10", "2", "0"], &mut draft);
        feed(&mut parser, &["", "", "11", "3", "1"], &mut draft);

        assert_eq!(draft.sku_entries.len(), 1);
        let entry = &draft.sku_entries[0];
        assert_eq!(entry.qty_allocated, Some(120));
        assert_eq!(entry.uom.as_deref(), Some("CTN"));
        assert_eq!(entry.strata_tiers.len(), 2);
        assert_eq!(entry.strata_tiers[0].break_to, Some(10));
        assert_eq!(entry.strata_tiers[1].break_from, 11);
        assert_eq!(entry.strata_tiers[1].share_discount_percent, Decimal::ONE);
    }

    #[test]
    fn test_first_row_falls_back_to_document() {
        let mut draft = DraftDocument::new(None);
        draft.sku = Some("MILA TEPUNG 25KG".to_string());
        draft.uom = Some("BAG".to_string());
        let mut parser = StrataDiscountParser::new(columns());

        let outcome = feed(&mut parser, &["", "", "5", "1,5", "-"], &mut draft);

        assert_eq!(outcome, RowOutcome::Applied);
        let entry = &draft.sku_entries[0];
        assert_eq!(entry.sku, "MILA TEPUNG 25KG");
        assert_eq!(entry.uom_code, Some(1000009));
        assert_eq!(entry.strata_tiers[0].discount_percent, Decimal::new(15, 1));
        assert_eq!(entry.qty_allocated, None);
    }

    #[test]
    fn test_non_positive_minimum_is_skipped() {
        let mut draft = DraftDocument::new(None);
        let mut parser = StrataDiscountParser::new(columns());

        let outcome = feed(&mut parser, &["FORTUNE PCH @1LT", "CTN", "TOTAL", "", ""], &mut draft);

        assert_eq!(outcome, RowOutcome::Skipped);
        assert!(draft.sku_entries.is_empty());
    }

    #[test]
    fn test_row_without_minimum_column_is_unresolved() {
        let mut draft = DraftDocument::new(None);
        let mut parser = StrataDiscountParser::new(HeaderColumns::default());
        let cells = strings(&["FORTUNE PCH @1LT", "CTN", "1-10", "2"]);
        let keys = strings(&["STRATA DISCOUNT", "", "", ""]);
        let row = DataRow {
            cells: &cells,
            fields: HeaderMap::zip(&keys, &cells),
        };

        let outcome = parser.parse_row(&row, &mut draft, &DschemaConfig::default());

        assert!(matches!(outcome, RowOutcome::Unresolved(_)));
        assert!(draft.sku_entries.is_empty());
    }

    #[test]
    fn test_missing_uom_is_unresolved() {
        let mut draft = DraftDocument::new(None);
        let mut parser = StrataDiscountParser::new(columns());

        let outcome = feed(&mut parser, &["FORTUNE PCH @1LT", "", "1", "2", "0"], &mut draft);
        assert!(matches!(outcome, RowOutcome::Unresolved(_)));
    }
}
