//! Table pass: classify each block and fold its rows into the draft.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::classifier::{classify, Classification, TableKind};
use super::header_map::HeaderMap;
use super::rows::{parser_for, DataRow, RowOutcome};
use super::{split_blocks, Row, Table};
use crate::models::{DraftDocument, DschemaConfig};

/// A data row no strategy could resolve. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    /// Zero-based block index.
    pub block: usize,
    /// Zero-based row index inside the block.
    pub row: usize,
    pub kind: TableKind,
    pub reason: String,
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "block {} ({}) row {}: {}",
            self.block, self.kind, self.row, self.reason
        )
    }
}

/// How one block was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub index: usize,
    pub classification: Classification,
    pub rows: usize,
    pub applied: usize,
}

/// Result of the table pass.
#[derive(Debug, Clone)]
pub struct TableOutcome {
    pub draft: DraftDocument,
    pub blocks: Vec<BlockSummary>,
    pub issues: Vec<RowIssue>,
}

/// Runs classification and row parsing over every block.
pub struct TableParser<'a> {
    config: &'a DschemaConfig,
}

impl<'a> TableParser<'a> {
    pub fn new(config: &'a DschemaConfig) -> Self {
        Self { config }
    }

    /// Fold all blocks of `tables` into `draft`, in order.
    pub fn parse(&self, tables: &[Table], mut draft: DraftDocument) -> TableOutcome {
        let blocks = split_blocks(tables);
        info!("Parsing {} table block(s)", blocks.len());

        let mut summaries = Vec::with_capacity(blocks.len());
        let mut issues = Vec::new();

        for (index, block) in blocks.iter().enumerate() {
            let classification = classify(block);
            let mut parser = parser_for(&classification);
            let keys = row_keys(&classification);
            let mut applied = 0;

            for (row_index, cells) in block.iter().enumerate().skip(classification.data_start) {
                let row = data_row(&classification, keys.as_deref(), cells);
                match parser.parse_row(&row, &mut draft, self.config) {
                    RowOutcome::Applied => applied += 1,
                    RowOutcome::Skipped => {}
                    RowOutcome::Unresolved(reason) => {
                        let issue = RowIssue {
                            block: index,
                            row: row_index,
                            kind: classification.kind,
                            reason,
                        };
                        warn!("Skipping table row, {}", issue);
                        issues.push(issue);
                    }
                }
            }

            debug!(
                "Block {} ({}): {} of {} row(s) applied",
                index,
                classification.kind,
                applied,
                block.len().saturating_sub(classification.data_start)
            );
            summaries.push(BlockSummary {
                index,
                rows: block.len(),
                applied,
                classification,
            });
        }

        TableOutcome {
            draft,
            blocks: summaries,
            issues,
        }
    }
}

/// Header cells that key the data rows of a block.
fn row_keys(classification: &Classification) -> Option<Vec<String>> {
    classification
        .subheader
        .clone()
        .or_else(|| classification.header.clone())
}

fn data_row<'r>(classification: &Classification, keys: Option<&[String]>, cells: &'r Row) -> DataRow<'r> {
    let mut fields = match keys {
        Some(keys) if classification.subheader.is_some() => {
            // Subheaders are padded so every cell gets a key.
            let mut padded = keys.to_vec();
            padded.resize(padded.len().max(cells.len()), String::new());
            HeaderMap::zip(&padded, cells)
        }
        Some(keys) => HeaderMap::zip(keys, cells),
        None => HeaderMap::default(),
    };

    if classification.subheader.is_some() {
        fields.insert(
            "SKU".to_string(),
            cells.first().cloned().unwrap_or_default(),
        );
    }

    DataRow { cells, fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_sales_commitment_with_subheader() {
        let tables = vec![table(&[
            &["SALES COMITMENT", "", ""],
            &["", "QTY IN CTN", "UOM"],
            &["FORTUNE PCH @1LT", "100/4", "CTN"],
            &["FORTUNE PCH @2LT", "60", "CTN"],
        ])];
        let config = DschemaConfig::default();
        let outcome = TableParser::new(&config).parse(&tables, DraftDocument::new(None));

        let draft = outcome.draft;
        assert_eq!(draft.sku_entries.len(), 2);
        assert_eq!(draft.sku_entries[0].qty_allocated, Some(25));
        assert_eq!(draft.sku_entries[1].qty_allocated, Some(60));
        assert_eq!(draft.qty_allocated, Some(25));
        assert_eq!(outcome.blocks[0].applied, 2);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_carry_forward_resets_between_blocks() {
        let strata_header: &[&str] = &["SKU", "UOM", "MIN QTY", "DISC %"];
        let tables = vec![
            table(&[strata_header, &["FORTUNE PCH @1LT", "CTN", "1", "2"]]),
            table(&[strata_header, &["", "", "5", "3"]]),
        ];
        let config = DschemaConfig::default();
        let mut draft = DraftDocument::new(None);
        draft.sku = Some("FORTUNE JRG @5LT".to_string());
        draft.uom = Some("CTN".to_string());

        let draft = TableParser::new(&config).parse(&tables, draft).draft;

        // The second block starts with no previous row and uses the document SKU.
        let skus: Vec<&str> = draft.sku_entries.iter().map(|e| e.sku.as_str()).collect();
        assert_eq!(skus, vec!["FORTUNE PCH @1LT", "FORTUNE JRG @5LT"]);
    }

    #[test]
    fn test_unresolved_rows_are_collected() {
        let tables = vec![table(&[
            &["SKU", "QTY IN CTN"],
            &["FORTUNE PCH @1LT", "banyak"],
        ])];
        let config = DschemaConfig::default();
        let outcome = TableParser::new(&config).parse(&tables, DraftDocument::new(None));

        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].block, 0);
        assert_eq!(outcome.issues[0].row, 1);
        assert_eq!(outcome.issues[0].kind, TableKind::SalesCommitment);
    }

    #[test]
    fn test_caption_row_above_strata_header() {
        let tables = vec![table(&[
            &["STRATA DISCOUNT", "", "", "", ""],
            &["SKU", "UOM", "MIN QTY / CTN", "DISC %", "SHARE DIST %"],
            &["FORTUNE PCH @1LT", "CTN", "1-10", "2", "0"],
            &["", "", "11", "3", "1"],
        ])];
        let config = DschemaConfig::default();
        let outcome = TableParser::new(&config).parse(&tables, DraftDocument::new(None));

        assert_eq!(outcome.blocks[0].classification.data_start, 2);
        assert_eq!(outcome.blocks[0].applied, 2);
        assert!(outcome.issues.is_empty());
        let entry = &outcome.draft.sku_entries[0];
        assert_eq!(entry.sku, "FORTUNE PCH @1LT");
        assert_eq!(entry.strata_tiers.len(), 2);
        assert_eq!(entry.strata_tiers[1].break_from, 11);
    }

    #[test]
    fn test_unresolved_strata_rows_are_collected() {
        let tables = vec![table(&[
            &["SKU", "UOM", "MIN QTY", "DISC %"],
            &["FORTUNE PCH @1LT", "", "1", "2"],
            &["FORTUNE PCH @2LT", "CTN", "1", "lima"],
        ])];
        let config = DschemaConfig::default();
        let outcome = TableParser::new(&config).parse(&tables, DraftDocument::new(None));

        let rows: Vec<usize> = outcome.issues.iter().map(|i| i.row).collect();
        assert_eq!(rows, vec![1, 2]);
        assert!(outcome.issues.iter().all(|i| i.kind == TableKind::StrataDiscount));
        assert_eq!(outcome.blocks[0].applied, 0);
    }
}
