//! Keyword-based classification of table blocks.
//!
//! Headers are labelled inconsistently across document variants, so the
//! kind of a block is decided from keyword families rather than positions.

use std::cmp::Reverse;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::Row;
use crate::extract::rules::patterns::{
    DISCOUNT_HEADER, MIN_QTY_HEADER, QUANTITY_HEADER, SALES_COMMITMENT_MARKER, SHARE_HEADER,
    SKU_HEADER, UOM_HEADER,
};

/// Semantic kind of a table block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    SalesCommitment,
    StrataDiscount,
    OutletList,
    /// No header recognized; cells are scanned loosely.
    Unclassified,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableKind::SalesCommitment => "sales commitment",
            TableKind::StrataDiscount => "strata discount",
            TableKind::OutletList => "outlet list",
            TableKind::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

/// Header keyword families, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFamily {
    MinQty,
    Discount,
    Share,
    Quantity,
    Sku,
    Uom,
    Outlet,
}

impl HeaderFamily {
    pub const PRIORITY: [HeaderFamily; 7] = [
        HeaderFamily::MinQty,
        HeaderFamily::Discount,
        HeaderFamily::Share,
        HeaderFamily::Quantity,
        HeaderFamily::Sku,
        HeaderFamily::Uom,
        HeaderFamily::Outlet,
    ];

    /// Keyword pattern for single-cell families.
    pub fn pattern(self) -> Option<&'static Regex> {
        match self {
            HeaderFamily::MinQty => Some(&*MIN_QTY_HEADER),
            HeaderFamily::Discount => Some(&*DISCOUNT_HEADER),
            HeaderFamily::Share => Some(&*SHARE_HEADER),
            HeaderFamily::Quantity => Some(&*QUANTITY_HEADER),
            HeaderFamily::Sku => Some(&*SKU_HEADER),
            HeaderFamily::Uom => Some(&*UOM_HEADER),
            HeaderFamily::Outlet => None,
        }
    }

    /// Block kind implied when this is the strongest family in the header.
    pub fn kind(self) -> TableKind {
        match self {
            HeaderFamily::MinQty | HeaderFamily::Discount | HeaderFamily::Share => {
                TableKind::StrataDiscount
            }
            HeaderFamily::Quantity | HeaderFamily::Sku | HeaderFamily::Uom => {
                TableKind::SalesCommitment
            }
            HeaderFamily::Outlet => TableKind::OutletList,
        }
    }

    /// First cell of `row` belonging to this family.
    pub fn find_cell(self, row: &[String]) -> Option<&str> {
        match self.pattern() {
            Some(pattern) => row
                .iter()
                .find(|cell| pattern.is_match(cell))
                .map(String::as_str),
            None => {
                let has = |name: &str| row.iter().any(|c| c == name);
                (has("NO") && has("ID OUTLET")).then_some("ID OUTLET")
            }
        }
    }
}

/// Header cell text found for each column family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderColumns {
    pub min_qty: Option<String>,
    pub discount: Option<String>,
    pub share: Option<String>,
    pub quantity: Option<String>,
    pub sku: Option<String>,
    pub uom: Option<String>,
}

impl HeaderColumns {
    fn from_row(row: &[String]) -> Self {
        let cell = |family: HeaderFamily| family.find_cell(row).map(str::to_string);
        Self {
            min_qty: cell(HeaderFamily::MinQty),
            discount: cell(HeaderFamily::Discount),
            share: cell(HeaderFamily::Share),
            quantity: cell(HeaderFamily::Quantity),
            sku: cell(HeaderFamily::Sku),
            uom: cell(HeaderFamily::Uom),
        }
    }
}

/// Outcome of classifying one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub kind: TableKind,
    /// Row whose cells name the columns.
    pub header: Option<Row>,
    /// Second header row of a sales commitment grid; its cells key the data.
    pub subheader: Option<Row>,
    /// Index of the first data row.
    pub data_start: usize,
    pub columns: HeaderColumns,
}

impl Classification {
    fn unclassified() -> Self {
        Self {
            kind: TableKind::Unclassified,
            header: None,
            subheader: None,
            data_start: 0,
            columns: HeaderColumns::default(),
        }
    }
}

/// Decide the kind of a block and where its data starts.
///
/// A sales commitment marker anywhere wins outright and fixes the first
/// two rows as header and subheader. Otherwise families are tried in
/// priority order across all rows; the first family found anywhere picks
/// the kind, and among the rows holding it the one naming the most
/// families is the header. Caption rows above the real header lose to it.
pub fn classify(rows: &[Row]) -> Classification {
    let marked = rows
        .iter()
        .any(|row| row.iter().any(|cell| SALES_COMMITMENT_MARKER.is_match(cell)));

    if marked && !rows.is_empty() {
        let header = rows[0].clone();
        let subheader = rows.get(1).cloned();
        let mut columns = subheader
            .as_deref()
            .map(HeaderColumns::from_row)
            .unwrap_or_default();
        // The first column carries the SKU under the marker layout.
        columns.sku = Some("SKU".to_string());

        debug!("Sales commitment block, header: {:?}", header);
        return Classification {
            kind: TableKind::SalesCommitment,
            header: Some(header),
            subheader,
            data_start: 2,
            columns,
        };
    }

    let header = HeaderFamily::PRIORITY.iter().copied().find_map(|family| {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| family.find_cell(row).is_some())
            .min_by_key(|(index, row)| (Reverse(family_count(row)), *index))
            .map(|(index, row)| (family, index, row))
    });

    if let Some((family, index, row)) = header {
        let kind = family.kind();
        debug!("{} block, header at row {}: {:?}", kind, index, row);
        return Classification {
            kind,
            header: Some(row.clone()),
            subheader: None,
            data_start: index + 1,
            columns: HeaderColumns::from_row(row),
        };
    }

    debug!("Unclassified block of {} rows", rows.len());
    Classification::unclassified()
}

fn family_count(row: &[String]) -> usize {
    HeaderFamily::PRIORITY
        .iter()
        .filter(|family| family.find_cell(row).is_some())
        .count()
}
