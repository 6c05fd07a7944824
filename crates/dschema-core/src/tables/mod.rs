//! Table handling: block splitting, classification and row parsing.
//!
//! The external extractor hands over grids of cell strings. A grid may hold
//! several logical blocks separated by sentinel rows whose first cell is
//! [`SENTINEL`].

pub mod classifier;
pub mod dump;
pub mod header_map;
mod parser;
pub mod rows;
pub mod values;

pub use classifier::{classify, Classification, HeaderColumns, HeaderFamily, TableKind};
pub use dump::{read_dump, read_dump_file, write_dump, write_dump_file};
pub use header_map::HeaderMap;
pub use parser::{BlockSummary, RowIssue, TableOutcome, TableParser};

/// A row of cell strings.
pub type Row = Vec<String>;

/// A grid of rows as delivered by the extractor.
pub type Table = Vec<Row>;

/// First cell of a block separator row.
pub const SENTINEL: &str = "---";

/// Trim a cell and fold embedded line breaks into spaces.
pub fn normalize_cell(cell: &str) -> String {
    cell.trim().replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn is_sentinel(row: &[String]) -> bool {
    row.first().is_some_and(|cell| cell.trim() == SENTINEL)
}

/// Split grids into logical blocks with normalized cells.
///
/// Every grid ends a block, and so does every sentinel row inside a grid.
/// Empty blocks are dropped.
pub fn split_blocks(tables: &[Table]) -> Vec<Table> {
    let mut blocks = Vec::new();

    for table in tables {
        let mut current: Table = Vec::new();
        for row in table {
            if is_sentinel(row) {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.push(row.iter().map(|c| normalize_cell(c)).collect());
        }
        if !current.is_empty() {
            blocks.push(current);
        }
    }

    blocks
}
