//! Flat CSV dump of extracted tables.
//!
//! One row per line. After each table a sentinel row is written, with the
//! marker repeated to the width of the table's widest row.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use super::{Table, SENTINEL};
use crate::error::DumpError;

/// Write tables to a CSV dump.
pub fn write_dump<W: Write>(writer: W, tables: &[Table]) -> Result<(), DumpError> {
    let mut csv = WriterBuilder::new().flexible(true).from_writer(writer);

    for table in tables.iter().filter(|t| !t.is_empty()) {
        for row in table {
            csv.write_record(row)?;
        }
        let width = table.iter().map(|r| r.len()).max().unwrap_or(1).max(1);
        csv.write_record(std::iter::repeat_n(SENTINEL, width))?;
    }

    csv.flush()?;
    Ok(())
}

/// Read a CSV dump back into tables, one per sentinel-terminated block.
///
/// Rows after the last sentinel form a final table.
pub fn read_dump<R: Read>(reader: R) -> Result<Vec<Table>, DumpError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut tables = Vec::new();
    let mut current: Table = Vec::new();

    for record in csv.records() {
        let record = record?;
        if record.get(0) == Some(SENTINEL) {
            if !current.is_empty() {
                tables.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(record.iter().map(str::to_string).collect());
    }
    if !current.is_empty() {
        tables.push(current);
    }

    Ok(tables)
}

/// Write a dump to `path`, replacing any existing file.
pub fn write_dump_file(path: &Path, tables: &[Table]) -> Result<(), DumpError> {
    write_dump(File::create(path)?, tables)
}

/// Read a dump from `path`.
pub fn read_dump_file(path: &Path) -> Result<Vec<Table>, DumpError> {
    read_dump(File::open(path)?)
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
    fn test_sentinel_matches_widest_row() {
        let tables = vec![table(&[&["SKU"], &["FORTUNE PCH @1LT", "100", "CTN"]])];
        let mut out = Vec::new();
        write_dump(&mut out, &tables).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().last(), Some("---,---,---"));
    }

    #[test]
    fn test_cells_with_commas_and_newlines_survive() {
        let tables = vec![
            table(&[&["MIN QTY\n/ CTN", "DISC %"], &["1,000", "2,5"]]),
            table(&[&["NO", "ID OUTLET", "NAMA OUTLET"], &["1", "C-01", "TOKO, MAJU"]]),
        ];
        let mut out = Vec::new();
        write_dump(&mut out, &tables).unwrap();

        let back = read_dump(out.as_slice()).unwrap();
        assert_eq!(back, tables);
    }

    #[test]
    fn test_trailing_rows_without_sentinel() {
        let back = read_dump("A,B\n---,---\nC\n".as_bytes()).unwrap();
        assert_eq!(back, vec![table(&[&["A", "B"]]), table(&[&["C"]])]);
    }
}
