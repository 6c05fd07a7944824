//! SKU extraction against the product catalog.

use std::path::Path;

use super::patterns::{SKU_CATALOG, SKU_FILENAME_ALIAS};
use super::FieldExtractor;

/// Matches product names from the known catalog.
#[derive(Default)]
pub struct SkuExtractor;

impl SkuExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Every catalog name in a table cell, in order.
    pub fn find_in_cell(&self, cell: &str) -> Vec<String> {
        SKU_CATALOG
            .find_iter(cell)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl FieldExtractor for SkuExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<String> {
        SKU_CATALOG.find(line).map(|m| m.as_str().to_string())
    }
}

/// Guess a SKU from a source file name such as `FORTUNE_PCH_@1LT.pdf`.
pub fn sku_from_filename(name: &str) -> Option<String> {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .replace('_', " ");

    SKU_CATALOG
        .find(&stem)
        .or_else(|| SKU_FILENAME_ALIAS.find(&stem))
        .map(|m| m.as_str().trim().to_string())
}
