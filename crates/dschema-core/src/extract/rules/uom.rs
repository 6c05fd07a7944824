//! Unit of measure hints.

use super::patterns::{UOM_HINT, UOM_VALUE};
use super::{FieldExtractor, Resolution};

/// UOM mentioned anywhere in the text. The first mention wins.
#[derive(Default)]
pub struct UomHintExtractor;

impl UomHintExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for UomHintExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<String> {
        UOM_HINT.captures(line).map(|caps| caps[2].to_uppercase())
    }

    fn resolution(&self) -> Resolution {
        Resolution::FirstMatch
    }
}

/// First UOM token among table cell values.
pub fn scan_uom_value<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    values
        .into_iter()
        .find_map(|value| UOM_VALUE.captures(value))
        .map(|caps| caps[1].to_uppercase())
}
