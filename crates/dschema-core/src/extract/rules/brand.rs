//! Brand extraction: labeled value, bare brand tokens and SKU prefixes.

use super::patterns::{BRAND_LABEL, BRAND_REF_SUFFIX, BRAND_TOKEN, SKU_BRAND_PREFIX};
use super::FieldExtractor;

/// Extractor for the value following a `BRAND` label.
#[derive(Default)]
pub struct BrandExtractor;

impl BrandExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for BrandExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<String> {
        let caps = BRAND_LABEL.captures(line)?;
        let value = caps[1].trim().to_uppercase();
        let brand = BRAND_REF_SUFFIX
            .split(&value)
            .next()
            .unwrap_or_default()
            .trim();

        if brand.is_empty() {
            None
        } else {
            Some(brand.to_string())
        }
    }
}

/// First known brand token in `text`, ignoring reference-number lines.
pub fn scan_brand_token(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| !line.to_uppercase().contains("REF CP NO"))
        .find_map(|line| BRAND_TOKEN.captures(line))
        .map(|caps| caps[1].to_uppercase())
}

/// Leading brand word of a catalog-shaped SKU such as `FORTUNE PCH @1LT`.
pub fn brand_from_sku(sku: &str) -> Option<String> {
    SKU_BRAND_PREFIX
        .captures(sku)
        .map(|caps| caps[1].to_uppercase())
}
