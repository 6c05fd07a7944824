//! Sub promo type extraction.

use super::patterns::SUB_PROMO_TYPE;
use super::FieldExtractor;

#[derive(Default)]
pub struct SubPromoTypeExtractor;

impl SubPromoTypeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for SubPromoTypeExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<String> {
        let caps = SUB_PROMO_TYPE.captures(line)?;
        let value = caps[1].trim().to_uppercase();
        (!value.is_empty()).then_some(value)
    }
}
