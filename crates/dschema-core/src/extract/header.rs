//! Header field pass over the free text of an agreement.

use tracing::{debug, warn};

use super::rules::{
    scan_brand_token, BrandExtractor, CashbackExtractor, DistributorExtractor, FieldExtractor,
    IdentifierExtractor, PeriodExtractor, SkuExtractor, SubPromoTypeExtractor, UomHintExtractor,
};
use crate::models::{DraftDocument, DschemaConfig};

/// Applies every header rule to the text and fills the draft.
pub struct HeaderExtractor<'a> {
    config: &'a DschemaConfig,
    identifier: IdentifierExtractor,
}

impl<'a> HeaderExtractor<'a> {
    pub fn new(config: &'a DschemaConfig) -> Self {
        Self {
            config,
            identifier: IdentifierExtractor::new(),
        }
    }

    /// Register an extra contract-number correction.
    pub fn with_identifier_correction(mut self, from: &str, to: &str) -> Self {
        self.identifier = self.identifier.with_correction(from, to);
        self
    }

    /// Run the text pass. Fields the text does not mention stay unset.
    pub fn extract(&self, text: &str, mut draft: DraftDocument) -> DraftDocument {
        if let Some(found) = self.identifier.resolve(text) {
            debug!("Contract number: {}", found.value);
            draft.identifier = Some(found.value);
        }

        if let Some(found) = PeriodExtractor::new().resolve(text) {
            debug!("Validity period: {} - {}", found.value.from, found.value.to);
            draft.valid_from = Some(found.value.from);
            draft.valid_to = Some(found.value.to);
        }

        if let Some(found) = BrandExtractor::new().resolve(text) {
            debug!("Brand: {}", found.value);
            draft.brand = Some(found.value);
        }

        if let Some(found) = DistributorExtractor::new().resolve(text) {
            let code = found.value;
            match self.config.area(&code) {
                Some(area) => {
                    debug!("Area {} -> {} ({})", code, area.area_name, area.org_id);
                    draft.area_name = Some(area.area_name.clone());
                    draft.org_id = Some(area.org_id);
                }
                None => warn!("Unknown distributor area code: {}", code),
            }
            draft.area_code = Some(code);
        }

        if let Some(found) = SubPromoTypeExtractor::new().resolve(text) {
            debug!("Sub promo type: {}", found.value);
            draft.sub_promo_type = Some(found.value);
        }

        if let Some(found) = CashbackExtractor::new().resolve(text) {
            draft.vendor_cashback = Some(found.value);
        }

        for found in SkuExtractor::new().extract_all(text) {
            debug!("SKU in text: {}", found.value);
            draft.upsert_entry(&found.value);
            draft.sku = Some(found.value);
        }

        if draft.uom.is_none() {
            if let Some(found) = UomHintExtractor::new().resolve(text) {
                let code = self.config.uom_code(&found.value);
                debug!("UOM in text: {} ({})", found.value, code);
                draft.uom = Some(found.value);
                draft.uom_code = Some(code);
            }
        }

        if draft.brand.is_none() {
            draft.brand = scan_brand_token(text);
            if let Some(brand) = &draft.brand {
                debug!("Brand from token scan: {}", brand);
            }
        }

        draft
    }
}
