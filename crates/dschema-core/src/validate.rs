//! Validation and defaulting of a draft into a [`Document`].

use tracing::{info, warn};

use crate::error::{RequiredField, ValidationError};
use crate::extract::rules::sku_from_filename;
use crate::models::{
    Area, Document, DraftDocument, DraftSkuEntry, DschemaConfig, Flag, SelectionMode, SkuEntry,
    StrataTier, ValidationPolicy,
};

/// Turns drafts into documents under one validation policy.
pub struct Validator<'a> {
    config: &'a DschemaConfig,
    policy: ValidationPolicy,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a DschemaConfig) -> Self {
        Self {
            config,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check required fields and fill every defaultable one.
    ///
    /// Defaults applied are appended to `warnings`.
    pub fn validate(
        &self,
        draft: DraftDocument,
        warnings: &mut Vec<String>,
    ) -> Result<Document, ValidationError> {
        let strict = self.policy == ValidationPolicy::Strict;

        let identifier = required(draft.identifier, RequiredField::Identifier)?;
        let brand = required(draft.brand, RequiredField::Brand)?;
        let sub_promo_type = required(draft.sub_promo_type, RequiredField::SubPromoType)?;
        let (valid_from, valid_to) = match (draft.valid_from, draft.valid_to) {
            (Some(from), Some(to)) if from > to => {
                return Err(ValidationError::InvalidPeriod { from, to });
            }
            (Some(from), Some(to)) => (from, to),
            _ => return Err(ValidationError::missing(RequiredField::ValidityPeriod)),
        };

        let qty_allocated = match draft.qty_allocated {
            Some(qty) => qty,
            None if strict => return Err(ValidationError::missing(RequiredField::QtyAllocated)),
            None => {
                note(warnings, "allocated quantity not found, using 1".to_string());
                1
            }
        };

        let vendor_cashback = draft.vendor_cashback.unwrap_or(Flag::Yes);

        let area = match (draft.area_code, draft.area_name, draft.org_id) {
            (Some(code), Some(name), Some(org_id)) => Area { code, name, org_id },
            _ => return Err(ValidationError::missing(RequiredField::Area)),
        };

        let mut entries = draft.sku_entries;
        if entries.is_empty() {
            let guessed = draft.source_name.as_deref().and_then(sku_from_filename);
            let Some(sku) = guessed else {
                return Err(ValidationError::missing(RequiredField::Sku));
            };
            note(warnings, format!("SKU taken from file name: {}", sku));
            entries.push(DraftSkuEntry {
                qty_allocated: Some(qty_allocated),
                uom: Some(self.config.default_uom.clone()),
                uom_code: Some(self.config.default_uom_code),
                ..DraftSkuEntry::new(sku)
            });
        }

        let (uom, uom_code) = match draft.uom {
            Some(uom) => {
                let code = draft.uom_code.unwrap_or_else(|| self.config.uom_code(&uom));
                (uom, code)
            }
            None => {
                note(
                    warnings,
                    format!("UOM not found, using {}", self.config.default_uom),
                );
                (
                    self.config.default_uom.clone(),
                    self.config.default_uom_code,
                )
            }
        };

        let sku_entries = entries
            .into_iter()
            .map(|entry| self.finish_entry(entry, qty_allocated, &uom, warnings))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Validated {} with {} SKU(s)",
            identifier,
            sku_entries.len()
        );

        Ok(Document {
            identifier,
            brand,
            sub_promo_type,
            valid_from,
            valid_to,
            qty_allocated,
            vendor_cashback,
            area,
            uom,
            uom_code,
            sku_entries,
            outlets: draft.outlets,
            selection_mode: SelectionMode::default(),
        })
    }

    fn finish_entry(
        &self,
        entry: DraftSkuEntry,
        doc_qty: u32,
        doc_uom: &str,
        warnings: &mut Vec<String>,
    ) -> Result<SkuEntry, ValidationError> {
        let strict = self.policy == ValidationPolicy::Strict;
        let sku = entry.sku;

        let uom = match entry.uom {
            Some(uom) => uom,
            None if strict => {
                return Err(ValidationError::IncompleteSkuEntry { sku, missing: "UOM" });
            }
            None => doc_uom.to_string(),
        };
        let uom_code = entry
            .uom_code
            .unwrap_or_else(|| self.config.uom_code(&uom));

        let qty_allocated = match entry.qty_allocated {
            Some(qty) => qty,
            None if strict => {
                return Err(ValidationError::IncompleteSkuEntry {
                    sku,
                    missing: "allocated quantity",
                });
            }
            None => doc_qty,
        };

        let mut strata_tiers = entry.strata_tiers;
        if strata_tiers.is_empty() {
            note(warnings, format!("no strata tiers for {}, using 0%", sku));
            strata_tiers.push(StrataTier::open_default());
        }

        Ok(SkuEntry {
            sku,
            qty_allocated,
            uom,
            uom_code,
            strata_tiers,
        })
    }
}

fn required(value: Option<String>, field: RequiredField) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::missing(field))
}

fn note(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}
