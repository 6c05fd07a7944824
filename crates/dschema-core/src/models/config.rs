//! Configuration structures for the compilation pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DschemaError, Result};

/// Main configuration for dschema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DschemaConfig {
    /// Distributor area suffix -> area name and organization.
    pub areas: BTreeMap<String, AreaInfo>,

    /// UOM name -> downstream UOM code.
    pub uoms: BTreeMap<String, u32>,

    /// UOM used when a document never names one.
    pub default_uom: String,

    /// Code used for any UOM missing from `uoms`.
    pub default_uom_code: u32,

    /// Downstream schema constants.
    pub schema: SchemaConfig,

    /// Profile of the single-document flow.
    pub single: Profile,

    /// Profile of the batch flow.
    pub batch: Profile,
}

impl Default for DschemaConfig {
    fn default() -> Self {
        let areas = [
            ("01", "PST", 1000006),
            ("02", "TLB", 1000007),
            ("03", "KTB", 1000005),
            ("04", "PKL", 1000059),
        ]
        .into_iter()
        .map(|(code, name, org_id)| {
            (
                code.to_string(),
                AreaInfo {
                    area_name: name.to_string(),
                    org_id,
                },
            )
        })
        .collect();

        let uoms = [
            ("CTN10/BAG", 1000020),
            ("BAG", 1000009),
            ("CTN", 1000001),
            ("CTN1/BAG", 1000029),
            ("CTN6/PCH", 1000020),
            ("CTN12/PCH", 1000020),
            ("CTN4/JRG", 1000020),
        ]
        .into_iter()
        .map(|(name, code)| (name.to_string(), code))
        .collect();

        Self {
            areas,
            uoms,
            default_uom: "KG".to_string(),
            default_uom_code: 1000000,
            schema: SchemaConfig::default(),
            single: Profile {
                validation: ValidationPolicy::Lenient,
                sequencing: Sequencing::Fixed,
            },
            batch: Profile {
                validation: ValidationPolicy::Lenient,
                sequencing: Sequencing::SizeBanded,
            },
        }
    }
}

/// Area table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaInfo {
    pub area_name: String,
    pub org_id: u32,
}

/// Constants of the downstream discount schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Document type of a discount schema.
    pub doctype_id: u32,

    /// Vendor funding the cashback.
    pub vendor_id: u32,

    /// Sub promo types whose share break ends one below the largest tier start.
    pub reduced_bound_promo_types: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            doctype_id: 1000134,
            vendor_id: 1000078,
            reduced_bound_promo_types: vec![
                "STRATA DISCOUNT".to_string(),
                "DEAL KHUSUS".to_string(),
            ],
        }
    }
}

/// How strictly a draft is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Missing quantities and entry UOMs are errors.
    Strict,
    /// Missing quantities and entry UOMs are defaulted.
    #[default]
    Lenient,
}

/// How break groups are numbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sequencing {
    /// 10 for cashback, 20 for share.
    #[default]
    Fixed,
    /// Bands of 10/30/50 chosen by the pack size in the SKU name.
    SizeBanded,
}

/// Behavior switches of one processing flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub validation: ValidationPolicy,
    pub sequencing: Sequencing,
}

impl DschemaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DschemaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DschemaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a two-character distributor suffix.
    pub fn area(&self, code: &str) -> Option<&AreaInfo> {
        self.areas.get(code)
    }

    /// Code for a UOM name, falling back to the sentinel.
    pub fn uom_code(&self, uom: &str) -> u32 {
        self.uoms
            .get(uom)
            .copied()
            .unwrap_or(self.default_uom_code)
    }
}
