//! Error types for the dschema-core library.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the dschema library.
#[derive(Error, Debug)]
pub enum DschemaError {
    /// A single document failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A batch of documents could not be reconciled.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// Reading or writing a tabular dump failed.
    #[error("table dump error: {0}")]
    Dump(#[from] DumpError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Header fields a document cannot be compiled without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Identifier,
    Brand,
    SubPromoType,
    ValidityPeriod,
    Area,
    Sku,
    QtyAllocated,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Identifier => "promo contract number",
            RequiredField::Brand => "brand",
            RequiredField::SubPromoType => "sub promo type",
            RequiredField::ValidityPeriod => "validity period",
            RequiredField::Area => "distributor area",
            RequiredField::Sku => "SKU",
            RequiredField::QtyAllocated => "allocated quantity",
        };
        f.write_str(name)
    }
}

/// Errors raised while validating a parsed document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing after all fallbacks.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: RequiredField },

    /// Validity period is reversed.
    #[error("validity period starts {from} but ends {to}")]
    InvalidPeriod { from: NaiveDate, to: NaiveDate },

    /// A SKU entry still lacks data the schema needs.
    #[error("SKU {sku} is missing {missing}")]
    IncompleteSkuEntry { sku: String, missing: &'static str },
}

impl ValidationError {
    pub fn missing(field: RequiredField) -> Self {
        Self::MissingRequiredField { field }
    }
}

/// A document that failed inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// Source name of the failing document.
    pub source: String,
    /// Why it failed.
    pub error: ValidationError,
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.error)
    }
}

/// Errors raised while reconciling a batch of documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Nothing to reconcile.
    #[error("batch contains no documents")]
    Empty,

    /// Documents belong to more than one brand.
    #[error("all documents must share one brand, found: {}", brands.join(", "))]
    MixedBrands { brands: Vec<String> },

    /// Two documents carry the same promo contract number.
    #[error("duplicate promo contract number: {identifier}")]
    DuplicateIdentifier { identifier: String },

    /// One or more documents failed; the whole batch is discarded.
    #[error("{} document(s) failed:\n{}", failures.len(), join_failures(failures))]
    DocumentsFailed { failures: Vec<DocumentFailure> },
}

fn join_failures(failures: &[DocumentFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors related to the flat tabular dump.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Underlying CSV codec error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The writer could not be flushed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the dschema library.
pub type Result<T> = std::result::Result<T, DschemaError>;
