//! Core library for trade-promotion agreement processing.
//!
//! This crate provides:
//! - Header field extraction from agreement text (contract number, period, brand, area)
//! - Keyword-based classification of extracted tables and row parsing
//! - Validation with configurable defaulting policy
//! - Compilation into discount schema documents, single or batched

pub mod batch;
pub mod breaks;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod tables;
pub mod validate;

pub use batch::BatchReconciler;
pub use breaks::BreakBuilder;
pub use error::{
    BatchError, DocumentFailure, DschemaError, DumpError, RequiredField, Result, ValidationError,
};
pub use extract::{ExtractionMatch, FieldExtractor, HeaderExtractor};
pub use models::{
    Customer, DiscountBreak, DiscountSchema, Document, DraftDocument, DschemaConfig, Profile,
    SelectionMode, Sequencing, ValidationPolicy,
};
pub use pipeline::{process_batch, process_single, Compiled, ParseOutcome, Pipeline, SourceDocument};
pub use tables::{Table, TableKind, TableParser};
pub use validate::Validator;
