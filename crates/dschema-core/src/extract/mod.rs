//! Header field extraction from free text.

mod header;
pub mod rules;

pub use header::HeaderExtractor;
pub use rules::{ExtractionMatch, FieldExtractor, Resolution};
