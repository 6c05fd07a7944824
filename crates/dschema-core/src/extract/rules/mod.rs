//! Rule-based field extractors for promotion agreement text.
//!
//! Every rule works on one line at a time. A rule declares how repeated
//! matches across lines are reconciled through [`Resolution`].

pub mod brand;
pub mod cashback;
pub mod distributor;
pub mod identifier;
pub mod patterns;
pub mod period;
pub mod promo_type;
pub mod sku;
pub mod uom;

pub use brand::{brand_from_sku, scan_brand_token, BrandExtractor};
pub use cashback::CashbackExtractor;
pub use distributor::DistributorExtractor;
pub use identifier::IdentifierExtractor;
pub use period::{Period, PeriodExtractor};
pub use promo_type::SubPromoTypeExtractor;
pub use sku::{sku_from_filename, SkuExtractor};
pub use uom::{scan_uom_value, UomHintExtractor};

/// How a rule reconciles matches found on several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The first matching line wins.
    FirstMatch,
    /// Each later non-empty match replaces the previous one.
    LastMatch,
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a single line.
    fn extract(&self, line: &str) -> Option<Self::Output>;

    /// Conflict rule applied by [`FieldExtractor::resolve`].
    fn resolution(&self) -> Resolution {
        Resolution::LastMatch
    }

    /// Extract every occurrence of the field, one per matching line.
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch<Self::Output>> {
        text.lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let line = line.trim();
                self.extract(line)
                    .map(|value| ExtractionMatch::new(value, line).with_line(index))
            })
            .collect()
    }

    /// The winning match under this rule's [`Resolution`].
    fn resolve(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        let matches = self.extract_all(text);
        match self.resolution() {
            Resolution::FirstMatch => matches.into_iter().next(),
            Resolution::LastMatch => matches.into_iter().last(),
        }
    }
}

/// A value together with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Zero-based line index in the source text.
    pub line: Option<usize>,
    /// Source line that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            line: None,
            source: source.into(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}
