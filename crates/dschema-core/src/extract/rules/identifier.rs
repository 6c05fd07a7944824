//! Promo contract number extraction.

use super::patterns::IDENTIFIER;
use super::FieldExtractor;

/// Known misprints of contract numbers and their corrected form.
const CORRECTIONS: &[(&str, &str)] = &[("CP20DJFAJ001", "CP20DJFAJ01")];

/// Promo contract number extractor.
pub struct IdentifierExtractor {
    corrections: Vec<(String, String)>,
}

impl IdentifierExtractor {
    /// Create an extractor with the built-in corrections.
    pub fn new() -> Self {
        Self {
            corrections: CORRECTIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Add a literal substitution applied to every match.
    pub fn with_correction(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.corrections.push((from.into(), to.into()));
        self
    }
}

impl Default for IdentifierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IdentifierExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<String> {
        let found = IDENTIFIER.find(line)?;
        let mut identifier = found.as_str().to_string();
        for (from, to) in &self.corrections {
            identifier = identifier.replace(from.as_str(), to);
        }
        Some(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_identifier() {
        let extractor = IdentifierExtractor::new();
        assert_eq!(
            extractor.extract("NOMOR : CP24FRIPC012-3 / 2024"),
            Some("CP24FRIPC012-3".to_string())
        );
        assert_eq!(extractor.extract("no number here"), None);
    }

    #[test]
    fn test_known_misprint_is_corrected() {
        let extractor = IdentifierExtractor::new();
        assert_eq!(
            extractor.extract("CP20DJFAJ001-7"),
            Some("CP20DJFAJ01-7".to_string())
        );
    }

    #[test]
    fn test_last_line_wins() {
        let text = "CP24FRIPC012-1\nrevised: CP24FRIPC012-2";
        let found = IdentifierExtractor::new().resolve(text).unwrap();
        assert_eq!(found.value, "CP24FRIPC012-2");
    }
}
