//! Distributor code extraction. The area is the last two characters.

use super::patterns::DISTRIBUTOR;
use super::FieldExtractor;

/// Extracts the area suffix of the distributor code.
#[derive(Default)]
pub struct DistributorExtractor;

impl DistributorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DistributorExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<String> {
        let caps = DISTRIBUTOR.captures(line)?;
        let code: Vec<char> = caps[1].chars().collect();
        if code.len() < 2 {
            return None;
        }
        Some(code[code.len() - 2..].iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_suffix() {
        let extractor = DistributorExtractor::new();
        assert_eq!(
            extractor.extract("DISTRIBUTOR: AB12-CV FOO"),
            Some("12".to_string())
        );
        assert_eq!(
            extractor.extract("Distributor = DST-03 - CV MAJU"),
            Some("03".to_string())
        );
        assert_eq!(extractor.extract("DISTRIBUTOR: X-CV"), None);
    }
}
