//! Validity period extraction.

use chrono::NaiveDate;
use tracing::warn;

use super::patterns::VALIDITY_PERIOD;
use super::FieldExtractor;

/// Inclusive validity period as printed in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Date range extractor for `dd/mm/yyyy - dd/mm/yyyy`.
#[derive(Default)]
pub struct PeriodExtractor;

impl PeriodExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PeriodExtractor {
    type Output = Period;

    fn extract(&self, line: &str) -> Option<Period> {
        let caps = VALIDITY_PERIOD.captures(line)?;
        let from = NaiveDate::parse_from_str(&caps[1], "%d/%m/%Y");
        let to = NaiveDate::parse_from_str(&caps[2], "%d/%m/%Y");
        match (from, to) {
            (Ok(from), Ok(to)) => Some(Period { from, to }),
            _ => {
                warn!("Ignoring unparseable period: {}", &caps[0]);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_period() {
        let period = PeriodExtractor::new()
            .extract("PERIODE : 01/03/2024 – 31/03/2024")
            .unwrap();
        assert_eq!(period.from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(period.to, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_invalid_calendar_date_is_skipped() {
        assert_eq!(PeriodExtractor::new().extract("31/02/2024 - 01/03/2024"), None);
    }
}
