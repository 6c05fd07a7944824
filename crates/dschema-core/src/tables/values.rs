//! Parsing of quantity and percentage cells.

use std::str::FromStr;

use rust_decimal::Decimal;

/// `num/den` with integer division; a zero denominator yields `num`.
fn parse_fraction(value: &str) -> Option<u32> {
    let (num, den) = value.split_once('/')?;
    let num: u32 = num.trim().parse().ok()?;
    let den: u32 = den.trim().parse().ok()?;
    Some(if den == 0 { num } else { num / den })
}

/// Allocated quantity cell: `100`, `1.000` (dot as thousands separator)
/// or `100/4`.
pub fn parse_quantity(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.contains('/') {
        return parse_fraction(value);
    }
    let digits = value.replace('.', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One side of a minimum-quantity cell. Unreadable integers count as 0.
fn parse_bound(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.contains('/') {
        return parse_fraction(value);
    }
    let digits = value.replace(',', "");
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        Some(0)
    }
}

/// Lower and optional upper bound of a strata row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinQty {
    pub from: u32,
    pub to: Option<u32>,
}

/// Minimum-quantity cell: `10`, `1,000`, `20/2`, `1-10` or `10/2-20/2`.
///
/// Returns `None` when the cell is malformed or its lower bound is not
/// positive; such rows carry no tier.
pub fn parse_min_qty(value: &str) -> Option<MinQty> {
    let value = value.replace('\'', "");
    let value = value.trim();

    let (from, to) = match value.split_once('-') {
        Some((lower, upper)) => {
            let to = parse_bound(upper)?;
            (parse_bound(lower)?, (to > 0).then_some(to))
        }
        None => (parse_bound(value)?, None),
    };

    (from > 0).then_some(MinQty { from, to })
}

fn clean_percent(value: &str) -> String {
    value.replace(',', ".").replace('%', "").trim().to_string()
}

/// Discount percentage. Empty means 0; anything unreadable is `None`.
pub fn parse_discount(value: &str) -> Option<Decimal> {
    let value = clean_percent(value);
    if value.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(&value).ok()
}

/// Share discount percentage. Empty, `-` and unreadable values are 0.
pub fn parse_share(value: &str) -> Decimal {
    let value = clean_percent(value);
    if value.is_empty() || value == "-" {
        return Decimal::ZERO;
    }
    Decimal::from_str(&value).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("100/4"), Some(25));
        assert_eq!(parse_quantity("7/0"), Some(7));
        assert_eq!(parse_quantity("1.000"), Some(1000));
        assert_eq!(parse_quantity(" 250 "), Some(250));
        assert_eq!(parse_quantity("100 CTN"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("a/4"), None);
    }

    #[test]
    fn test_parse_min_qty() {
        assert_eq!(parse_min_qty("1-10"), Some(MinQty { from: 1, to: Some(10) }));
        assert_eq!(parse_min_qty("'11"), Some(MinQty { from: 11, to: None }));
        assert_eq!(parse_min_qty("1,000"), Some(MinQty { from: 1000, to: None }));
        assert_eq!(parse_min_qty("20/2"), Some(MinQty { from: 10, to: None }));
        assert_eq!(
            parse_min_qty("10/2 - 20/2"),
            Some(MinQty { from: 5, to: Some(10) })
        );
        assert_eq!(parse_min_qty("5-up"), Some(MinQty { from: 5, to: None }));
        assert_eq!(parse_min_qty("0"), None);
        assert_eq!(parse_min_qty("TOTAL"), None);
    }

    #[test]
    fn test_parse_percentages() {
        assert_eq!(parse_discount("2,5 %"), Some(Decimal::new(25, 1)));
        assert_eq!(parse_discount(""), Some(Decimal::ZERO));
        assert_eq!(parse_discount("n/a"), None);
        assert_eq!(parse_share("-"), Decimal::ZERO);
        assert_eq!(parse_share("x"), Decimal::ZERO);
        assert_eq!(parse_share("1"), Decimal::ONE);
    }
}
