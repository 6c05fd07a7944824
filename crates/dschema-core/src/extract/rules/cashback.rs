//! Vendor cashback checkbox extraction.

use super::patterns::{CASHBACK_EXCLUDED, CASHBACK_INCLUDED};
use super::FieldExtractor;
use crate::models::Flag;

/// Reads which trading-term box is checked.
#[derive(Default)]
pub struct CashbackExtractor;

impl CashbackExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for CashbackExtractor {
    type Output = Flag;

    fn extract(&self, line: &str) -> Option<Flag> {
        if CASHBACK_INCLUDED.is_match(line) {
            Some(Flag::Yes)
        } else if CASHBACK_EXCLUDED.is_match(line) {
            Some(Flag::No)
        } else {
            None
        }
    }
}
