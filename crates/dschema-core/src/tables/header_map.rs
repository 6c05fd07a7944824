//! Header-keyed view of a data row.

use regex::Regex;

/// Cells of one row keyed by their column header.
///
/// Keys are unique: a repeated header keeps its first position and takes
/// the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    pairs: Vec<(String, String)>,
}

impl HeaderMap {
    /// Pair headers with cells; the shorter side decides the length.
    pub fn zip(headers: &[String], cells: &[String]) -> Self {
        let mut map = Self::default();
        for (key, value) in headers.iter().zip(cells) {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    /// Set `key`, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Non-empty value under the exact header `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Value of the first column whose header matches `family`.
    pub fn find_family(&self, family: &Regex) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| family.is_match(k))
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Exact header first, then the keyword family.
    pub fn resolve(&self, column: Option<&str>, family: &Regex) -> Option<&str> {
        column
            .and_then(|c| self.get(c))
            .or_else(|| self.find_family(family))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, v)| v.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.values().all(|v| v.trim().is_empty())
    }
}
