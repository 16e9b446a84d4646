//! Symbol-to-bitstring code tables

use std::collections::BTreeMap;

use crate::frequency::FrequencyTable;

/// Mapping from symbol to its `'0'`/`'1'` code, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, symbol: u8, code: String) {
        self.codes.insert(symbol, code);
    }

    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_str()))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // after sorting, a prefix sorts directly before some code it prefixes
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Payload length in bits for input with the given frequencies.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}
