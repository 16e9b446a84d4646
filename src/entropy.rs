//! Entropy statistics for judging how close a code table gets to the
//! Shannon bound.

use crate::codes::CodeTable;
use crate::frequency::FrequencyTable;

/// Shannon entropy of the table in bits per symbol.
pub fn shannon_entropy(frequencies: &FrequencyTable) -> f64 {
    let total = frequencies.total();
    if total == 0 {
        return 0.0;
    }
    let len = total as f64;
    let mut entropy = 0.0;
    for (_, f) in frequencies.iter() {
        let p = f as f64 / len;
        entropy -= p * p.log2();
    }
    entropy
}

/// Expected code length in bits per symbol.
pub fn average_code_length(frequencies: &FrequencyTable, codes: &CodeTable) -> f64 {
    let total = frequencies.total();
    if total == 0 {
        return 0.0;
    }
    codes.encoded_len(frequencies) as f64 / total as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeStats {
    pub entropy_bits: f64,
    pub average_code_length: f64,
    /// `entropy_bits / average_code_length`, 1.0 when both are zero.
    pub efficiency: f64,
}

impl CodeStats {
    pub fn compute(frequencies: &FrequencyTable, codes: &CodeTable) -> Self {
        let entropy_bits = shannon_entropy(frequencies);
        let average_code_length = average_code_length(frequencies, codes);
        let efficiency = if average_code_length > 0.0 {
            entropy_bits / average_code_length
        } else {
            1.0
        };
        Self {
            entropy_bits,
            average_code_length,
            efficiency,
        }
    }
}
