//! Configuration for huffman-tree-codec

use serde::{Deserialize, Serialize};

use crate::error::{CompressError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Inputs longer than this are rejected before any tree is built.
    pub max_input_size: usize,
    /// Decode every freshly compressed payload and compare it with the input.
    pub verify_roundtrip: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            verify_roundtrip: false,
        }
    }
}

impl CompressionConfig {
    /// Load a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CompressError::SerializationError(e.to_string()))
    }

    pub(crate) fn check_input(&self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(CompressError::EmptyInput);
        }
        if data.len() > self.max_input_size {
            return Err(CompressError::InputTooLarge {
                size: data.len(),
                limit: self.max_input_size,
            });
        }
        Ok(())
    }
}
