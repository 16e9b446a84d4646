//! huffman-tree-codec: Huffman code trees with a portable tree encoding.
//!
//! - Frequency-driven tree construction over a byte alphabet
//! - Prefix-free code generation by tree traversal
//! - A compact linear tree format (`B` / `L<symbol>`) parsed back to front
//! - Decoding of `'0'`/`'1'` payloads against a reconstructed tree
//!
//! The payload and the serialized tree are independent outputs of the same
//! tree; [`Compressor`] bundles them into a [`CompressedOutput`] for callers
//! who want a single artifact.

pub mod codes;
pub mod config;
pub mod entropy;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod min_heap;
pub mod tree_format;

pub use crate::codes::CodeTable;
pub use crate::config::CompressionConfig;
pub use crate::error::{CompressError, Result};
pub use crate::frequency::FrequencyTable;
pub use crate::huffman::{build_tree, generate_codes, HuffNode, HuffmanTree};
pub use crate::tree_format::{deserialize_tree, serialize_tree};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entropy::CodeStats;

/// Payload and tree from one compression run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedOutput {
    pub original_size: usize,
    pub payload: String,
    pub tree: Vec<u8>,
    /// Payload bits over input bits.
    pub ratio: f64,
    pub metadata: CompressionMetadata,
}

/// Metadata about the compression process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionMetadata {
    pub distinct_symbols: usize,
    pub payload_bits: usize,
    pub entropy_bits: f64,
    pub average_code_length: f64,
}

impl CompressedOutput {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CompressError::SerializationError(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| CompressError::SerializationError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CompressError::SerializationError(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CompressError::SerializationError(e.to_string()))
    }
}

/// The main compressor engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Build a tree for `data` and encode `data` with it.
    pub fn compress(&self, data: &[u8]) -> Result<CompressedOutput> {
        self.config.check_input(data)?;

        let frequencies = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let payload = tree.encode(data)?;
        let stats = CodeStats::compute(&frequencies, tree.codes());

        if self.config.verify_roundtrip {
            check_roundtrip(data, &tree.decode(&payload)?)?;
        }

        let ratio = payload.len() as f64 / (data.len() as f64 * 8.0);
        debug!(
            original_size = data.len(),
            payload_bits = payload.len(),
            ratio,
            "compressed"
        );

        Ok(CompressedOutput {
            original_size: data.len(),
            tree: tree.serialize_tree(),
            ratio,
            metadata: CompressionMetadata {
                distinct_symbols: frequencies.len(),
                payload_bits: payload.len(),
                entropy_bits: stats.entropy_bits,
                average_code_length: stats.average_code_length,
            },
            payload,
        })
    }

    /// Decode a bundled output, checking it against its recorded size.
    pub fn decompress(&self, output: &CompressedOutput) -> Result<Vec<u8>> {
        let decoded = HuffmanTree::new().decompress(&output.payload, &output.tree)?;
        if decoded.len() != output.original_size {
            return Err(CompressError::SizeMismatch {
                expected: output.original_size,
                actual: decoded.len(),
            });
        }
        Ok(decoded)
    }
}

/// Lengths are compared first; equal lengths report the first differing byte.
fn check_roundtrip(expected: &[u8], decoded: &[u8]) -> Result<()> {
    if decoded.len() != expected.len() {
        return Err(CompressError::SizeMismatch {
            expected: expected.len(),
            actual: decoded.len(),
        });
    }
    match expected.iter().zip(decoded).position(|(a, b)| a != b) {
        Some(offset) => Err(CompressError::RoundTripMismatch { offset }),
        None => Ok(()),
    }
}
