//! Error types for huffman-tree-codec

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompressError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressError {
    #[error("empty input")]
    EmptyInput,

    #[error("corrupt tree data: {0}")]
    CorruptTreeData(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("symbol {0:#04x} has no code in this tree")]
    UnknownSymbol(u8),

    #[error("input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("decompression size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("round trip diverged from the input at byte {offset}")]
    RoundTripMismatch { offset: usize },

    #[error("serialization error: {0}")]
    SerializationError(String),
}
