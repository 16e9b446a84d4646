//! Huffman code trees
//!
//! Builds a code tree from symbol frequencies, derives the prefix-free code
//! table from it, and encodes/decodes `'0'`/`'1'` payloads against it.
//!
//! Left edges are `0`, right edges are `1`. A tree with a single distinct
//! symbol is a lone leaf whose code is `"0"`.

use tracing::{debug, trace};

use crate::codes::CodeTable;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::{PriorityQueue, Weighted};
use crate::tree_format;

/// Code assigned to the only symbol of a one-leaf tree.
pub const SINGLE_LEAF_CODE: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Branch {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new branch weighing their sum.
    pub fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Branch {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Branch { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// The leaf's symbol, `None` for branches.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Branch { .. } => None,
        }
    }

    /// Leaf symbols in left-to-right order.
    pub fn leaf_symbols(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<u8>) {
        match self {
            HuffNode::Leaf { symbol, .. } => out.push(*symbol),
            HuffNode::Branch { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Weighted for HuffNode {
    fn weight(&self) -> u64 {
        HuffNode::weight(self)
    }
}

/// Build a Huffman tree from a non-empty frequency table.
///
/// Leaves enter the queue in ascending symbol order and equal weights leave
/// it first-in first-out, so the same table always yields the same shape.
pub fn build_tree(frequencies: &FrequencyTable) -> Result<HuffNode> {
    if frequencies.is_empty() {
        return Err(CompressError::EmptyInput);
    }

    let mut queue = PriorityQueue::with_capacity(frequencies.len());
    for (symbol, count) in frequencies.iter() {
        queue.insert(HuffNode::leaf(symbol, count));
    }

    while queue.size() > 1 {
        let (Some(left), Some(right)) = (queue.remove_min(), queue.remove_min()) else {
            break;
        };
        queue.insert(HuffNode::merge(left, right));
    }

    let root = queue.remove_min().ok_or(CompressError::EmptyInput)?;
    debug!(
        distinct_symbols = frequencies.len(),
        root_weight = root.weight(),
        depth = root.depth(),
        "built huffman tree"
    );
    Ok(root)
}

/// Assign every leaf the path from the root to it.
///
/// No root means no codes.
pub fn generate_codes(root: Option<&HuffNode>) -> CodeTable {
    let mut codes = CodeTable::new();
    match root {
        None => {}
        Some(HuffNode::Leaf { symbol, .. }) => codes.insert(*symbol, SINGLE_LEAF_CODE.to_string()),
        Some(node) => walk_codes(node, &mut String::new(), &mut codes),
    }
    codes
}

fn walk_codes(node: &HuffNode, prefix: &mut String, codes: &mut CodeTable) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            trace!(symbol, code = %prefix, "assigned code");
            codes.insert(*symbol, prefix.clone());
        }
        HuffNode::Branch { left, right, .. } => {
            prefix.push('0');
            walk_codes(left, prefix, codes);
            prefix.pop();
            prefix.push('1');
            walk_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}

/// Concatenate the codes of every byte of `data`.
pub fn encode_with(codes: &CodeTable, data: &[u8]) -> Result<String> {
    let mut bits = String::new();
    for &b in data {
        let code = codes.get(b).ok_or(CompressError::UnknownSymbol(b))?;
        bits.push_str(code);
    }
    Ok(bits)
}

/// Walk `payload` against `root`, emitting a symbol at every leaf.
pub fn decode_with(root: &HuffNode, payload: &str) -> Result<Vec<u8>> {
    let mut output = Vec::new();

    if let HuffNode::Leaf { symbol, .. } = root {
        for (offset, bit) in payload.bytes().enumerate() {
            match bit {
                b'0' => output.push(*symbol),
                b'1' => {
                    return Err(CompressError::MalformedPayload(format!(
                        "bit '1' at offset {offset} has no edge in a single-leaf tree"
                    )))
                }
                other => return Err(not_a_bit(other, offset)),
            }
        }
        return Ok(output);
    }

    let mut node = root;
    let mut code_start = 0;
    for (offset, bit) in payload.bytes().enumerate() {
        let HuffNode::Branch { left, right, .. } = node else {
            unreachable!("cursor is reset to the root at every leaf");
        };
        node = match bit {
            b'0' => left.as_ref(),
            b'1' => right.as_ref(),
            other => return Err(not_a_bit(other, offset)),
        };
        if let HuffNode::Leaf { symbol, .. } = node {
            output.push(*symbol);
            node = root;
            code_start = offset + 1;
        }
    }

    if code_start != payload.len() {
        return Err(CompressError::MalformedPayload(format!(
            "{} trailing bit(s) do not complete a code",
            payload.len() - code_start
        )));
    }
    Ok(output)
}

fn not_a_bit(byte: u8, offset: usize) -> CompressError {
    CompressError::MalformedPayload(format!(
        "byte {byte:#04x} at offset {offset} is not '0' or '1'"
    ))
}

/// A code tree together with the code table derived from it.
///
/// Each compress or decompress call replaces both, so one instance must not
/// be shared between concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    root: Option<HuffNode>,
    codes: CodeTable,
}

impl HuffmanTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let root = build_tree(frequencies)?;
        Ok(Self::from_root(root))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Rebuild a tree from its serialized form. Weights are placeholders.
    pub fn from_serialized(serialized: &[u8]) -> Result<Self> {
        let root = tree_format::deserialize_tree(serialized)?;
        Ok(Self::from_root(root))
    }

    fn from_root(root: HuffNode) -> Self {
        let codes = generate_codes(Some(&root));
        Self {
            root: Some(root),
            codes,
        }
    }

    pub fn root(&self) -> Option<&HuffNode> {
        self.root.as_ref()
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn leaf_symbols(&self) -> Vec<u8> {
        self.root.as_ref().map(HuffNode::leaf_symbols).unwrap_or_default()
    }

    /// Build a fresh tree for `input` and return its encoded payload.
    pub fn compress(&mut self, input: &[u8]) -> Result<String> {
        if input.is_empty() {
            return Err(CompressError::EmptyInput);
        }
        let tree = Self::from_bytes(input)?;
        let payload = tree.encode(input)?;
        *self = tree;
        Ok(payload)
    }

    /// Serialize the current tree; empty when there is none.
    pub fn serialize_tree(&self) -> Vec<u8> {
        self.root
            .as_ref()
            .map(tree_format::serialize_tree)
            .unwrap_or_default()
    }

    /// Replace the current tree with the one in `serialized` and decode
    /// `payload` against it.
    ///
    /// On any error the current tree is left untouched.
    pub fn decompress(&mut self, payload: &str, serialized: &[u8]) -> Result<Vec<u8>> {
        let tree = Self::from_serialized(serialized)?;
        let output = tree.decode(payload)?;
        *self = tree;
        Ok(output)
    }

    /// Encode with the current code table.
    pub fn encode(&self, input: &[u8]) -> Result<String> {
        encode_with(&self.codes, input)
    }

    /// Decode against the current tree.
    pub fn decode(&self, payload: &str) -> Result<Vec<u8>> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| CompressError::MalformedPayload("no tree to decode against".into()))?;
        decode_with(root, payload)
    }
}
