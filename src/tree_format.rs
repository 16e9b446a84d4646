//! Linear tree encoding
//!
//! A tree is written post-order (left, right, self). Branches are `B`, leaves
//! are `L` followed by their symbol. Two symbols are escaped so the final
//! byte of every token identifies its kind when read back to front:
//!
//! | symbol | token   |
//! |--------|---------|
//! | `B`    | `L\b`   |
//! | `\`    | `L\\`   |
//! | other  | `L<s>`  |
//!
//! A trailing `B` is therefore always a branch, and any other trailing byte
//! closes a leaf. Weights are not stored.

use tracing::{debug, warn};

use crate::error::{CompressError, Result};
use crate::huffman::HuffNode;

const BRANCH: u8 = b'B';
const LEAF: u8 = b'L';
const ESCAPE: u8 = b'\\';
const ESCAPED_BRANCH: u8 = b'b';

/// No tree over a byte alphabet is deeper than 255 edges.
const MAX_DEPTH: usize = 256;

pub fn serialize_tree(root: &HuffNode) -> Vec<u8> {
    let mut out = Vec::new();
    write_node(root, &mut out);
    debug!(bytes = out.len(), "serialized tree");
    out
}

fn write_node(node: &HuffNode, out: &mut Vec<u8>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            out.push(LEAF);
            match *symbol {
                BRANCH => out.extend_from_slice(&[ESCAPE, ESCAPED_BRANCH]),
                ESCAPE => out.extend_from_slice(&[ESCAPE, ESCAPE]),
                s => out.push(s),
            }
        }
        HuffNode::Branch { left, right, .. } => {
            write_node(left, out);
            write_node(right, out);
            out.push(BRANCH);
        }
    }
}

/// Rebuild a tree from [`serialize_tree`] output.
///
/// Leaf weights come back as 0 and branch weights as the sum of their
/// children; only the shape and the symbols are meaningful.
pub fn deserialize_tree(data: &[u8]) -> Result<HuffNode> {
    let mut reader = ReverseReader::new(data);
    let root = reader.read_node(0).map_err(|e| {
        warn!(bytes = data.len(), error = %e, "rejected serialized tree");
        e
    })?;
    if reader.remaining() != 0 {
        let e = corrupt(format!(
            "{} unconsumed byte(s) before the root",
            reader.remaining()
        ));
        warn!(bytes = data.len(), error = %e, "rejected serialized tree");
        return Err(e);
    }
    debug!(bytes = data.len(), depth = root.depth(), "deserialized tree");
    Ok(root)
}

/// Cursor that consumes a byte slice from the end towards the start.
struct ReverseReader<'a> {
    data: &'a [u8],
    pos: usize,
    seen: [bool; 256],
}

impl<'a> ReverseReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: data.len(),
            seen: [false; 256],
        }
    }

    fn remaining(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.pos.checked_sub(1).map(|i| self.data[i])
    }

    fn take(&mut self) -> Result<u8> {
        let byte = self
            .peek()
            .ok_or_else(|| corrupt("unexpected start of data".to_string()))?;
        self.pos -= 1;
        Ok(byte)
    }

    fn read_node(&mut self, depth: usize) -> Result<HuffNode> {
        if depth > MAX_DEPTH {
            return Err(corrupt(format!("nesting deeper than {MAX_DEPTH}")));
        }

        let last = self.take()?;
        if last == BRANCH {
            // written left, right, self: read back as self, right, left
            let right = self.read_node(depth + 1)?;
            let left = self.read_node(depth + 1)?;
            return Ok(HuffNode::merge(left, right));
        }

        let symbol = if self.peek() == Some(ESCAPE) {
            self.pos -= 1;
            match last {
                ESCAPED_BRANCH => BRANCH,
                ESCAPE => ESCAPE,
                other => {
                    return Err(corrupt(format!(
                        "invalid escape sequence \\{:?}",
                        other as char
                    )))
                }
            }
        } else {
            last
        };

        match self.take()? {
            LEAF => {}
            other => {
                return Err(corrupt(format!(
                    "expected leaf marker at offset {}, found {:?}",
                    self.pos, other as char
                )))
            }
        }

        // each symbol owns exactly one leaf
        if std::mem::replace(&mut self.seen[symbol as usize], true) {
            return Err(corrupt(format!(
                "duplicate leaf symbol {:?} at offset {}",
                symbol as char, self.pos
            )));
        }
        Ok(HuffNode::leaf(symbol, 0))
    }
}

fn corrupt(msg: String) -> CompressError {
    CompressError::CorruptTreeData(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::huffman::build_tree;

    fn branch(left: HuffNode, right: HuffNode) -> HuffNode {
        HuffNode::merge(left, right)
    }

    fn leaf(symbol: u8) -> HuffNode {
        HuffNode::leaf(symbol, 0)
    }

    #[test]
    fn test_abracadabra_layout() {
        let root = build_tree(&FrequencyTable::from_bytes(b"abracadabra")).unwrap();
        assert_eq!(serialize_tree(&root), b"LaLcLdBLbLrBBB".to_vec());
    }

    #[test]
    fn test_single_leaf() {
        assert_eq!(serialize_tree(&leaf(b'q')), b"Lq".to_vec());
        assert_eq!(deserialize_tree(b"Lq").unwrap(), leaf(b'q'));
    }

    #[test]
    fn test_reserved_symbols_roundtrip() {
        // symbols equal to the markers and the escape byte
        let tree = branch(
            branch(leaf(b'L'), leaf(b'B')),
            branch(leaf(b'\\'), branch(leaf(b'b'), leaf(b'L' + 1))),
        );
        let bytes = serialize_tree(&tree);
        assert_eq!(bytes, b"LLL\\bBL\\\\LbLMBBB".to_vec());
        let back = deserialize_tree(&bytes).unwrap();
        assert_eq!(back.leaf_symbols(), tree.leaf_symbols());
        assert_eq!(back, tree);
    }

    #[test]
    fn test_ambiguous_in_naive_grammar() {
        // unescaped this would read "LLB" as a leaf 'B' after a leaf 'L'
        let tree = branch(leaf(b'x'), leaf(b'L'));
        let bytes = serialize_tree(&tree);
        assert_eq!(bytes, b"LxLLB".to_vec());
        assert_eq!(deserialize_tree(&bytes).unwrap(), tree);
    }

    #[test]
    fn test_every_byte_value() {
        let freq: FrequencyTable = (0..=255u8).map(|s| (s, s as u64 + 1)).collect();
        let root = build_tree(&freq).unwrap();
        let back = deserialize_tree(&serialize_tree(&root)).unwrap();
        assert_eq!(back.leaf_symbols(), root.leaf_symbols());
    }

    #[test]
    fn test_placeholder_weights() {
        let root = build_tree(&FrequencyTable::from_bytes(b"abracadabra")).unwrap();
        let back = deserialize_tree(&serialize_tree(&root)).unwrap();
        assert_eq!(back.weight(), 0);
    }

    #[test]
    fn test_corrupt_inputs() {
        let cases: [&[u8]; 10] = [
            b"",
            b"B",
            b"LaB",
            b"a",
            b"Xa",
            b"L\\q",
            b"LaLb",
            b"LaLbBB",
            b"LaLaB",
            b"L\\bL\\bB",
        ];
        for bad in cases {
            let err = deserialize_tree(bad).unwrap_err();
            assert!(
                matches!(err, CompressError::CorruptTreeData(_)),
                "{:?} gave {:?}",
                String::from_utf8_lossy(bad),
                err
            );
        }
    }

    #[test]
    fn test_depth_limit() {
        let bytes = vec![BRANCH; 10_000];
        let err = deserialize_tree(&bytes).unwrap_err();
        assert!(matches!(err, CompressError::CorruptTreeData(_)));
    }
}
