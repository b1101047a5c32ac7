//! Preorder binary encoding of a tree's keys
//!
//! Every subtree, empty or not, starts with a one byte tag. An empty subtree
//! is the single byte [`TAG_EMPTY`]. A present node is [`TAG_PRESENT`]
//! followed by its key as a 4 byte little-endian `i32`, then the encoding of
//! its left subtree, then its right subtree. There is no header, length
//! prefix or version field, so an empty tree encodes to exactly one byte.
//!
//! Decoding yields the keys in recorded preorder. Rebuilding a tree from them
//! goes through ordinary insertion, so the result holds the same key set and
//! satisfies the balance invariants but may differ in shape from the source.

use alloc::vec::Vec;

use crate::{AvlError, AvlTree, Result, utils::ByteReader, utils::Link};

/// Tag marking an empty subtree
pub const TAG_EMPTY: u8 = 1;

/// Tag marking a present node, followed by its key
pub const TAG_PRESENT: u8 = 0;

/// Encoded width of a key in bytes
pub const KEY_WIDTH: usize = core::mem::size_of::<i32>();

/// Encodes a tree into its preorder byte form
///
/// # Arguments
///
/// * `tree` - The tree to encode
///
/// # Returns
///
/// * `Vec<u8>` - `len * 5 + (len + 1)` bytes: one tag per node and per empty slot, one key per node
pub fn encode(tree: &AvlTree) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(tree.len()));
    encode_subtree(tree.root(), &mut out);
    out
}

/// Decodes a preorder byte form into its keys, in the order they were recorded
///
/// The whole input must be exactly one encoded tree.
///
/// # Arguments
///
/// * `bytes` - The encoded tree
///
/// # Errors
///
/// * [`AvlError::UnexpectedEof`] - the input ends inside a tag or key
/// * [`AvlError::InvalidTag`] - a tag byte is neither [`TAG_EMPTY`] nor [`TAG_PRESENT`]
/// * [`AvlError::TrailingBytes`] - bytes follow the end of the root subtree
pub fn decode(bytes: &[u8]) -> Result<Vec<i32>> {
    let mut reader = ByteReader::new(bytes);
    let mut keys = Vec::with_capacity(bytes.len() / (KEY_WIDTH + 2));

    // subtrees announced but not yet read; each present node announces two
    let mut pending = 1usize;
    while pending > 0 {
        pending -= 1;
        let offset = reader.position();
        match reader.read_u8()? {
            TAG_EMPTY => {}
            TAG_PRESENT => {
                keys.push(reader.read_i32()?);
                pending += 2;
            }
            tag => return Err(AvlError::InvalidTag { tag, offset }),
        }
    }

    if reader.remaining() > 0 {
        return Err(AvlError::TrailingBytes {
            offset: reader.position(),
        });
    }

    Ok(keys)
}

/// Size in bytes of the encoding of a tree with `len` nodes
#[inline]
pub const fn encoded_len(len: usize) -> usize {
    len * (KEY_WIDTH + 1) + len + 1
}

fn encode_subtree(link: &Link, out: &mut Vec<u8>) {
    let Some(node) = link.as_deref() else {
        out.push(TAG_EMPTY);
        return;
    };

    out.push(TAG_PRESENT);
    out.extend_from_slice(&node.key.to_le_bytes());
    encode_subtree(&node.left, out);
    encode_subtree(&node.right, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_encode_empty_tree() {
        let tree = AvlTree::new();
        assert_eq!(encode(&tree), vec![TAG_EMPTY]);
        assert_eq!(encoded_len(0), 1);
    }

    #[test]
    fn test_encode_single_node() {
        let tree: AvlTree = [10].into_iter().collect();
        assert_eq!(encode(&tree), vec![0, 10, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_encode_layout_is_preorder() {
        let tree: AvlTree = [10, 20, 30].into_iter().collect();
        let bytes = encode(&tree);

        let mut expected = vec![TAG_PRESENT];
        expected.extend_from_slice(&20i32.to_le_bytes());
        expected.push(TAG_PRESENT);
        expected.extend_from_slice(&10i32.to_le_bytes());
        expected.extend_from_slice(&[TAG_EMPTY, TAG_EMPTY]);
        expected.push(TAG_PRESENT);
        expected.extend_from_slice(&30i32.to_le_bytes());
        expected.extend_from_slice(&[TAG_EMPTY, TAG_EMPTY]);

        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), encoded_len(3));
    }

    #[test]
    fn test_decode_returns_preorder_keys() {
        let tree: AvlTree = (1..=7).collect();
        let keys = decode(&encode(&tree)).unwrap();
        assert_eq!(keys, tree.pre_order());
    }

    #[test]
    fn test_decode_negative_and_extreme_keys() {
        let tree: AvlTree = [i32::MIN, -1, 0, i32::MAX].into_iter().collect();
        let mut keys = decode(&encode(&tree)).unwrap();
        keys.sort_unstable();
        assert_eq!(keys, vec![i32::MIN, -1, 0, i32::MAX]);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(
            decode(&[]),
            Err(AvlError::UnexpectedEof { offset: 0 })
        ));
    }

    #[test]
    fn test_decode_truncated_key() {
        let bytes = [TAG_PRESENT, 1, 2];
        assert!(matches!(
            decode(&bytes),
            Err(AvlError::UnexpectedEof { offset: 1 })
        ));
    }

    #[test]
    fn test_decode_missing_child_tags() {
        // present node whose right subtree tag is cut off
        let bytes = [TAG_PRESENT, 5, 0, 0, 0, TAG_EMPTY];
        assert!(matches!(
            decode(&bytes),
            Err(AvlError::UnexpectedEof { offset: 6 })
        ));
    }

    #[test]
    fn test_decode_invalid_tag() {
        let bytes = [TAG_PRESENT, 5, 0, 0, 0, 7, TAG_EMPTY];
        assert!(matches!(
            decode(&bytes),
            Err(AvlError::InvalidTag { tag: 7, offset: 5 })
        ));
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let bytes = [TAG_EMPTY, TAG_EMPTY];
        assert!(matches!(
            decode(&bytes),
            Err(AvlError::TrailingBytes { offset: 1 })
        ));
    }

    #[test]
    fn test_decode_deep_left_spine() {
        // a degenerate but well-formed encoding: each node only has a left child
        let depth = 100_000;
        let mut bytes = Vec::with_capacity(depth * 6 + 1);
        for key in (0..depth as i32).rev() {
            bytes.push(TAG_PRESENT);
            bytes.extend_from_slice(&key.to_le_bytes());
        }
        bytes.extend(core::iter::repeat_n(TAG_EMPTY, depth + 1));

        let keys = decode(&bytes).unwrap();
        assert_eq!(keys.len(), depth);
        assert_eq!(keys.first(), Some(&(depth as i32 - 1)));
    }
}
