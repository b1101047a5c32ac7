use alloc::{boxed::Box, vec::Vec};
use core::cmp::Ordering;

#[cfg(feature = "std")]
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    Layout, Result, codec,
    utils::{Link, Node, balance_factor, max_key, min_key, rotate_left, rotate_right, verify_subtree},
};

#[cfg(feature = "std")]
use crate::AvlError;

/// A height-balanced binary search tree over unique `i32` keys.
///
/// The tree keeps, for every node, `|height(left) - height(right)| <= 1`,
/// so lookups, insertions and removals are O(log n). Each node owns its
/// children outright; mutations rebuild the touched path on the way back up,
/// applying at most one single or double rotation per ancestor.
///
/// Key features:
/// - Set semantics: inserting a present key or removing an absent one is a no-op
/// - Indented text rendering via [`layout`](Self::layout)
/// - Compact preorder binary persistence via [`to_bytes`](Self::to_bytes) and,
///   with the `std` feature, [`serialize`](Self::serialize) / [`deserialize`](Self::deserialize)
///
/// # Examples
///
/// ```
/// use avl_index::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
///
/// assert!(tree.search(20));
/// assert!(!tree.search(40));
/// assert_eq!(tree.pre_order(), vec![20, 10, 30]);
///
/// tree.remove(20);
/// assert_eq!(tree.in_order(), vec![10, 30]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AvlTree {
    /// Top of the tree, `None` when empty
    root: Link,

    /// Number of keys currently stored
    len: usize,
}

impl AvlTree {
    /// Creates an empty tree
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the tree
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no keys
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree: 0 when empty, 1 for a single key
    #[inline]
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.height)
    }

    /// Inserts a key, rebalancing the path back to the root
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the key was added, `false` if it was already present
    pub fn insert(&mut self, key: i32) -> bool {
        let before = self.len;
        self.root = Some(Self::insert_node(self.root.take(), key, &mut self.len));

        debug_assert!(
            self.verify_avl_invariants(),
            "AVL invariants violated after insertion"
        );

        self.len != before
    }

    /// Removes a key, rebalancing the path back to the root
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the key was present and removed, `false` otherwise
    pub fn remove(&mut self, key: i32) -> bool {
        let before = self.len;
        self.root = Self::remove_node(self.root.take(), key, &mut self.len);

        debug_assert!(
            self.verify_avl_invariants(),
            "AVL invariants violated after removal"
        );

        self.len != before
    }

    /// Returns `true` if the tree contains `key`
    pub fn search(&self, key: i32) -> bool {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Smallest key, or `None` if the tree is empty
    pub fn min(&self) -> Option<i32> {
        self.root.as_deref().map(min_key)
    }

    /// Largest key, or `None` if the tree is empty
    pub fn max(&self) -> Option<i32> {
        self.root.as_deref().map(max_key)
    }

    /// Drops every node and resets the tree to empty
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Keys in ascending order
    pub fn in_order(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.len);
        Self::collect_in_order(&self.root, &mut keys);
        keys
    }

    /// Keys in preorder (node, left, right), the order the binary encoding records them
    pub fn pre_order(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.len);
        Self::collect_pre_order(&self.root, &mut keys);
        keys
    }

    /// Sideways indented rendering of the tree, see [`Layout`]
    pub const fn layout(&self) -> Layout<'_> {
        Layout::new(self)
    }

    /// Encodes the tree in its preorder binary form, see [`codec`]
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Builds a tree by inserting every key recorded in a preorder binary form
    ///
    /// # Arguments
    ///
    /// * `bytes` - The encoded tree
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The rebuilt tree, or the decode error
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut tree = Self::new();
        tree.load_bytes(bytes)?;
        Ok(tree)
    }

    /// Replaces the contents of the tree with the keys recorded in `bytes`
    ///
    /// The input is fully decoded before the tree is touched, so on error the
    /// current contents are kept. On success the tree is cleared and every
    /// recorded key is reinserted in recorded order; the resulting shape
    /// follows from those insertions, not from the recorded structure.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The encoded tree
    ///
    /// # Returns
    ///
    /// * `Result<()>` - The decode error, if any
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let keys = codec::decode(bytes).inspect_err(|err| {
            log::error!("failed to decode tree: {err}");
        })?;
        self.rebuild(keys);
        Ok(())
    }

    /// Writes the indented layout to standard output
    #[cfg(feature = "std")]
    pub fn print(&self) {
        std::print!("{}", self.layout());
    }

    /// Writes the indented layout to a text file, replacing its contents
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file
    ///
    /// # Returns
    ///
    /// * `Result<()>` - [`AvlError::Io`] if the file cannot be created or written
    #[cfg(feature = "std")]
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| io_error(path, source))?;

        let mut writer = BufWriter::new(file);
        write!(writer, "{}", self.layout())
            .and_then(|()| writer.flush())
            .map_err(|source| io_error(path, source))
    }

    /// Writes the preorder binary form to a file, replacing its contents
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file
    ///
    /// # Returns
    ///
    /// * `Result<()>` - [`AvlError::Io`] if the file cannot be created or written
    #[cfg(feature = "std")]
    pub fn serialize<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes();
        std::fs::write(path, &bytes).map_err(|source| io_error(path, source))?;

        log::debug!(
            "serialized {} keys ({} bytes) to {}",
            self.len,
            bytes.len(),
            path.display()
        );
        Ok(())
    }

    /// Replaces the contents of the tree with the keys stored in a file
    ///
    /// Same semantics as [`load_bytes`](Self::load_bytes): if the file cannot
    /// be read or is malformed, the tree is left unchanged.
    ///
    /// # Arguments
    ///
    /// * `path` - Source file
    ///
    /// # Returns
    ///
    /// * `Result<()>` - [`AvlError::Io`] or a decode error
    #[cfg(feature = "std")]
    pub fn deserialize<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| io_error(path, source))?;
        let keys = codec::decode(&bytes).inspect_err(|err| {
            log::error!("failed to decode tree from {}: {err}", path.display());
        })?;

        let recorded = keys.len();
        self.rebuild(keys);

        log::debug!(
            "deserialized {recorded} keys ({} bytes) from {}",
            bytes.len(),
            path.display()
        );
        Ok(())
    }

    pub(crate) const fn root(&self) -> &Link {
        &self.root
    }

    fn rebuild(&mut self, keys: Vec<i32>) {
        self.clear();
        for key in keys {
            self.insert(key);
        }
    }

    fn insert_node(link: Link, key: i32, len: &mut usize) -> Box<Node> {
        let Some(mut node) = link else {
            *len += 1;
            return Box::new(Node::leaf(key));
        };

        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::insert_node(node.left.take(), key, len)),
            Ordering::Greater => node.right = Some(Self::insert_node(node.right.take(), key, len)),
            Ordering::Equal => return node,
        }

        node.update_height();
        Self::rebalance_after_insert(node, key)
    }

    /// Picks the rotation case by where `key` landed relative to the heavy child
    fn rebalance_after_insert(mut node: Box<Node>, key: i32) -> Box<Node> {
        let factor = node.balance_factor();

        if factor > 1 {
            if let Some(left_key) = node.left.as_ref().map(|left| left.key) {
                if key < left_key {
                    log::trace!("insert {key}: right rotation at {}", node.key);
                    return rotate_right(node);
                }
                if key > left_key {
                    log::trace!("insert {key}: left-right rotation at {}", node.key);
                    node.left = node.left.take().map(rotate_left);
                    return rotate_right(node);
                }
            }
        } else if factor < -1 {
            if let Some(right_key) = node.right.as_ref().map(|right| right.key) {
                if key > right_key {
                    log::trace!("insert {key}: left rotation at {}", node.key);
                    return rotate_left(node);
                }
                if key < right_key {
                    log::trace!("insert {key}: right-left rotation at {}", node.key);
                    node.right = node.right.take().map(rotate_right);
                    return rotate_left(node);
                }
            }
        }

        node
    }

    fn remove_node(link: Link, key: i32, len: &mut usize) -> Link {
        let mut node = link?;

        match key.cmp(&node.key) {
            Ordering::Less => node.left = Self::remove_node(node.left.take(), key, len),
            Ordering::Greater => node.right = Self::remove_node(node.right.take(), key, len),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => {
                    *len -= 1;
                    return None;
                }
                (Some(child), None) | (None, Some(child)) => {
                    // the sole child takes this position with its subtrees intact
                    *len -= 1;
                    node = child;
                }
                (Some(left), Some(right)) => {
                    let successor = min_key(&right);
                    node.key = successor;
                    node.left = Some(left);
                    node.right = Self::remove_node(Some(right), successor, len);
                }
            },
        }

        node.update_height();
        Some(Self::rebalance_after_remove(node))
    }

    /// Picks the rotation case by the balance factor of the heavy child
    fn rebalance_after_remove(mut node: Box<Node>) -> Box<Node> {
        let factor = node.balance_factor();

        if factor > 1 {
            if balance_factor(&node.left) >= 0 {
                log::trace!("remove: right rotation at {}", node.key);
                return rotate_right(node);
            }
            log::trace!("remove: left-right rotation at {}", node.key);
            node.left = node.left.take().map(rotate_left);
            return rotate_right(node);
        }

        if factor < -1 {
            if balance_factor(&node.right) <= 0 {
                log::trace!("remove: left rotation at {}", node.key);
                return rotate_left(node);
            }
            log::trace!("remove: right-left rotation at {}", node.key);
            node.right = node.right.take().map(rotate_right);
            return rotate_left(node);
        }

        node
    }

    fn collect_in_order(link: &Link, keys: &mut Vec<i32>) {
        if let Some(node) = link.as_deref() {
            Self::collect_in_order(&node.left, keys);
            keys.push(node.key);
            Self::collect_in_order(&node.right, keys);
        }
    }

    fn collect_pre_order(link: &Link, keys: &mut Vec<i32>) {
        if let Some(node) = link.as_deref() {
            keys.push(node.key);
            Self::collect_pre_order(&node.left, keys);
            Self::collect_pre_order(&node.right, keys);
        }
    }

    pub(crate) fn verify_avl_invariants(&self) -> bool {
        verify_subtree(&self.root, None, None).is_some()
    }
}

#[cfg(feature = "std")]
fn io_error(path: &Path, source: std::io::Error) -> AvlError {
    log::error!("cannot access {}: {source}", path.display());
    AvlError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl FromIterator<i32> for AvlTree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for AvlTree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
