use core::fmt;

use crate::{AvlTree, utils::Link};

/// Default number of columns each tree level is indented by
pub const DEFAULT_INDENT: usize = 5;

/// A sideways, human-readable rendering of an [`AvlTree`].
///
/// Keys are visited in reverse in-order (right subtree, node, left subtree),
/// one per line, right-aligned in a field whose width grows by the indent
/// step per level. Read with the head tilted left, the root sits in the
/// leftmost column and larger keys are above smaller ones.
///
/// An empty tree renders as the empty string.
///
/// # Examples
///
/// ```
/// use avl_index::AvlTree;
///
/// let tree: AvlTree = [10, 20, 30].into_iter().collect();
/// assert_eq!(tree.layout().to_string(), "        30\n   20\n        10\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    tree: &'a AvlTree,
    indent: usize,
}

impl<'a> Layout<'a> {
    pub(crate) const fn new(tree: &'a AvlTree) -> Self {
        Self {
            tree,
            indent: DEFAULT_INDENT,
        }
    }

    /// Sets the number of columns added per tree level
    ///
    /// # Arguments
    ///
    /// * `indent` - Columns per level
    ///
    /// # Returns
    ///
    /// * `Self` - The layout with the new indent step
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Returns the configured indent step
    pub const fn indent(&self) -> usize {
        self.indent
    }

    fn render(&self, link: &Link, width: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = link.as_deref() else {
            return Ok(());
        };

        let width = width + self.indent;
        self.render(&node.right, width, f)?;
        writeln!(f, "{:>width$}", node.key)?;
        self.render(&node.left, width, f)
    }
}

impl fmt::Display for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(self.tree.root(), 0, f)
    }
}
