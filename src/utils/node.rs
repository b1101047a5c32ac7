use alloc::boxed::Box;

/// An owned, possibly empty subtree
pub(crate) type Link = Option<Box<Node>>;

/// A node in the AVL tree.
///
/// Each node exclusively owns its children; there are no parent links, so
/// every structural change happens while unwinding a recursive descent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// The stored key, unique within the tree
    pub(crate) key: i32,

    /// Cached height of the subtree rooted here (a leaf has height 1)
    pub(crate) height: usize,

    /// Subtree holding keys strictly less than `key`
    pub(crate) left: Link,

    /// Subtree holding keys strictly greater than `key`
    pub(crate) right: Link,
}

impl Node {
    pub(crate) const fn leaf(key: i32) -> Self {
        Self {
            key,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Recomputes the cached height from the children.
    ///
    /// Must run after any child link changes and before the balance factor is read.
    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Height of the left subtree minus height of the right subtree
    #[inline]
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// Height of a subtree, 0 when empty
#[inline]
pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of a subtree, 0 when empty
#[inline]
pub(crate) fn balance_factor(link: &Link) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

/// Rotates `y` right around its left child and returns the new subtree root.
///
/// ```text
///       y            x
///      / \          / \
///     x   C   =>   A   y
///    / \              / \
///   A   B            B   C
/// ```
///
/// Heights of `y` and then `x` are recomputed. A node without a left child is
/// returned unchanged.
pub(crate) fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };

    y.left = x.right.take();
    y.update_height();

    x.right = Some(y);
    x.update_height();
    x
}

/// Mirror of [`rotate_right`]: rotates `x` left around its right child.
pub(crate) fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };

    x.right = y.left.take();
    x.update_height();

    y.left = Some(x);
    y.update_height();
    y
}

/// Smallest key of a non-empty subtree
pub(crate) fn min_key(mut node: &Node) -> i32 {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node.key
}

/// Largest key of a non-empty subtree
pub(crate) fn max_key(mut node: &Node) -> i32 {
    while let Some(right) = node.right.as_deref() {
        node = right;
    }
    node.key
}

/// Checks BST ordering, cached heights and the AVL balance bound for the whole subtree.
///
/// Returns the verified height on success.
pub(crate) fn verify_subtree(link: &Link, lower: Option<i32>, upper: Option<i32>) -> Option<usize> {
    let Some(node) = link.as_deref() else {
        return Some(0);
    };

    if lower.is_some_and(|bound| node.key <= bound) || upper.is_some_and(|bound| node.key >= bound) {
        return None;
    }

    let left = verify_subtree(&node.left, lower, Some(node.key))?;
    let right = verify_subtree(&node.right, Some(node.key), upper)?;

    if left.abs_diff(right) > 1 || node.height != 1 + left.max(right) {
        return None;
    }

    Some(node.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(key: i32, left: Link, right: Link) -> Box<Node> {
        let mut node = Box::new(Node {
            key,
            height: 0,
            left,
            right,
        });
        node.update_height();
        node
    }

    fn leaf(key: i32) -> Link {
        Some(Box::new(Node::leaf(key)))
    }

    #[test]
    fn test_node_leaf_height() {
        let node = Node::leaf(7);
        assert_eq!(node.height, 1);
        assert_eq!(node.balance_factor(), 0);
        assert_eq!(height(&None), 0);
        assert_eq!(balance_factor(&None), 0);
    }

    #[test]
    fn test_node_balance_factor_sign() {
        let left_heavy = boxed(5, Some(boxed(3, leaf(1), None)), None);
        assert_eq!(left_heavy.height, 3);
        assert_eq!(left_heavy.balance_factor(), 2);

        let right_heavy = boxed(1, None, Some(boxed(3, None, leaf(5))));
        assert_eq!(right_heavy.balance_factor(), -2);
    }

    #[test]
    fn test_rotate_right_left_chain() {
        let y = boxed(30, Some(boxed(20, leaf(10), None)), None);
        let x = rotate_right(y);

        assert_eq!(x.key, 20);
        assert_eq!(x.height, 2);
        assert_eq!(x.left.as_ref().map(|n| n.key), Some(10));
        assert_eq!(x.right.as_ref().map(|n| n.key), Some(30));
        assert_eq!(x.right.as_ref().map(|n| n.height), Some(1));
    }

    #[test]
    fn test_rotate_right_moves_inner_subtree() {
        // 40(20(10, 30), 50) => 20(10, 40(30, 50))
        let y = boxed(40, Some(boxed(20, leaf(10), leaf(30))), leaf(50));
        let x = rotate_right(y);

        assert_eq!(x.key, 20);
        let new_right = x.right.as_deref().map(|n| (n.key, n.left.as_ref().map(|l| l.key)));
        assert_eq!(new_right, Some((40, Some(30))));
        assert_eq!(x.height, 3);
        assert!(verify_subtree(&Some(x), None, None).is_some());
    }

    #[test]
    fn test_rotate_left_right_chain() {
        let x = boxed(10, None, Some(boxed(20, None, leaf(30))));
        let y = rotate_left(x);

        assert_eq!(y.key, 20);
        assert_eq!(y.height, 2);
        assert_eq!(y.left.as_ref().map(|n| n.key), Some(10));
        assert_eq!(y.right.as_ref().map(|n| n.key), Some(30));
    }

    #[test]
    fn test_rotation_without_child_is_noop() {
        let node = rotate_right(Box::new(Node::leaf(1)));
        assert_eq!(*node, Node::leaf(1));

        let node = rotate_left(Box::new(Node::leaf(2)));
        assert_eq!(*node, Node::leaf(2));
    }

    #[test]
    fn test_min_max_key() {
        let root = boxed(20, Some(boxed(10, leaf(5), leaf(15))), Some(boxed(30, None, leaf(35))));
        assert_eq!(min_key(&root), 5);
        assert_eq!(max_key(&root), 35);
    }

    #[test]
    fn test_verify_subtree_rejects_violations() {
        let unordered = Some(boxed(10, leaf(20), None));
        assert!(verify_subtree(&unordered, None, None).is_none());

        let unbalanced = Some(boxed(30, Some(boxed(20, leaf(10), None)), None));
        assert!(verify_subtree(&unbalanced, None, None).is_none());

        let mut stale = boxed(20, leaf(10), leaf(30));
        stale.height = 5;
        assert!(verify_subtree(&Some(stale), None, None).is_none());

        let valid = Some(boxed(20, leaf(10), leaf(30)));
        assert_eq!(verify_subtree(&valid, None, None), Some(2));
    }
}
