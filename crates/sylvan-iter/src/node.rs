//! Navigation capability required from syntax tree nodes.

/// A borrowed handle into an externally owned syntax tree.
///
/// Only child navigation is required. Indices are zero-based and valid for
/// `0..child_count()` (or `0..named_child_count()` for the named family).
/// Implementations return `None` for an index the tree cannot resolve;
/// traversal skips such slots rather than failing.
pub trait SyntaxNode: Copy {
    /// Number of children, named or not.
    fn child_count(&self) -> usize;

    /// Number of children the grammar marks as named.
    fn named_child_count(&self) -> usize;

    /// The `index`-th child, counting every child.
    fn child(&self, index: usize) -> Option<Self>;

    /// The `index`-th named child, counting only named children.
    fn named_child(&self, index: usize) -> Option<Self>;
}

impl SyntaxNode for tree_sitter::Node<'_> {
    fn child_count(&self) -> usize {
        tree_sitter::Node::child_count(self)
    }

    fn named_child_count(&self) -> usize {
        tree_sitter::Node::named_child_count(self)
    }

    fn child(&self, index: usize) -> Option<Self> {
        u32::try_from(index).ok()?;
        tree_sitter::Node::child(self, index)
    }

    fn named_child(&self, index: usize) -> Option<Self> {
        u32::try_from(index).ok()?;
        tree_sitter::Node::named_child(self, index)
    }
}
