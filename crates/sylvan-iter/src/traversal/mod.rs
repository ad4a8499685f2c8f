//! Lazy depth-first and breadth-first traversal over syntax trees.
//!
//! [`TreeIter`] keeps an explicit worklist instead of recursing, so a walk can
//! be suspended after any node and abandoned by simply dropping the iterator.
//! Children of a yielded node are only enumerated when the caller asks for
//! the next item.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::error::IterError;
use crate::node::SyntaxNode;

/// Order in which a [`TreeIter`] visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraversalMode {
    /// Pre-order: a node, then each child's subtree from left to right.
    #[default]
    DepthFirst,
    /// Level order: every node at depth `d` before any node at depth `d + 1`.
    BreadthFirst,
}

impl TraversalMode {
    /// Returns the canonical kebab-case name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DepthFirst => "depth-first",
            Self::BreadthFirst => "breadth-first",
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalMode {
    type Err = IterError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "dfs" | "depth-first" | "depth_first" | "depthfirst" => Ok(Self::DepthFirst),
            "bfs" | "breadth-first" | "breadth_first" | "breadthfirst" => Ok(Self::BreadthFirst),
            _ => Err(IterError::unsupported_mode(input.trim())),
        }
    }
}

/// Single-pass iterator over a node and all of its descendants.
///
/// The root is always yielded first, whatever its own classification. With
/// `named_only` set, children are enumerated through the named-child accessors
/// so anonymous tokens (and everything beneath them) are never visited.
///
/// # Examples
///
/// ```
/// use sylvan_iter::{Parser, SupportedLanguage, TraversalMode, TreeIter};
///
/// let mut parser = Parser::new(SupportedLanguage::Rust)?;
/// let parsed = parser.parse("fn main() {}")?;
///
/// let kinds: Vec<_> = TreeIter::new(parsed.root_node(), TraversalMode::DepthFirst, true)
///     .map(|node| node.kind())
///     .collect();
/// assert_eq!(kinds, ["source_file", "function_item", "identifier", "parameters", "block"]);
/// # Ok::<(), sylvan_iter::IterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeIter<N> {
    worklist: VecDeque<N>,
    // Yielded by the previous `next` call; expanded lazily by the following one.
    pending: Option<N>,
    mode: TraversalMode,
    named_only: bool,
}

impl<N: SyntaxNode> TreeIter<N> {
    /// Starts a traversal at `root`.
    #[must_use]
    pub fn new(root: N, mode: TraversalMode, named_only: bool) -> Self {
        let mut worklist = VecDeque::new();
        worklist.push_back(root);
        Self {
            worklist,
            pending: None,
            mode,
            named_only,
        }
    }

    /// The order this iterator visits nodes in.
    #[must_use]
    pub const fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Whether only named children are enumerated.
    #[must_use]
    pub const fn named_only(&self) -> bool {
        self.named_only
    }

    fn expand(&mut self, parent: N) {
        let count = if self.named_only {
            parent.named_child_count()
        } else {
            parent.child_count()
        };
        let child_at = |index| {
            if self.named_only {
                parent.named_child(index)
            } else {
                parent.child(index)
            }
        };

        // Depth-first pops from the back: push reversed so the leftmost child
        // comes out first.
        let children: Vec<N> = match self.mode {
            TraversalMode::DepthFirst => (0..count).rev().filter_map(child_at).collect(),
            TraversalMode::BreadthFirst => (0..count).filter_map(child_at).collect(),
        };
        self.worklist.extend(children);
    }
}

impl<N: SyntaxNode> Iterator for TreeIter<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        if let Some(parent) = self.pending.take() {
            self.expand(parent);
        }

        let current = match self.mode {
            TraversalMode::DepthFirst => self.worklist.pop_back(),
            TraversalMode::BreadthFirst => self.worklist.pop_front(),
        };

        if current.is_none() {
            tracing::trace!(mode = %self.mode, "traversal exhausted");
        }
        self.pending = current;
        current
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let queued = self.worklist.len();
        if self.pending.is_none() && queued == 0 {
            (0, Some(0))
        } else {
            (queued, None)
        }
    }
}

impl<N: SyntaxNode> FusedIterator for TreeIter<N> {}

#[cfg(test)]
mod tests;
