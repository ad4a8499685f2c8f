//! In-memory test doubles for the engine capability traits.
//!
//! [`FakeTree`] counts every child lookup so tests can prove that a stopped
//! traversal did no further expansion. [`ScriptedCursor`] replays a fixed
//! list of matches and counts how often it was advanced.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;

use crate::error::IterError;
use crate::node::SyntaxNode;
use crate::query::{Capture, CaptureTable, CursorMatch, MatchCursor};

#[derive(Debug)]
struct FakeEntry {
    label: String,
    named: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    // Extra slots reported by `child_count` that `child` cannot resolve.
    phantom_children: usize,
}

/// Arena-backed tree; node `0` is the root.
#[derive(Debug)]
pub(crate) struct FakeTree {
    entries: Vec<FakeEntry>,
    child_reads: Cell<usize>,
}

impl FakeTree {
    pub(crate) fn new(root_label: &str, named: bool) -> Self {
        Self {
            entries: vec![FakeEntry {
                label: root_label.to_owned(),
                named,
                parent: None,
                children: Vec::new(),
                phantom_children: 0,
            }],
            child_reads: Cell::new(0),
        }
    }

    /// Builds a tree from `(parent_seed, named)` pairs: entry `i` becomes node
    /// `i + 1`, attached to node `parent_seed % (i + 1)`.
    pub(crate) fn from_parent_seeds(seeds: &[(usize, bool)]) -> Self {
        let mut tree = Self::new("n0", true);
        for (offset, (seed, named)) in seeds.iter().enumerate() {
            let id = offset + 1;
            tree.add(seed % id, &format!("n{id}"), *named);
        }
        tree
    }

    /// Appends a child to `parent` and returns the new node's id.
    pub(crate) fn add(&mut self, parent: usize, label: &str, named: bool) -> usize {
        let id = self.entries.len();
        self.entries.push(FakeEntry {
            label: label.to_owned(),
            named,
            parent: Some(parent),
            children: Vec::new(),
            phantom_children: 0,
        });
        self.entry_mut(parent).children.push(id);
        id
    }

    /// Makes `id` report `extra` more children than it can resolve.
    pub(crate) fn overstate_children(&mut self, id: usize, extra: usize) {
        self.entry_mut(id).phantom_children = extra;
    }

    pub(crate) fn root(&self) -> FakeNode<'_> {
        self.node(0)
    }

    pub(crate) fn node(&self, id: usize) -> FakeNode<'_> {
        FakeNode { tree: self, id }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn label(&self, id: usize) -> &str {
        &self.entry(id).label
    }

    pub(crate) fn is_named(&self, id: usize) -> bool {
        self.entry(id).named
    }

    pub(crate) fn parent(&self, id: usize) -> Option<usize> {
        self.entry(id).parent
    }

    pub(crate) fn depth(&self, id: usize) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Whether every ancestor below the root, and the node itself, is named.
    pub(crate) fn reachable_through_named(&self, id: usize) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if !self.is_named(current) {
                return false;
            }
            current = parent;
        }
        true
    }

    /// Recursive pre-order reference walk over every node.
    pub(crate) fn preorder(&self) -> Vec<usize> {
        fn visit(tree: &FakeTree, id: usize, out: &mut Vec<usize>) {
            out.push(id);
            for child in &tree.entry(id).children {
                visit(tree, *child, out);
            }
        }

        let mut out = Vec::with_capacity(self.len());
        visit(self, 0, &mut out);
        out
    }

    pub(crate) fn child_reads(&self) -> usize {
        self.child_reads.get()
    }

    pub(crate) fn reset_child_reads(&self) {
        self.child_reads.set(0);
    }

    fn entry(&self, id: usize) -> &FakeEntry {
        self.entries
            .get(id)
            .unwrap_or_else(|| panic!("fake node {id} does not exist"))
    }

    fn entry_mut(&mut self, id: usize) -> &mut FakeEntry {
        self.entries
            .get_mut(id)
            .unwrap_or_else(|| panic!("fake node {id} does not exist"))
    }

    fn named_children(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.entry(id)
            .children
            .iter()
            .copied()
            .filter(|child| self.is_named(*child))
    }
}

/// Handle into a [`FakeTree`].
#[derive(Clone, Copy)]
pub(crate) struct FakeNode<'t> {
    tree: &'t FakeTree,
    id: usize,
}

impl FakeNode<'_> {
    pub(crate) const fn id(self) -> usize {
        self.id
    }
}

impl fmt::Debug for FakeNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FakeNode({}: {})", self.id, self.tree.label(self.id))
    }
}

impl PartialEq for FakeNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl SyntaxNode for FakeNode<'_> {
    fn child_count(&self) -> usize {
        let entry = self.tree.entry(self.id);
        entry.children.len() + entry.phantom_children
    }

    fn named_child_count(&self) -> usize {
        self.tree.named_children(self.id).count()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.tree.child_reads.set(self.tree.child_reads.get() + 1);
        let id = self.tree.entry(self.id).children.get(index).copied()?;
        Some(self.tree.node(id))
    }

    fn named_child(&self, index: usize) -> Option<Self> {
        self.tree.child_reads.set(self.tree.child_reads.get() + 1);
        let id = self.tree.named_children(self.id).nth(index)?;
        Some(self.tree.node(id))
    }
}

/// Capture table backed by a fixed list of names.
///
/// `capture_count` may exceed the number of names to model unnamed slots.
pub(crate) struct FakeQuery {
    pub(crate) names: Vec<&'static str>,
    pub(crate) capture_count: usize,
}

impl FakeQuery {
    pub(crate) fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            capture_count: names.len(),
        }
    }
}

impl CaptureTable for FakeQuery {
    fn capture_count(&self) -> usize {
        self.capture_count
    }

    fn capture_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).copied()
    }
}

/// Cursor replaying a fixed script of matches and failures.
#[derive(Debug)]
pub(crate) struct ScriptedCursor<N> {
    script: VecDeque<Result<CursorMatch<N>, IterError>>,
    advances: usize,
}

impl<N> ScriptedCursor<N> {
    pub(crate) fn new(script: impl IntoIterator<Item = Result<CursorMatch<N>, IterError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            advances: 0,
        }
    }

    pub(crate) fn from_matches(matches: impl IntoIterator<Item = CursorMatch<N>>) -> Self {
        Self::new(matches.into_iter().map(Ok))
    }

    pub(crate) const fn advances(&self) -> usize {
        self.advances
    }
}

impl<N: Copy> MatchCursor for ScriptedCursor<N> {
    type Node = N;

    fn next_match(&mut self) -> Result<Option<CursorMatch<N>>, IterError> {
        self.advances += 1;
        self.script.pop_front().transpose()
    }
}

/// Builds a raw match for pattern `pattern_index` from `(index, node)` pairs.
pub(crate) fn raw_match<N: Copy>(pattern_index: usize, captures: &[(usize, N)]) -> CursorMatch<N> {
    CursorMatch {
        pattern_index,
        captures: captures
            .iter()
            .map(|&(index, node)| Capture { index, node })
            .collect(),
    }
}
