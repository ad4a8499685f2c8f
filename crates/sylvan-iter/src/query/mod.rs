//! Query-match iteration with named capture bindings.
//!
//! The matching itself belongs to the external engine. [`QueryIter`] pulls one
//! match at a time from a [`MatchCursor`] and reshapes its index-keyed captures
//! into a [`MatchResult`] keyed by capture name.

mod cursor;

use std::collections::HashMap;
use std::iter::FusedIterator;

use crate::error::IterError;

pub use cursor::{CompiledQuery, QueryOptions, QueryRunner, TreeSitterMatches};

/// Read access to a compiled query's capture-name table.
pub trait CaptureTable {
    /// Number of captures the query defines.
    fn capture_count(&self) -> usize;

    /// Name of the capture at `index`, for `index < capture_count()`.
    fn capture_name(&self, index: usize) -> Option<&str>;
}

impl CaptureTable for tree_sitter::Query {
    fn capture_count(&self) -> usize {
        self.capture_names().len()
    }

    fn capture_name(&self, index: usize) -> Option<&str> {
        self.capture_names().get(index).copied()
    }
}

/// One node bound by a match, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture<N> {
    /// Index into the query's capture table.
    pub index: usize,
    /// The node bound to the capture.
    pub node: N,
}

/// A raw match as reported by the engine, captures in engine order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMatch<N> {
    /// Index of the query pattern that produced the match.
    pub pattern_index: usize,
    /// The captures of the match.
    pub captures: Vec<Capture<N>>,
}

/// An engine cursor already bound to run one query over one root node.
///
/// Every call advances the cursor irreversibly.
pub trait MatchCursor {
    /// Node handle type bound by captures.
    type Node: Copy;

    /// Advances to the next match.
    ///
    /// Returns `Ok(None)` once the engine has no further matches.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine fails to produce the next match.
    fn next_match(&mut self) -> Result<Option<CursorMatch<Self::Node>>, IterError>;
}

/// Capture bindings of a single match, keyed by capture name.
///
/// Keys borrow from the query's capture table. When one match binds the same
/// name more than once, the capture the engine reported last is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'q, N> {
    pattern_index: usize,
    captures: HashMap<&'q str, N>,
}

impl<'q, N: Copy> MatchResult<'q, N> {
    /// Index of the query pattern that produced this match.
    #[must_use]
    pub const fn pattern_index(&self) -> usize {
        self.pattern_index
    }

    /// The node bound to `name`, if the match captured it.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<N> {
        self.captures.get(name).copied()
    }

    /// All bindings of this match.
    #[must_use]
    pub const fn captures(&self) -> &HashMap<&'q str, N> {
        &self.captures
    }

    /// Number of distinct capture names bound.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Whether the match bound no captures at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Consumes the result, returning the name-to-node map.
    #[must_use]
    pub fn into_captures(self) -> HashMap<&'q str, N> {
        self.captures
    }
}

/// Single-pass iterator yielding one [`MatchResult`] per engine match.
///
/// The capture-name table is copied out of the query when the iterator is
/// created. After the cursor is exhausted, or after the first error, the
/// iterator only returns `None`.
///
/// # Examples
///
/// ```
/// use sylvan_iter::{CompiledQuery, Parser, QueryRunner, SupportedLanguage};
///
/// let mut parser = Parser::new(SupportedLanguage::Rust)?;
/// let parsed = parser.parse("fn alpha() {} fn beta() {}")?;
/// let query = CompiledQuery::compile(
///     "(function_item name: (identifier) @name)",
///     SupportedLanguage::Rust,
/// )?;
///
/// let mut runner = QueryRunner::new();
/// for found in runner.run(&query, parsed.root_node(), parsed.source().as_bytes()) {
///     let found = found?;
///     let name = found.capture("name").map(|node| &parsed.source()[node.byte_range()]);
///     assert!(matches!(name, Some("alpha" | "beta")));
/// }
/// # Ok::<(), sylvan_iter::IterError>(())
/// ```
#[derive(Debug)]
pub struct QueryIter<'q, C> {
    cursor: C,
    names: Vec<&'q str>,
    finished: bool,
}

impl<'q, C: MatchCursor> QueryIter<'q, C> {
    /// Wraps a cursor bound to `query`, snapshotting the query's capture names.
    ///
    /// Capture slots without a name are recorded as the empty string.
    #[must_use]
    pub fn new<Q: CaptureTable + ?Sized>(query: &'q Q, cursor: C) -> Self {
        let names: Vec<&'q str> = (0..query.capture_count())
            .map(|index| query.capture_name(index).unwrap_or_default())
            .collect();
        tracing::debug!(captures = names.len(), "bound query match iterator");
        Self {
            cursor,
            names,
            finished: false,
        }
    }

    /// Capture names indexed by capture index.
    #[must_use]
    pub fn capture_names(&self) -> &[&'q str] {
        &self.names
    }

    /// Releases the underlying cursor.
    #[must_use]
    pub fn into_cursor(self) -> C {
        self.cursor
    }

    fn bind(&self, raw: CursorMatch<C::Node>) -> Result<MatchResult<'q, C::Node>, IterError> {
        let mut captures = HashMap::with_capacity(raw.captures.len());
        for capture in raw.captures {
            let Some(name) = self.names.get(capture.index).copied() else {
                tracing::warn!(
                    index = capture.index,
                    capture_count = self.names.len(),
                    "cursor reported an unknown capture index"
                );
                return Err(IterError::unknown_capture(capture.index, self.names.len()));
            };
            captures.insert(name, capture.node);
        }

        Ok(MatchResult {
            pattern_index: raw.pattern_index,
            captures,
        })
    }
}

impl<'q, C: MatchCursor> Iterator for QueryIter<'q, C> {
    type Item = Result<MatchResult<'q, C::Node>, IterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let outcome = match self.cursor.next_match() {
            Ok(Some(raw)) => self.bind(raw),
            Ok(None) => {
                tracing::trace!("query matches exhausted");
                self.finished = true;
                return None;
            }
            Err(err) => Err(err),
        };

        if outcome.is_err() {
            self.finished = true;
        }
        Some(outcome)
    }
}

impl<C: MatchCursor> FusedIterator for QueryIter<'_, C> {}
