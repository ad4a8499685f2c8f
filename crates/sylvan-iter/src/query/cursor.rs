//! Tree-sitter bindings for query-match iteration.
//!
//! [`QueryRunner`] owns the engine cursor. Each call to [`QueryRunner::run`]
//! binds it to one query and root and hands back a [`QueryIter`] that borrows
//! the cursor exclusively until it is dropped.

use std::fmt;
use std::ops::Range;

use tree_sitter::StreamingIterator;

use super::{Capture, CaptureTable, CursorMatch, MatchCursor, QueryIter};
use crate::error::IterError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;

/// A Tree-sitter query compiled for one of the bundled grammars.
#[derive(Debug)]
pub struct CompiledQuery {
    query: tree_sitter::Query,
    language: SupportedLanguage,
}

impl CompiledQuery {
    /// Compiles `source` in the Tree-sitter query language.
    ///
    /// # Errors
    ///
    /// Returns [`IterError::QueryCompileError`] with the one-based position of
    /// the offending query text when the engine rejects the query.
    pub fn compile(source: &str, language: SupportedLanguage) -> Result<Self, IterError> {
        let query = tree_sitter::Query::new(&language.tree_sitter_language(), source)
            .map_err(|err| {
                let position = point_to_one_based(tree_sitter::Point::new(err.row, err.column));
                IterError::query_compile(language, position, err.message)
            })?;

        tracing::debug!(
            %language,
            patterns = query.pattern_count(),
            captures = query.capture_names().len(),
            "compiled query"
        );
        Ok(Self { query, language })
    }

    /// The grammar this query was compiled for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Number of patterns in the query.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.query.pattern_count()
    }

    /// The underlying Tree-sitter query.
    #[must_use]
    pub const fn as_tree_sitter(&self) -> &tree_sitter::Query {
        &self.query
    }
}

impl CaptureTable for CompiledQuery {
    fn capture_count(&self) -> usize {
        self.query.capture_names().len()
    }

    fn capture_name(&self, index: usize) -> Option<&str> {
        self.query.capture_names().get(index).copied()
    }
}

/// Match limit of a freshly created Tree-sitter cursor.
const UNLIMITED_MATCHES: u32 = u32::MAX;

/// Cursor limits applied before a query runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Maximum number of in-progress matches the engine keeps.
    pub match_limit: Option<u32>,
    /// Deepest level below the root at which a match may start.
    pub max_start_depth: Option<u32>,
    /// Only report matches intersecting this byte range.
    pub byte_range: Option<Range<usize>>,
}

/// Owner of a Tree-sitter query cursor.
pub struct QueryRunner {
    cursor: tree_sitter::QueryCursor,
}

impl fmt::Debug for QueryRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRunner")
            .field("match_limit", &self.cursor.match_limit())
            .finish_non_exhaustive()
    }
}

impl Default for QueryRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRunner {
    /// Creates a runner with the engine's default cursor limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: tree_sitter::QueryCursor::new(),
        }
    }

    /// Creates a runner with `options` applied to its cursor.
    #[must_use]
    pub fn with_options(options: &QueryOptions) -> Self {
        let mut runner = Self::new();
        runner.configure(options);
        runner
    }

    /// Applies `options` to the cursor for subsequent runs.
    ///
    /// Every limit is overwritten; a `None` restores the engine default.
    pub fn configure(&mut self, options: &QueryOptions) {
        self.cursor
            .set_match_limit(options.match_limit.unwrap_or(UNLIMITED_MATCHES));
        self.cursor.set_max_start_depth(options.max_start_depth);
        let range = options.byte_range.clone().unwrap_or(0..usize::MAX);
        self.cursor.set_byte_range(range);
    }

    /// Binds the cursor to run `query` over `root` and returns the matches.
    ///
    /// `source` must be the text `root` was parsed from; the engine reads it
    /// to evaluate text predicates such as `#eq?`.
    pub fn run<'c, 'q, 't, 's>(
        &'c mut self,
        query: &'q CompiledQuery,
        root: tree_sitter::Node<'t>,
        source: &'s [u8],
    ) -> QueryIter<'q, TreeSitterMatches<'c, 't, 's>>
    where
        'q: 'c,
        't: 'c,
    {
        let inner = self.cursor.matches(&query.query, root, source);
        QueryIter::new(query, TreeSitterMatches { inner })
    }

    /// Whether the last run dropped matches because of the match limit.
    #[must_use]
    pub fn did_exceed_match_limit(&self) -> bool {
        self.cursor.did_exceed_match_limit()
    }
}

/// [`MatchCursor`] over Tree-sitter's streaming query matches.
pub struct TreeSitterMatches<'c, 't: 'c, 's> {
    inner: tree_sitter::QueryMatches<'c, 't, &'s [u8], &'s [u8]>,
}

impl<'t, 's> MatchCursor for TreeSitterMatches<'_, 't, 's> {
    type Node = tree_sitter::Node<'t>;

    fn next_match(&mut self) -> Result<Option<CursorMatch<Self::Node>>, IterError> {
        let Some(found) = self.inner.next() else {
            return Ok(None);
        };

        let captures = found
            .captures
            .iter()
            .map(|capture| Capture {
                // Unrepresentable indices surface as unknown captures.
                index: usize::try_from(capture.index).unwrap_or(usize::MAX),
                node: capture.node,
            })
            .collect();

        Ok(Some(CursorMatch {
            pattern_index: found.pattern_index,
            captures,
        }))
    }
}
