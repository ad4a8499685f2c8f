//! Lazy traversal and query-match iteration over Tree-sitter syntax trees.
//!
//! The crate provides two independent, pull-based generators:
//!
//! - [`TreeIter`] walks a node and its descendants depth-first (pre-order,
//!   children left to right) or breadth-first (level order), optionally
//!   restricted to named nodes.
//! - [`QueryIter`] drives an engine match cursor and yields one
//!   [`MatchResult`] per match, binding capture names to nodes.
//!
//! Both are ordinary [`Iterator`]s: nothing is computed until the caller pulls
//! the next item, and dropping the iterator stops the walk.
//!
//! The engine is reached only through the [`SyntaxNode`], [`CaptureTable`] and
//! [`MatchCursor`] traits. Tree-sitter implementations are bundled, together
//! with a small [`Parser`] wrapper and the Rust, Python and TypeScript
//! grammars.
//!
//! # Example: Traversal
//!
//! ```
//! use sylvan_iter::{Parser, SupportedLanguage, TraversalMode};
//!
//! let mut parser = Parser::new(SupportedLanguage::Python)?;
//! let parsed = parser.parse("x = 1")?;
//!
//! let kinds: Vec<_> = parsed
//!     .traverse(TraversalMode::BreadthFirst, true)
//!     .map(|node| node.kind())
//!     .collect();
//! assert_eq!(kinds.first(), Some(&"module"));
//! # Ok::<(), sylvan_iter::IterError>(())
//! ```
//!
//! # Example: Query Matches
//!
//! ```
//! use sylvan_iter::{CompiledQuery, Parser, QueryRunner, SupportedLanguage};
//!
//! let mut parser = Parser::new(SupportedLanguage::Rust)?;
//! let parsed = parser.parse("fn main() { let x = 1; }")?;
//! let query = CompiledQuery::compile(
//!     "(let_declaration pattern: (identifier) @name value: (_) @value)",
//!     SupportedLanguage::Rust,
//! )?;
//!
//! let mut runner = QueryRunner::new();
//! for found in parsed.matches(&mut runner, &query)? {
//!     let found = found?;
//!     let name = found.capture("name").map(|node| parsed.text_of(node));
//!     assert_eq!(name, Some("x"));
//! }
//! # Ok::<(), sylvan_iter::IterError>(())
//! ```

mod error;
mod language;
mod node;
mod parser;
mod position;
mod query;
mod traversal;

pub use error::IterError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use node::SyntaxNode;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::point_to_one_based;
pub use query::{
    Capture, CaptureTable, CompiledQuery, CursorMatch, MatchCursor, MatchResult, QueryIter,
    QueryOptions, QueryRunner, TreeSitterMatches,
};
pub use traversal::{TraversalMode, TreeIter};

#[cfg(test)]
mod tests;
