//! Tree-sitter parsing wrapper.
//!
//! Parsing is outside this crate's concern proper; the wrapper exists so
//! callers can obtain a tree, iterate over it and run queries against it
//! without touching the engine directly.

use std::ops::Range;

use crate::error::IterError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;
use crate::query::{CompiledQuery, QueryIter, QueryRunner, TreeSitterMatches};
use crate::traversal::{TraversalMode, TreeIter};

/// A parsed syntax tree together with the source it was parsed from.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the language of the parsed code.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns the source text covered by `node`.
    #[must_use]
    pub fn text_of(&self, node: tree_sitter::Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// Iterates over the whole tree in `mode`.
    #[must_use]
    pub fn traverse(
        &self,
        mode: TraversalMode,
        named_only: bool,
    ) -> TreeIter<tree_sitter::Node<'_>> {
        TreeIter::new(self.root_node(), mode, named_only)
    }

    /// Runs `query` over the whole tree using `runner`'s cursor.
    ///
    /// # Errors
    ///
    /// Returns [`IterError::LanguageMismatch`] when the query was compiled for
    /// a different grammar than the tree was parsed with.
    pub fn matches<'c, 'q, 't>(
        &'t self,
        runner: &'c mut QueryRunner,
        query: &'q CompiledQuery,
    ) -> Result<QueryIter<'q, TreeSitterMatches<'c, 't, 't>>, IterError>
    where
        'q: 'c,
        't: 'c,
    {
        if query.language() != self.language {
            return Err(IterError::language_mismatch(query.language(), self.language));
        }
        Ok(runner.run(query, self.root_node(), self.source.as_bytes()))
    }

    /// Whether the tree contains ERROR or MISSING nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.root_node().has_error()
    }

    /// Collects every ERROR and MISSING node in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        self.traverse(TraversalMode::DepthFirst, false)
            .filter(|node| node.is_error() || node.is_missing())
            .map(|node| SyntaxErrorInfo::from_node(node, &self.source))
            .collect()
    }
}

/// A syntax error located in parsed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// One-based line where the error starts.
    pub line: u32,
    /// One-based column where the error starts.
    pub column: u32,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            let snippet = source.get(node.byte_range()).unwrap_or_default();
            format!("unexpected `{}`", snippet.trim())
        };

        Self {
            byte_range: node.byte_range(),
            line,
            column,
            message,
        }
    }
}

/// Tree-sitter parser configured for one bundled language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a new parser for the given language.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar is incompatible with the linked
    /// Tree-sitter runtime.
    pub fn new(language: SupportedLanguage) -> Result<Self, IterError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|e| IterError::parser_init(language, e.to_string()))?;

        Ok(Self { inner, language })
    }

    /// Returns the language this parser is configured for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses `source` into a tree.
    ///
    /// Tree-sitter recovers from syntax errors, so malformed input still
    /// yields a tree; check [`ParseResult::has_errors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the engine produces no tree at all.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, IterError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| IterError::parse(self.language, "parser returned no tree"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }
}
