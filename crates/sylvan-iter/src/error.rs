//! Error types for traversal and query-match iteration.
//!
//! Traversal itself cannot fail once constructed. Everything reported here
//! comes from construction (unsupported modes, parser and query set-up) or is
//! propagated from the external matching engine while iterating.

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors from parsing, query compilation and match iteration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IterError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Failed to parse source code.
    #[error("failed to parse {language}: {message}")]
    ParseError {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Query compilation failed.
    #[error("invalid query for {language} at {line}:{column}: {message}")]
    QueryCompileError {
        /// The language the query was compiled for.
        language: SupportedLanguage,
        /// One-based line of the offending query text.
        line: u32,
        /// One-based column of the offending query text.
        column: u32,
        /// Description of the compilation failure.
        message: String,
    },

    /// A query was run against a tree parsed with a different grammar.
    #[error("query compiled for {query} cannot run over a {tree} tree")]
    LanguageMismatch {
        /// The language the query was compiled for.
        query: SupportedLanguage,
        /// The language the tree was parsed with.
        tree: SupportedLanguage,
    },

    /// A traversal mode name was not recognised.
    #[error("unsupported traversal mode: '{mode}'")]
    UnsupportedMode {
        /// The rejected mode name.
        mode: String,
    },

    /// The match cursor reported a capture index the query does not define.
    #[error("capture index {index} is outside the query's {capture_count} captures")]
    UnknownCapture {
        /// The capture index reported by the cursor.
        index: usize,
        /// Number of captures defined by the query.
        capture_count: usize,
    },

    /// The match cursor failed while producing the next match.
    #[error("match cursor failed: {message}")]
    CursorError {
        /// Description of the cursor failure.
        message: String,
    },
}

impl IterError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            message: message.into(),
        }
    }

    /// Creates a query compilation error.
    #[must_use]
    pub fn query_compile(
        language: SupportedLanguage,
        (line, column): (u32, u32),
        message: impl Into<String>,
    ) -> Self {
        Self::QueryCompileError {
            language,
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates a query/tree language mismatch error.
    #[must_use]
    pub const fn language_mismatch(query: SupportedLanguage, tree: SupportedLanguage) -> Self {
        Self::LanguageMismatch { query, tree }
    }

    /// Creates an unsupported traversal mode error.
    #[must_use]
    pub fn unsupported_mode(mode: impl Into<String>) -> Self {
        Self::UnsupportedMode { mode: mode.into() }
    }

    /// Creates an unknown capture index error.
    #[must_use]
    pub const fn unknown_capture(index: usize, capture_count: usize) -> Self {
        Self::UnknownCapture {
            index,
            capture_count,
        }
    }

    /// Creates a cursor failure error.
    #[must_use]
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::CursorError {
            message: message.into(),
        }
    }
}
