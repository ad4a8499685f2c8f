//! Grammar selection for the trees and queries this crate iterates over.
//!
//! [`SupportedLanguage`] names the grammars bundled with the crate. Both the
//! parser wrapper and query compilation use it, so a query and the tree it
//! runs over always come from the same grammar.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Grammars bundled for parsing and query compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Rust (`.rs`).
    #[default]
    Rust,
    /// Python (`.py`, `.pyi`).
    Python,
    /// TypeScript, parsed with the TSX grammar (`.ts`, `.tsx`, `.mts`, `.cts`).
    TypeScript,
}

impl SupportedLanguage {
    /// File extensions mapped to this language, without the leading dot.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Rust => &["rs"],
            Self::Python => &["py", "pyi"],
            Self::TypeScript => &["ts", "tsx", "mts", "cts"],
        }
    }

    /// Detects the language from a file extension, ignoring ASCII case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::all().iter().copied().find(|language| {
            language
                .extensions()
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        })
    }

    /// Detects the language from the extension of `path`.
    ///
    /// Returns `None` when the path has no extension or the extension is not
    /// mapped to a bundled grammar.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the Tree-sitter grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            // TSX is a superset, so plain `.ts` parses too.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Python => "python",
            Self::TypeScript => "typescript",
        }
    }

    /// Returns every bundled language.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Rust, Self::Python, Self::TypeScript]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a language identifier is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the normalised input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "rust" | "rs" => Ok(Self::Rust),
            "python" | "py" => Ok(Self::Python),
            "typescript" | "ts" | "tsx" => Ok(Self::TypeScript),
            _ => Err(LanguageParseError(normalised)),
        }
    }
}
