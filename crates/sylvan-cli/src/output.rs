//! Record types and rendering for walk and query output.
//!
//! JSON output writes one serialised record per line. Human output writes
//! one aligned line per node, with query captures indented under their match.

use std::collections::BTreeMap;
use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use sylvan_iter::point_to_one_based;

use crate::AppError;

/// Output format selection for command records.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON lines.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ResolvedOutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub(crate) const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

/// One-based line and column.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct Position {
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        let (line, column) = point_to_one_based(point);
        Self { line, column }
    }
}

/// A syntax node as reported to the user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct NodeRecord {
    pub(crate) kind: &'static str,
    pub(crate) named: bool,
    pub(crate) start: Position,
    pub(crate) end: Position,
    pub(crate) start_byte: usize,
    pub(crate) end_byte: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
}

impl NodeRecord {
    pub(crate) fn from_node(node: tree_sitter::Node<'_>) -> Self {
        Self {
            kind: node.kind(),
            named: node.is_named(),
            start: node.start_position().into(),
            end: node.end_position().into(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            text: None,
        }
    }

    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_owned());
        self
    }

    fn render_human(&self) -> String {
        let kind = if self.named {
            self.kind.to_owned()
        } else {
            format!("{:?}", self.kind)
        };
        let span = format!(
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        );
        match &self.text {
            Some(text) => format!("{kind} {span} {}", first_line(text)),
            None => format!("{kind} {span}"),
        }
    }
}

/// A query match as reported to the user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct MatchRecord {
    pub(crate) pattern_index: usize,
    pub(crate) captures: BTreeMap<String, NodeRecord>,
}

/// Streams records to stdout in the resolved format.
pub(crate) struct RecordWriter<'a, W: Write> {
    out: &'a mut W,
    format: ResolvedOutputFormat,
    written: usize,
}

impl<'a, W: Write> RecordWriter<'a, W> {
    pub(crate) const fn new(out: &'a mut W, format: ResolvedOutputFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    /// Number of records written so far.
    pub(crate) const fn written(&self) -> usize {
        self.written
    }

    pub(crate) fn node(&mut self, record: &NodeRecord) -> Result<(), AppError> {
        match self.format {
            ResolvedOutputFormat::Json => self.json_line(record)?,
            ResolvedOutputFormat::Human => {
                writeln!(self.out, "{}", record.render_human()).map_err(AppError::WriteOutput)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    pub(crate) fn matched(&mut self, record: &MatchRecord) -> Result<(), AppError> {
        match self.format {
            ResolvedOutputFormat::Json => self.json_line(record)?,
            ResolvedOutputFormat::Human => {
                writeln!(
                    self.out,
                    "match {} (pattern {})",
                    self.written + 1,
                    record.pattern_index
                )
                .map_err(AppError::WriteOutput)?;
                for (name, node) in &record.captures {
                    writeln!(self.out, "  @{name} {}", node.render_human())
                        .map_err(AppError::WriteOutput)?;
                }
            }
        }
        self.written += 1;
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<(), AppError> {
        self.out.flush().map_err(AppError::WriteOutput)
    }

    fn json_line<T: Serialize>(&mut self, record: &T) -> Result<(), AppError> {
        serde_json::to_writer(&mut *self.out, record).map_err(AppError::SerialiseRecord)?;
        self.out.write_all(b"\n").map_err(AppError::WriteOutput)
    }
}

fn first_line(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default();
    if lines.next().is_some() {
        format!("{first}…")
    } else {
        first.to_owned()
    }
}
