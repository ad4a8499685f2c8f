//! CLI argument definitions for the `sylvan` binary.

use camino::Utf8PathBuf;
use clap::{ArgGroup, Args, Parser, Subcommand};
use sylvan_iter::{SupportedLanguage, TraversalMode};

use crate::output::OutputFormat;

const CONFIG_HELP: &str = "\
Configuration flags (must precede the command):
  --config-path <PATH>       Read configuration from PATH
  --log-filter <FILTER>      Tracing filter, for example `debug`
  --log-format <FORMAT>      Log format: json or compact
  --match-limit <N>          Cap on in-progress query matches
  --max-start-depth <N>      Deepest node a query match may start at";

/// Command-line interface for the `sylvan` syntax tree explorer.
#[derive(Parser, Debug)]
#[command(
    name = "sylvan",
    version,
    about = "Walks Tree-sitter syntax trees and streams query matches",
    disable_help_subcommand = true,
    after_help = CONFIG_HELP
)]
pub(crate) struct Cli {
    /// Controls how records are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto, global = true)]
    pub(crate) output: OutputFormat,
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the `sylvan` CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Walks a file's syntax tree and prints one record per node.
    Walk(WalkArgs),
    /// Runs a Tree-sitter query over a file and prints one record per match.
    Query(QueryArgs),
}

/// Arguments for `sylvan walk`.
#[derive(Args, Debug, Clone)]
pub(crate) struct WalkArgs {
    /// Source file to parse.
    #[arg(value_name = "FILE")]
    pub(crate) file: Utf8PathBuf,
    /// Language to parse with; detected from the extension when omitted.
    #[arg(long, value_name = "LANGUAGE")]
    pub(crate) language: Option<SupportedLanguage>,
    /// Traversal order: `dfs` (pre-order) or `bfs` (level order).
    #[arg(long, value_name = "MODE", default_value = "dfs")]
    pub(crate) mode: TraversalMode,
    /// Visits named nodes only.
    #[arg(long)]
    pub(crate) named: bool,
    /// Stops after this many nodes.
    #[arg(long, value_name = "N")]
    pub(crate) limit: Option<usize>,
}

/// Arguments for `sylvan query`.
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("query_source")
        .required(true)
        .args(["query", "query_file"])
))]
pub(crate) struct QueryArgs {
    /// Source file to parse.
    #[arg(value_name = "FILE")]
    pub(crate) file: Utf8PathBuf,
    /// Language to parse with; detected from the extension when omitted.
    #[arg(long, value_name = "LANGUAGE")]
    pub(crate) language: Option<SupportedLanguage>,
    /// Query source text.
    #[arg(long, value_name = "QUERY")]
    pub(crate) query: Option<String>,
    /// File containing the query source.
    #[arg(long, value_name = "PATH")]
    pub(crate) query_file: Option<Utf8PathBuf>,
    /// Stops after this many matches.
    #[arg(long, value_name = "N")]
    pub(crate) limit: Option<usize>,
}
