//! Implementations of the `walk` and `query` subcommands.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

use camino::Utf8Path;
use sylvan_iter::{CompiledQuery, ParseResult, Parser, QueryRunner, SupportedLanguage};
use tracing::{debug, warn};

use crate::AppError;
use crate::cli::{QueryArgs, WalkArgs};
use crate::config::Config;
use crate::output::{MatchRecord, NodeRecord, RecordWriter};

/// Reads and parses `path`, detecting the language unless one is given.
fn parse_file(
    path: &Utf8Path,
    language: Option<SupportedLanguage>,
) -> Result<ParseResult, AppError> {
    let language = language
        .or_else(|| SupportedLanguage::from_path(path.as_std_path()))
        .ok_or_else(|| AppError::UnknownLanguage {
            path: path.to_owned(),
        })?;
    let source = fs::read_to_string(path).map_err(|source| AppError::ReadSource {
        path: path.to_owned(),
        source,
    })?;

    let parsed = Parser::new(language)?.parse(&source)?;
    if parsed.has_errors() {
        warn!(
            file = %path,
            errors = parsed.errors().len(),
            "source contains syntax errors"
        );
    }
    Ok(parsed)
}

pub(crate) fn walk<W: Write>(
    args: &WalkArgs,
    out: &mut RecordWriter<'_, W>,
) -> Result<(), AppError> {
    let parsed = parse_file(&args.file, args.language)?;
    let limit = args.limit.unwrap_or(usize::MAX);

    for node in parsed.traverse(args.mode, args.named).take(limit) {
        out.node(&NodeRecord::from_node(node))?;
    }

    debug!(
        file = %args.file,
        mode = %args.mode,
        named_only = args.named,
        visited = out.written(),
        "walk finished"
    );
    Ok(())
}

/// Returns the query text given inline or read from `--query-file`.
fn query_source(args: &QueryArgs) -> Result<String, AppError> {
    match (&args.query, &args.query_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => fs::read_to_string(path).map_err(|source| AppError::ReadQuery {
            path: path.clone(),
            source,
        }),
        (None, None) => Err(AppError::MissingQuery),
    }
}

pub(crate) fn query<W: Write>(
    args: &QueryArgs,
    config: &Config,
    out: &mut RecordWriter<'_, W>,
) -> Result<(), AppError> {
    let query_source = query_source(args)?;

    let parsed = parse_file(&args.file, args.language)?;
    let query = CompiledQuery::compile(&query_source, parsed.language())?;
    let mut runner = QueryRunner::with_options(&config.query_options());
    let limit = args.limit.unwrap_or(usize::MAX);

    for found in parsed.matches(&mut runner, &query)?.take(limit) {
        let found = found?;
        let captures: BTreeMap<String, NodeRecord> = found
            .captures()
            .iter()
            .map(|(name, node)| {
                let record = NodeRecord::from_node(*node).with_text(parsed.text_of(*node));
                ((*name).to_owned(), record)
            })
            .collect();
        out.matched(&MatchRecord {
            pattern_index: found.pattern_index(),
            captures,
        })?;
    }

    if runner.did_exceed_match_limit() {
        warn!(
            match_limit = ?config.match_limit,
            "match limit exceeded; some matches were dropped"
        );
    }
    debug!(file = %args.file, matches = out.written(), "query finished");
    Ok(())
}
