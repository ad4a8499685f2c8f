//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use sylvan_iter::IterError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: Utf8PathBuf,
        source: io::Error,
    },
    #[error("failed to read query file {path}: {source}")]
    ReadQuery {
        path: Utf8PathBuf,
        source: io::Error,
    },
    #[error("no query given; pass --query or --query-file")]
    MissingQuery,
    #[error("cannot detect the language of {path}; pass --language")]
    UnknownLanguage { path: Utf8PathBuf },
    #[error(transparent)]
    Iter(#[from] IterError),
    #[error("failed to serialise output record: {0}")]
    SerialiseRecord(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
