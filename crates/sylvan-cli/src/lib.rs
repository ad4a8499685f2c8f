//! Command-line runtime for the `sylvan` syntax tree explorer.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! set-up and dispatch to the `walk` and `query` commands. The runtime is
//! exercised both from the binary entrypoint and from tests where the
//! configuration loader and IO streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

mod cli;
mod commands;
mod config;
mod errors;
mod logging;
mod output;
mod telemetry;

use cli::{Cli, CliCommand};
pub use config::{
    Config, DEFAULT_LOG_FILTER, default_log_filter_string, default_log_format,
};
use config::{ConfigArgumentSplit, ConfigLoader, OrthoConfigLoader, split_config_arguments};
pub(crate) use errors::AppError;
pub use logging::LogFormat;
pub use output::OutputFormat;
use output::RecordWriter;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: This list must be kept in sync with the fields of
/// [`Config`]. When adding new configuration options, update this array
/// accordingly.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--match-limit",
    "--max-start-depth",
];

/// Runs the CLI using the provided arguments and IO handles.
///
/// Records go to `stdout`; diagnostics go to `stderr` prefixed with
/// `error:`. Returns [`ExitCode::SUCCESS`] when the command completed and
/// [`ExitCode::FAILURE`] otherwise.
#[must_use]
pub fn run<I, W, E>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, stdout_is_terminal, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);
    let cli_arguments = prepare_cli_arguments(&args, &split);

    let result = Cli::try_parse_from(cli_arguments)
        .map_err(AppError::CliUsage)
        .and_then(|cli| {
            loader
                .load(&split.config_arguments)
                .map(|config| (cli, config))
        })
        .and_then(|(cli, config)| {
            telemetry::initialise(&config)?;
            let format = cli.output.resolve(stdout_is_terminal);
            let mut writer = RecordWriter::new(&mut *stdout, format);
            match &cli.command {
                CliCommand::Walk(args) => commands::walk(args, &mut writer)?,
                CliCommand::Query(args) => commands::query(args, &config, &mut writer)?,
            }
            writer.finish()
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::CliUsage(error)) => report_usage(&error, stdout, stderr),
        Err(error) => {
            let _ = writeln!(stderr, "error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    if let Some(rest) = args.get(split.command_start..) {
        cli_arguments.extend(rest.iter().cloned());
    }
    cli_arguments
}

/// Prints clap's rendered message; help and version requests succeed.
fn report_usage<W: Write, E: Write>(
    error: &clap::Error,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        _ => {
            let _ = write!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}
