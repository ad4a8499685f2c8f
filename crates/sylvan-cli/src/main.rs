//! CLI entrypoint for the `sylvan` syntax tree explorer.
//!
//! The binary delegates to [`sylvan_cli::run`], which loads configuration,
//! parses the requested file and streams traversal or query-match records.

use std::io::{self, IsTerminal, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    sylvan_cli::run(
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
