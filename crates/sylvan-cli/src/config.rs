//! Configuration for the `sylvan` CLI.
//!
//! [`Config`] is layered by `ortho-config`: defaults, then a configuration
//! file, then `SYLVAN_*` environment variables, then command-line flags. The
//! argument splitter below routes the leading configuration flags to the
//! loader so clap only sees the subcommand and its arguments.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use sylvan_iter::QueryOptions;

use crate::AppError;
use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Runtime configuration for the `sylvan` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "SYLVAN",
    discovery(
        app_name = "sylvan",
        env_var = "SYLVAN_CONFIG_PATH",
        config_file_name = "sylvan.toml",
        dotfile_name = ".sylvan.toml",
        project_file_name = ".sylvan.toml",
        config_cli_long = "config-path",
        config_cli_visible = true,
    )
)]
pub struct Config {
    /// Tracing filter directive, for example `info` or `sylvan_iter=trace`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log record format written to stderr.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Upper bound on in-progress matches the query cursor keeps.
    #[serde(default)]
    pub match_limit: Option<u32>,
    /// Deepest node at which a query match may start.
    #[serde(default)]
    pub max_start_depth: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            match_limit: None,
            max_start_depth: None,
        }
    }
}

impl Config {
    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Builds the cursor options applied to every query run.
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            match_limit: self.match_limit,
            max_start_depth: self.max_start_depth,
            ..QueryOptions::default()
        }
    }
}

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// the subcommand. Configuration flags appearing later are handed to clap,
    /// which rejects them.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        if !argument_text.starts_with("--") {
            return FlagAction::Skip;
        }

        let (flag, has_inline_value) = match argument_text.split_once('=') {
            Some((flag, _)) => (flag, true),
            None => (argument_text.as_ref(), false),
        };

        if super::CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(program) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered: Vec<OsString> = vec![program.clone()];
    let mut command_start = 1usize;
    let mut pending_values = 0usize;

    for argument in args.iter().skip(1) {
        if pending_values > 0 {
            filtered.push(argument.clone());
            pending_values -= 1;
            command_start += 1;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                filtered.push(argument.clone());
                command_start += 1;
                if needs_value {
                    pending_values = 1;
                }
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}
