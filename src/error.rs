//! Error types for parsing, dispatch and version re-execution.
//!
//! Every error renders in any supported locale through
//! [`Error::describe`] and maps onto a process exit code through
//! [`Error::exit_code`]. `Display` uses the fallback locale.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::locale::{Locale, Text};
use crate::messages;
use crate::option::OPTION_MARKERS;
use crate::version::Build;

/// Exit code for any error that does not carry its own.
pub const GENERAL_ERROR: i32 = 1;

/// Why the tokens did not fit the command's declared grammar.
#[derive(Debug, Clone)]
pub enum UsageFailure {
    UnexpectedArgument { token: String },
    UnexpectedOption { option: Text },
    InvalidOption { token: String },
    MissingOptionArgument { option: Text },
    InvalidOptionArgument { option: Text, argument: String },
    InvalidDirectArgument { argument: String, expected: Text },
}

/// A usage failure plus the command path that was live when it happened.
#[derive(Debug, Clone)]
pub struct UsageError {
    failure: UsageFailure,
    command_path: Vec<Text>,
}

impl UsageError {
    pub(crate) fn new(failure: UsageFailure, command_path: Vec<Text>) -> Self {
        UsageError {
            failure,
            command_path,
        }
    }

    pub fn failure(&self) -> &UsageFailure {
        &self.failure
    }

    /// Space-separated command names from the root, e.g. `tool execute`.
    pub fn command_path(&self, locale: Locale) -> String {
        self.command_path
            .iter()
            .map(|name| name.resolve(locale))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn describe(&self, locale: Locale) -> String {
        let option = |name: &Text| format!("{}{}", OPTION_MARKERS[0], name.resolve(locale));
        let message = match &self.failure {
            UsageFailure::UnexpectedArgument { token } => {
                messages::unexpected_argument(locale, token)
            }
            UsageFailure::UnexpectedOption { option: name } => {
                messages::unexpected_option(locale, &option(name))
            }
            UsageFailure::InvalidOption { token } => messages::invalid_option(locale, token),
            UsageFailure::MissingOptionArgument { option: name } => {
                messages::missing_option_argument(locale, &option(name))
            }
            UsageFailure::InvalidOptionArgument {
                option: name,
                argument,
            } => messages::invalid_option_argument(locale, &option(name), argument),
            UsageFailure::InvalidDirectArgument { argument, expected } => {
                messages::invalid_direct_argument(locale, argument, &expected.resolve(locale))
            }
        };
        format!(
            "{message}\n{}",
            messages::see_also(locale, &self.command_path(locale))
        )
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(Locale::FALLBACK))
    }
}

impl std::error::Error for UsageError {}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// A required external program could not be run at all.
    #[error("{}", messages::tool_unavailable(Locale::FALLBACK, .tool, .webpage))]
    ToolUnavailable { tool: String, webpage: String },

    /// An external program ran and exited unsuccessfully.
    #[error("{}", messages::execution_failed(Locale::FALLBACK, .command, *.code))]
    ExecutionFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Clone, checkout or build of another version failed.
    #[error("{}", messages::build_failed(Locale::FALLBACK, .build, .step))]
    BuildFailed {
        build: Build,
        step: String,
        #[source]
        source: Box<Error>,
    },

    /// A build succeeded but produced none of the expected executables.
    #[error("{}", messages::no_matching_executable(Locale::FALLBACK, .directory, .candidates))]
    NoMatchingExecutable {
        directory: PathBuf,
        candidates: Vec<String>,
    },

    /// Raised by a command handler.
    #[error("{}", .message.key())]
    Failure { message: Text, exit_code: i32 },

    #[error("{}", messages::configuration_invalid(Locale::FALLBACK, .path, .reason))]
    Configuration { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// A handler failure with the general exit code.
    pub fn failure(message: impl Into<Text>) -> Self {
        Error::Failure {
            message: message.into(),
            exit_code: GENERAL_ERROR,
        }
    }

    /// A handler failure with an explicit exit code; zero is replaced by
    /// [`GENERAL_ERROR`] so a failure never reads as success.
    pub fn failure_with_code(message: impl Into<Text>, exit_code: i32) -> Self {
        Error::Failure {
            message: message.into(),
            exit_code: if exit_code == 0 { GENERAL_ERROR } else { exit_code },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ExecutionFailed { code, .. } if *code != 0 => *code,
            Error::Failure { exit_code, .. } => *exit_code,
            Error::BuildFailed { source, .. } => source.exit_code(),
            _ => GENERAL_ERROR,
        }
    }

    pub fn describe(&self, locale: Locale) -> String {
        match self {
            Error::Usage(usage) => usage.describe(locale),
            Error::ToolUnavailable { tool, webpage } => {
                messages::tool_unavailable(locale, tool, webpage)
            }
            Error::ExecutionFailed {
                command,
                code,
                stderr,
            } => {
                let message = messages::execution_failed(locale, command, *code);
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    message
                } else {
                    format!("{message}\n{stderr}")
                }
            }
            Error::BuildFailed {
                build,
                step,
                source,
            } => format!(
                "{}\n{}",
                messages::build_failed(locale, build, step),
                source.describe(locale)
            ),
            Error::NoMatchingExecutable {
                directory,
                candidates,
            } => messages::no_matching_executable(locale, directory, candidates),
            Error::Failure { message, .. } => message.resolve(locale),
            Error::Configuration { path, reason } => {
                messages::configuration_invalid(locale, path, reason)
            }
            Error::Io(_) | Error::Other(_) => format!("{self:#}"),
        }
    }

    pub fn usage_failure(&self) -> Option<&UsageFailure> {
        match self {
            Error::Usage(usage) => Some(usage.failure()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
