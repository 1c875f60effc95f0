//! Localized subcommand trees for command-line tools.
//!
//! A tool declares a [`Command`] tree whose names, descriptions and
//! argument types resolve per [`Locale`]. [`Tool::execute`] parses process
//! arguments against it and runs the matched handler, or, when given
//! `•use-version <build>`, builds that version of the tool's own package
//! and hands the invocation over to it.

pub mod argument;
pub mod cargo;
pub mod command;
pub mod config;
mod dispatch;
pub mod error;
pub mod external_tool;
pub mod git;
mod help;
pub mod locale;
pub mod manifest;
pub mod messages;
pub mod option;
pub mod output;
pub mod package;
pub mod parsed;
pub mod platform;
pub mod process;
pub mod tool;
pub mod version;

pub use argument::{ArgumentType, ArgumentValue, Value};
pub use command::{Command, Handler};
pub use config::Settings;
pub use error::{Error, Result, UsageError, UsageFailure, GENERAL_ERROR};
pub use external_tool::ExternalTool;
pub use locale::{Locale, Text};
pub use option::{CommandOption, OPTION_MARKERS};
pub use output::Output;
pub use package::{Package, PackageRepository};
pub use parsed::{DirectArguments, Options};
pub use process::{ProcessOutput, ProcessRunner, SystemRunner};
pub use tool::Tool;
pub use version::{Build, Version};
