//! A single external executable the framework depends on, such as git.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::messages;
use crate::output::Output;
use crate::process::{ProcessOutput, ProcessRunner};
use crate::version::Version;

pub struct ExternalTool {
    name: String,
    webpage: String,
    expected: Version,
    version_arguments: Vec<String>,
    path: Option<PathBuf>,
    runner: Arc<dyn ProcessRunner>,
    verified: OnceCell<PathBuf>,
}

impl fmt::Debug for ExternalTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalTool")
            .field("name", &self.name)
            .field("expected", &self.expected)
            .field("path", &self.path)
            .field("verified", &self.verified.get())
            .finish()
    }
}

impl ExternalTool {
    pub fn new(
        name: impl Into<String>,
        webpage: impl Into<String>,
        expected: Version,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        ExternalTool {
            name: name.into(),
            webpage: webpage.into(),
            expected,
            version_arguments: vec!["--version".to_string()],
            path: None,
            runner,
            verified: OnceCell::new(),
        }
    }

    pub fn with_version_arguments(mut self, arguments: &[&str]) -> Self {
        self.version_arguments = arguments.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Uses `path` instead of searching `PATH`.
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the tool and returns its stdout.
    pub fn execute(
        &self,
        arguments: &[String],
        directory: Option<&Path>,
        output: &Output,
    ) -> Result<String> {
        let program = self.verified(output)?;
        let finished = self.runner.run(program, arguments, directory)?;
        if !finished.success() {
            return Err(Error::ExecutionFailed {
                command: format!("{} {}", self.name, arguments.join(" ")),
                code: finished.code,
                stderr: finished.stderr,
            });
        }
        Ok(finished.stdout)
    }

    fn unavailable(&self) -> Error {
        Error::ToolUnavailable {
            tool: self.name.clone(),
            webpage: self.webpage.clone(),
        }
    }

    /// Locates the tool and checks its version, once per instance.
    fn verified(&self, output: &Output) -> Result<&Path> {
        self.verified
            .get_or_try_init(|| -> Result<PathBuf> {
                let program = self
                    .path
                    .clone()
                    .or_else(|| self.runner.locate(&self.name))
                    .ok_or_else(|| self.unavailable())?;
                let probe = match self.runner.run(&program, &self.version_arguments, None) {
                    Ok(probe) => probe,
                    Err(error) => {
                        debug!(tool = %self.name, %error, "version probe failed to start");
                        return Err(self.unavailable());
                    }
                };
                let found = detected_version(&probe);
                if !probe.success() && found.is_none() {
                    return Err(self.unavailable());
                }
                let compatible = found
                    .map(|version| self.expected.is_compatible_with(&version))
                    .unwrap_or(false);
                if !compatible {
                    let locale = output.locale();
                    let found = found
                        .map(|version| version.to_string())
                        .unwrap_or_else(|| messages::unknown_tool_version(locale).to_string());
                    warn!(tool = %self.name, expected = %self.expected, %found, "unexpected tool version");
                    output.warn(messages::tool_version_mismatch(
                        locale,
                        &self.name,
                        &self.expected.to_string(),
                        &found,
                    ));
                }
                debug!(tool = %self.name, program = %program.display(), "verified");
                Ok(program)
            })
            .map(PathBuf::as_path)
    }
}

fn detected_version(probe: &ProcessOutput) -> Option<Version> {
    Version::find_in(&probe.stdout).or_else(|| Version::find_in(&probe.stderr))
}
