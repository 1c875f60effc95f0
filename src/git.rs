//! The git operations needed to fetch a package's source.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::external_tool::ExternalTool;
use crate::output::Output;
use crate::process::ProcessRunner;
use crate::version::Version;

#[derive(Debug)]
pub struct Git {
    tool: ExternalTool,
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl Git {
    pub fn new(runner: Arc<dyn ProcessRunner>, path: Option<PathBuf>) -> Self {
        Git {
            tool: ExternalTool::new("git", "https://git-scm.com", Version::new(2, 0, 0), runner)
                .with_path(path),
        }
    }

    pub fn clone_repository(&self, url: &str, destination: &Path, output: &Output) -> Result<()> {
        self.tool.execute(
            &args(&["clone", "--quiet", url, &display(destination)]),
            None,
            output,
        )?;
        Ok(())
    }

    /// Checks out the release tag for `version`, accepting both `1.2.3` and
    /// `v1.2.3` tag styles.
    pub fn checkout_version(
        &self,
        repository: &Path,
        version: Version,
        output: &Output,
    ) -> Result<()> {
        let plain = version.to_string();
        match self.checkout(repository, &plain, output) {
            Err(Error::ExecutionFailed { .. }) => {
                debug!(tag = %plain, "tag not found, trying the v-prefixed form");
                self.checkout(repository, &format!("v{plain}"), output)
            }
            other => other,
        }
    }

    fn checkout(&self, repository: &Path, revision: &str, output: &Output) -> Result<()> {
        self.tool.execute(
            &args(&["checkout", "--quiet", revision]),
            Some(repository),
            output,
        )?;
        Ok(())
    }

    /// The commit `HEAD` currently points to on the remote.
    pub fn latest_commit(&self, url: &str, output: &Output) -> Result<String> {
        let listing = self
            .tool
            .execute(&args(&["ls-remote", url, "HEAD"]), None, output)?;
        listing
            .split_whitespace()
            .next()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("git ls-remote {url} returned no HEAD").into())
    }
}
