//! Release builds of a cloned package.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::external_tool::ExternalTool;
use crate::output::Output;
use crate::process::ProcessRunner;
use crate::version::Version;

#[derive(Debug)]
pub struct Cargo {
    tool: ExternalTool,
}

impl Cargo {
    pub fn new(runner: Arc<dyn ProcessRunner>, path: Option<PathBuf>) -> Self {
        Cargo {
            tool: ExternalTool::new("cargo", "https://rustup.rs", Version::new(1, 0, 0), runner)
                .with_path(path),
        }
    }

    /// Builds in release mode and returns the directory holding the products.
    pub fn build_release(&self, package: &Path, output: &Output) -> Result<PathBuf> {
        let target = package.join("target");
        let arguments = vec![
            "build".to_string(),
            "--release".to_string(),
            "--quiet".to_string(),
            "--target-dir".to_string(),
            target.to_string_lossy().into_owned(),
        ];
        self.tool.execute(&arguments, Some(package), output)?;
        Ok(target.join("release"))
    }
}
