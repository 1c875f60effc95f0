//! `manifest.toml`, written into every cache entry once its build succeeds.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::version::Build;

pub const MANIFEST_FILE: &str = "manifest.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Manifest {
    /// `1.2.3` or `development`.
    pub build: String,
    pub source: String,
    /// Present for development builds.
    #[serde(default)]
    pub commit: Option<String>,
    pub built: DateTime<Utc>,
    #[serde(default)]
    pub built_by: Option<String>,
}

impl Manifest {
    pub fn new(build: &Build, source: &str, commit: Option<&str>) -> Self {
        Self {
            build: build.to_string(),
            source: source.to_string(),
            commit: commit.map(str::to_string),
            built: Utc::now(),
            built_by: Some(env!("CARGO_PKG_VERSION").to_string()),
        }
    }

    pub fn load(directory: &Path) -> Result<Option<Self>> {
        let path = directory.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let manifest: Manifest = toml::from_str(&data)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(manifest))
    }

    pub fn save(&self, directory: &Path) -> Result<()> {
        let data = toml::to_string_pretty(self).context("serializing cache manifest")?;
        fs::write(directory.join(MANIFEST_FILE), data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn saved_manifest_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Manifest::load(dir.path()).unwrap(), None);
        let manifest = Manifest::new(
            &Build::Version(Version::new(1, 2, 3)),
            "https://example.com/tool.git",
            None,
        );
        manifest.save(dir.path()).unwrap();
        let loaded = Manifest::load(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.build, "1.2.3");
        assert_eq!(loaded.commit, None);
        assert_eq!(loaded.built_by.as_deref(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "build = [").unwrap();
        assert!(Manifest::load(dir.path()).is_err());
    }
}
