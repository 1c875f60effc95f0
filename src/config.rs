//! User settings read from `config.toml`.
//!
//! ```toml
//! language = "de"
//! cache = "/var/cache/mytool"
//! package_url = "https://example.com/mytool.git"
//!
//! [tools.git]
//! path = "/opt/git/bin/git"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::locale::Locale;

/// Overrides the settings file location.
pub const CONFIG_ENV: &str = "COMMANDANT_CONFIG";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Locale code or native name.
    pub language: Option<String>,
    /// Root of the version cache.
    pub cache: Option<PathBuf>,
    pub package_url: Option<String>,
    pub tools: HashMap<String, ToolSettings>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// `$COMMANDANT_CONFIG`, else `<config dir>/<tool>/config.toml`.
    pub fn default_path(tool: &str) -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join(tool).join("config.toml")))
    }

    pub fn load(tool: &str) -> Result<Self> {
        match Self::default_path(tool) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file");
            return Ok(Self::default());
        }
        let invalid = |reason: String| Error::Configuration {
            path: path.to_path_buf(),
            reason,
        };
        let data = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let settings: Settings = toml::from_str(&data).map_err(|e| invalid(e.to_string()))?;
        if let Some(language) = &settings.language {
            if Locale::from_code(language).is_none() {
                return Err(invalid(format!("unsupported language “{language}”")));
            }
        }
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn locale(&self) -> Option<Locale> {
        self.language.as_deref().and_then(Locale::from_code)
    }

    /// Explicit executable configured for an external tool.
    pub fn tool_path(&self, name: &str) -> Option<PathBuf> {
        self.tools.get(name).and_then(|tool| tool.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reads_all_keys() {
        let (_dir, path) = write(
            r#"
language = "Deutsch"
cache = "/tmp/cache"
package_url = "https://example.com/tool.git"

[tools.git]
path = "/opt/git"
"#,
        );
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.locale(), Some(Locale::German));
        assert_eq!(settings.cache, Some(PathBuf::from("/tmp/cache")));
        assert_eq!(settings.tool_path("git"), Some(PathBuf::from("/opt/git")));
        assert_eq!(settings.tool_path("cargo"), None);
    }

    #[test]
    fn invalid_files_name_their_path() {
        let (_dir, path) = write("language = \"klingon\"\n");
        let error = Settings::load_from(&path).unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
        assert!(error.describe(Locale::English).contains("config.toml"));

        let (_dir, path) = write("colour = true\n");
        assert!(Settings::load_from(&path).is_err());
    }
}
