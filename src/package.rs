//! Running a tool at another version by building it from source.
//!
//! Built versions live under `<cache root>/Versions/`:
//!
//! ```text
//! Versions/1.2.3/                 a tagged release, kept forever
//! Versions/Development/<commit>/  the latest development head
//! Versions/.work/.build-*/        builds in progress
//! ```
//!
//! An entry appears only through a single rename once its build has
//! succeeded, so an interrupted build never leaves a half-filled entry.
//! There is no lock: two processes building the same entry both do the
//! work, and whichever renames second discards its copy.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::cargo::Cargo;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::git::Git;
use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::messages;
use crate::output::Output;
use crate::platform::platform;
use crate::process::ProcessRunner;
use crate::version::Build;

const VERSIONS: &str = "Versions";
const DEVELOPMENT: &str = "Development";
const WORK: &str = ".work";
const WORK_PREFIX: &str = ".build-";

/// Work directories older than this belong to builds that were killed.
const ABANDONED_AFTER: Duration = Duration::from_secs(24 * 60 * 60);

/// Directories and files in a cargo target directory that are not products.
const BOOKKEEPING: [&str; 6] = [
    "build",
    "deps",
    "incremental",
    ".fingerprint",
    "examples",
    ".cargo-lock",
];

fn is_product(file_name: &str) -> bool {
    !BOOKKEEPING.contains(&file_name)
        && !file_name.ends_with(".d")
        && !platform().is_debug_symbols(file_name)
}

/// Where a package's source lives and how to fetch and build it.
#[derive(Debug)]
pub struct PackageRepository {
    url: String,
    git: Git,
    cargo: Cargo,
    runner: Arc<dyn ProcessRunner>,
}

impl PackageRepository {
    pub fn new(url: impl Into<String>, runner: Arc<dyn ProcessRunner>, settings: &Settings) -> Self {
        PackageRepository {
            url: url.into(),
            git: Git::new(runner.clone(), settings.tool_path("git")),
            cargo: Cargo::new(runner.clone(), settings.tool_path("cargo")),
            runner,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn latest_commit(&self, output: &Output) -> Result<String> {
        self.git.latest_commit(&self.url, output)
    }

    fn fetch(&self, build: &Build, destination: &Path, output: &Output) -> Result<()> {
        step(build, "git clone", self.git.clone_repository(&self.url, destination, output))?;
        if let Build::Version(version) = build {
            step(build, "git checkout", self.git.checkout_version(destination, *version, output))?;
        }
        Ok(())
    }

    fn build(&self, build: &Build, source: &Path, output: &Output) -> Result<PathBuf> {
        step(build, "cargo build", self.cargo.build_release(source, output))
    }
}

fn step<T>(build: &Build, step: &str, result: Result<T>) -> Result<T> {
    result.map_err(|source| Error::BuildFailed {
        build: *build,
        step: step.to_string(),
        source: Box::new(source),
    })
}

/// The version cache of one package.
#[derive(Debug)]
pub struct Package {
    repository: PackageRepository,
    cache_root: PathBuf,
    abandoned_after: Duration,
}

impl Package {
    pub fn new(repository: PackageRepository, cache_root: impl Into<PathBuf>) -> Self {
        Package {
            repository,
            cache_root: cache_root.into(),
            abandoned_after: ABANDONED_AFTER,
        }
    }

    /// How old a leftover work directory must be before a new build
    /// removes it.
    pub fn with_abandoned_after(mut self, age: Duration) -> Self {
        self.abandoned_after = age;
        self
    }

    pub fn repository(&self) -> &PackageRepository {
        &self.repository
    }

    pub fn versions_directory(&self) -> PathBuf {
        self.cache_root.join(VERSIONS)
    }

    fn work_directory(&self) -> PathBuf {
        self.versions_directory().join(WORK)
    }

    fn entry_directory(&self, build: &Build, commit: Option<&str>) -> PathBuf {
        let versions = self.versions_directory();
        match (build, commit) {
            (Build::Version(version), _) => versions.join(version.to_string()),
            (Build::Development, Some(commit)) => versions.join(DEVELOPMENT).join(commit),
            (Build::Development, None) => versions.join(DEVELOPMENT),
        }
    }

    /// Returns the cache entry for `build`, building it first if needed.
    pub fn ensure_built(&self, build: &Build, output: &Output) -> Result<PathBuf> {
        let commit = match build {
            Build::Development => Some(self.repository.latest_commit(output)?),
            Build::Version(_) => None,
        };
        let destination = self.entry_directory(build, commit.as_deref());
        if destination.is_dir() {
            info!(%build, path = %destination.display(), "cache hit");
            if let Ok(Some(manifest)) = Manifest::load(&destination) {
                debug!(built = %manifest.built, source = %manifest.source, "cached manifest");
            }
            return Ok(destination);
        }
        if commit.is_some() {
            self.prune_development()?;
        }

        info!(%build, path = %destination.display(), "building");
        let spinner = spinner(build, output);
        let result = self.build_into(build, commit.as_deref(), &destination, output);
        spinner.finish_and_clear();
        result?;
        Ok(destination)
    }

    /// Only one development build is kept.
    fn prune_development(&self) -> Result<()> {
        let development = self.versions_directory().join(DEVELOPMENT);
        if !development.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(&development)? {
            let entry = entry?;
            info!(path = %entry.path().display(), "removing stale development build");
            fs::remove_dir_all(entry.path())?;
        }
        Ok(())
    }

    /// Removes work directories left behind by builds that never finished.
    /// Younger ones may belong to a build still running elsewhere.
    fn prune_abandoned_work(&self, work: &Path) {
        let Ok(entries) = fs::read_dir(work) else {
            return;
        };
        for entry in entries.filter_map(|entry| entry.ok()) {
            if !entry.file_name().to_string_lossy().starts_with(WORK_PREFIX) {
                continue;
            }
            let age = entry
                .metadata()
                .and_then(|metadata| metadata.modified())
                .ok()
                .and_then(|modified| modified.elapsed().ok())
                .unwrap_or_default();
            if age < self.abandoned_after {
                continue;
            }
            let path = entry.path();
            match fs::remove_dir_all(&path) {
                Ok(()) => info!(path = %path.display(), "removed abandoned build"),
                Err(error) => warn!(%error, "could not remove abandoned build"),
            }
        }
    }

    fn build_into(
        &self,
        build: &Build,
        commit: Option<&str>,
        destination: &Path,
        output: &Output,
    ) -> Result<()> {
        let parent = destination
            .parent()
            .ok_or_else(|| anyhow::anyhow!("{} has no parent", destination.display()))?;
        fs::create_dir_all(parent)?;
        let work_root = self.work_directory();
        fs::create_dir_all(&work_root)?;
        self.prune_abandoned_work(&work_root);

        // Removed on drop, success or not. Must share a filesystem with the
        // destination for the final rename.
        let work = tempfile::Builder::new().prefix(WORK_PREFIX).tempdir_in(&work_root)?;
        let source = work.path().join("source");
        let staged = work.path().join("product");

        self.repository.fetch(build, &source, output)?;
        let products = self.repository.build(build, &source, output)?;
        step(build, "install", relocate(&products, &staged))?;
        step(
            build,
            "install",
            Manifest::new(build, self.repository.url(), commit).save(&staged),
        )?;

        match fs::rename(&staged, destination) {
            Ok(()) => {
                info!(%build, path = %destination.display(), "installed");
                Ok(())
            }
            Err(error) if destination.is_dir() => {
                warn!(%build, %error, "another process installed this build first");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Builds `build` if needed and runs the first candidate executable in
    /// it with `arguments`, streaming into `output`.
    pub fn execute(
        &self,
        build: &Build,
        candidates: &[String],
        arguments: &[String],
        output: &mut Output,
    ) -> Result<String> {
        let directory = self.ensure_built(build, output)?;
        let executable = find_executable(&directory, candidates)?;
        platform().make_executable(&executable)?;
        debug!(executable = %executable.display(), ?arguments, "handing off");

        let start = output.captured().len();
        let code = self.repository.runner.stream(&executable, arguments, output)?;
        if code != 0 {
            return Err(Error::ExecutionFailed {
                command: executable.display().to_string(),
                code,
                stderr: String::new(),
            });
        }
        Ok(output.captured()[start..].to_string())
    }
}

/// Moves everything except bookkeeping from `products` into a new `staged`.
fn relocate(products: &Path, staged: &Path) -> Result<()> {
    fs::create_dir(staged)?;
    for entry in fs::read_dir(products)? {
        let entry = entry?;
        let name = entry.file_name();
        if !is_product(&name.to_string_lossy()) {
            continue;
        }
        fs::rename(entry.path(), staged.join(&name))?;
    }
    Ok(())
}

/// The first candidate, in order, that is a file directly in `directory`.
fn find_executable(directory: &Path, candidates: &[String]) -> Result<PathBuf> {
    candidates
        .iter()
        .filter(|name| name.as_str() != MANIFEST_FILE)
        .map(|name| directory.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::NoMatchingExecutable {
            directory: directory.to_path_buf(),
            candidates: candidates.to_vec(),
        })
}

fn spinner(build: &Build, output: &Output) -> ProgressBar {
    if !output.is_streaming() || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(messages::building(output.locale(), build));
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookkeeping_is_not_a_product() {
        for name in ["deps", "build", ".fingerprint", "incremental", "examples", ".cargo-lock", "tool.d"] {
            assert!(!is_product(name), "{name}");
        }
        assert!(is_product("tool"));
        assert!(is_product("libtool.so"));
    }

    #[test]
    fn relocation_skips_bookkeeping() {
        let dir = tempfile::tempdir().unwrap();
        let products = dir.path().join("release");
        std::fs::create_dir_all(products.join("deps")).unwrap();
        std::fs::write(products.join("tool"), "bin").unwrap();
        std::fs::write(products.join("tool.d"), "deps").unwrap();
        let staged = dir.path().join("staged");
        relocate(&products, &staged).unwrap();
        let mut names: Vec<_> = std::fs::read_dir(&staged)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["tool"]);
    }

    #[test]
    fn executables_are_matched_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("other"), "").unwrap();
        std::fs::write(dir.path().join("tool"), "").unwrap();
        let found = find_executable(dir.path(), &["tool".to_string()]).unwrap();
        assert_eq!(found, dir.path().join("tool"));
        let missing = find_executable(dir.path(), &["absent".to_string()]).unwrap_err();
        assert!(matches!(missing, Error::NoMatchingExecutable { .. }));
    }

    #[test]
    fn earlier_candidates_win() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("alpha"), "").unwrap();
        std::fs::write(dir.path().join("zulu"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        let candidates = ["nested", "zulu", "alpha"].map(String::from);
        let found = find_executable(dir.path(), &candidates).unwrap();
        assert_eq!(found, dir.path().join("zulu"));
    }

    #[test]
    fn manifest_is_never_an_executable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        let error = find_executable(dir.path(), &[MANIFEST_FILE.to_string()]).unwrap_err();
        assert!(matches!(error, Error::NoMatchingExecutable { .. }));
    }
}
