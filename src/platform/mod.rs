//! Operating-system differences in executable naming and permissions.

use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

pub trait PlatformOps: Sync + Send {
    /// Where built versions of `tool` are cached unless configured otherwise.
    fn cache_root(&self, tool: &str) -> Option<PathBuf>;
    fn executable_name(&self, base: &str) -> String;
    /// File names under which a built `base` may appear.
    fn candidate_executable_names(&self, base: &str) -> Vec<String>;
    fn is_debug_symbols(&self, file_name: &str) -> bool;
    fn make_executable(&self, path: &Path) -> Result<()>;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_include_the_platform_name() {
        let ops = platform();
        let name = ops.executable_name("demo");
        assert_eq!(ops.candidate_executable_names("demo")[0], name);
        assert!(ops.is_debug_symbols("demo.pdb"));
        assert!(!ops.is_debug_symbols(&name));
    }
}
