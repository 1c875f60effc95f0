use crate::platform::PlatformOps;
use anyhow::Result;
use fs_err as fs;
use std::path::{Path, PathBuf};

pub static UNIX_PLATFORM: Unix = Unix;

pub struct Unix;

impl PlatformOps for Unix {
    fn cache_root(&self, tool: &str) -> Option<PathBuf> {
        dirs::cache_dir()
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".cache")))
            .map(|dir| dir.join(tool))
    }
    fn executable_name(&self, base: &str) -> String {
        base.to_string()
    }
    fn candidate_executable_names(&self, base: &str) -> Vec<String> {
        vec![self.executable_name(base)]
    }
    fn is_debug_symbols(&self, file_name: &str) -> bool {
        [".dSYM", ".dwp", ".pdb", ".debug"]
            .iter()
            .any(|suffix| file_name.ends_with(suffix))
    }
    fn make_executable(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        fs::set_permissions(path, perms)?;
        Ok(())
    }
}
