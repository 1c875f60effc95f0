use crate::platform::PlatformOps;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

impl PlatformOps for Windows {
    fn cache_root(&self, tool: &str) -> Option<PathBuf> { dirs::cache_dir().map(|dir| dir.join(tool)) }
    fn executable_name(&self, base: &str) -> String { if base.ends_with(".exe") { base.to_string() } else { format!("{base}.exe") } }
    fn candidate_executable_names(&self, base: &str) -> Vec<String> {
        let native = self.executable_name(base);
        if native == base { vec![native] } else { vec![native, base.to_string()] }
    }
    fn is_debug_symbols(&self, file_name: &str) -> bool { file_name.ends_with(".pdb") }
    fn make_executable(&self, _path: &Path) -> Result<()> { Ok(()) }
}
