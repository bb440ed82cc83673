use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "lyricfetch";

/// Get the application's data directory following XDG standards
/// On Linux: ~/.local/share/lyricfetch
pub fn get_data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Failed to determine user data directory")?;
    ensure_dir(base.join(APP_DIR))
}

/// Get the application's log directory
pub fn get_log_dir() -> Result<PathBuf> {
    get_log_dir_in(&get_data_dir()?)
}

/// Log directory beneath an arbitrary data directory.
pub fn get_log_dir_in(data_dir: &Path) -> Result<PathBuf> {
    ensure_dir(data_dir.join("logs"))
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir)
}
