//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

/// Write `content` to `path` with atomic write and file locking.
///
/// An exclusive lock on a sibling `.lock` file (left in place) serializes concurrent writers,
/// and the content goes through a temp file that is renamed into place.
/// The parent directory is created if needed.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    // Separate from the config so the rename doesn't invalidate the lock
    let lock_path = path.with_extension("lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    let temp_path = path.with_extension("tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    // Lock is released when lock_file is dropped. The lock file itself stays:
    // unlinking it would let a waiter and a new writer lock different inodes.
    Ok(())
}

impl Config {
    /// Serialize this configuration and save it to `path` atomically
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).with_context(|| "Failed to serialize config")?;
        write_atomic(path, &content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }
}
