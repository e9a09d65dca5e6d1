//! CLI command implementations

pub mod files;
pub mod init;
pub mod list;
pub mod validate;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use hookpin::Config;

/// Resolve the config path: `--config` if given, else the file found in `work_dir`
pub fn resolve_config_path(work_dir: &Path, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        return Ok(path.to_path_buf());
    }

    Config::locate(work_dir).with_context(|| {
        format!(
            "No .pre-commit-config.yaml found in {} (run `hookpin init` to create one)",
            work_dir.display()
        )
    })
}

/// Load the config for a command, returning the path it came from
pub fn load_config(work_dir: &Path, config_path: Option<&Path>) -> Result<(PathBuf, Config)> {
    let path = resolve_config_path(work_dir, config_path)?;
    let config = Config::from_file(&path)?;
    tracing::debug!("Loaded {}", path.display());
    Ok((path, config))
}
