//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

use hookpin::config::{CONFIG_FILE_NAMES, SAMPLE_CONFIG, write_atomic};

/// Write the bundled config into `work_dir` (or to `--config`)
pub fn init_command(work_dir: &Path, config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| work_dir.join(CONFIG_FILE_NAMES[0]));

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    write_atomic(&path, SAMPLE_CONFIG)?;
    info!("Created {}", path.display());
    println!("Created {}", path.display());

    Ok(())
}
