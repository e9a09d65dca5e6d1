//! Validate command implementation

use anyhow::{Context, Result, bail};
use std::path::Path;

use hookpin::validate::parse_version_lenient;
use hookpin::{ValidateOptions, validate};

use super::load_config;

/// Check the config and print every issue found
pub fn validate_command(
    work_dir: &Path,
    config_path: Option<&Path>,
    runner_version: Option<&str>,
    strict: bool,
    json: bool,
) -> Result<()> {
    let (path, config) = load_config(work_dir, config_path)?;

    let runner_version = runner_version
        .map(|raw| {
            parse_version_lenient(raw).with_context(|| format!("Invalid runner version: {}", raw))
        })
        .transpose()?;

    let report = validate(&config, &ValidateOptions { runner_version });

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.issues.is_empty() {
        println!(
            "{}: OK ({} repos, {} hooks)",
            path.display(),
            config.repos.len(),
            config.hook_count()
        );
    } else {
        for issue in &report.issues {
            println!("{}: {}", path.display(), issue);
        }
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    if errors > 0 {
        bail!("{} error(s) in {}", errors, path.display());
    }
    if strict && warnings > 0 {
        bail!("{} warning(s) in {} (--strict)", warnings, path.display());
    }

    Ok(())
}
