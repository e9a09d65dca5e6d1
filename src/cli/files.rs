//! Files command implementation

use anyhow::Result;
use std::path::{Path, PathBuf};

use hookpin::{FileSelection, HookPlan, PlanOptions, Stage};

use super::load_config;

/// Show which of `paths` each planned hook would receive
pub fn files_command(
    work_dir: &Path,
    config_path: Option<&Path>,
    stage: Stage,
    hook: Option<String>,
    paths: &[PathBuf],
) -> Result<()> {
    let (_, config) = load_config(work_dir, config_path)?;

    let options = PlanOptions {
        stage,
        only: hook,
        ..PlanOptions::default()
    }
    .with_skip_env();
    let plan = HookPlan::build(&config, &options)?;

    for planned in &plan.hooks {
        match plan.files_for(planned, paths) {
            FileSelection::NoFiles => {
                println!("{}: (no files to check) Skipped", planned.id);
            }
            FileSelection::Run { matched, passed } => {
                if passed.is_empty() {
                    println!("{}: runs, {} matched, no file names passed", planned.id, matched.len());
                } else {
                    println!("{}: {} file(s)", planned.id, passed.len());
                    for file in passed {
                        println!("    {}", file);
                    }
                }
            }
        }
    }

    for id in &plan.skipped {
        println!("{}: Skipped (SKIP)", id);
    }

    Ok(())
}
