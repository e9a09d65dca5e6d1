//! List command implementation

use anyhow::Result;
use std::path::Path;

use hookpin::{HookPlan, PlanOptions, Stage};

use super::load_config;

/// Print the hooks that would run for `stage`, in execution order
pub fn list_command(
    work_dir: &Path,
    config_path: Option<&Path>,
    stage: Stage,
    hook: Option<String>,
    json: bool,
) -> Result<()> {
    let (_, config) = load_config(work_dir, config_path)?;

    let options = PlanOptions {
        stage,
        only: hook,
        ..PlanOptions::default()
    }
    .with_skip_env();
    let plan = HookPlan::build(&config, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("No hooks for {}.", stage);
    } else {
        println!("Hooks for {} ({}):\n", stage, plan.hooks.len());
    }

    for (i, planned) in plan.hooks.iter().enumerate() {
        let rev = planned.rev.as_deref().unwrap_or("-");
        println!("  {:>2}. {} [{} @ {}]", i + 1, planned.id, planned.repo, rev);

        if planned.name != planned.id {
            println!("      name: {}", planned.name);
        }
        if let Some(entry) = &planned.entry {
            println!("      entry: {}", entry);
        }
        if !planned.args.is_empty() {
            println!("      args: {}", planned.args.join(" "));
        }

        let mut flags = Vec::new();
        if planned.always_run {
            flags.push("always_run");
        }
        if !planned.pass_filenames {
            flags.push("no filenames");
        }
        if !flags.is_empty() {
            println!("      ({})", flags.join(", "));
        }
    }

    if !plan.skipped.is_empty() {
        println!("\nSkipped: {}", plan.skipped.join(", "));
    }
    if plan.fail_fast {
        println!("\nfail_fast: stops at the first failing hook");
    }

    Ok(())
}
