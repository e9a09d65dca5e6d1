use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hookpin::Stage;

mod cli;

#[derive(Parser)]
#[command(name = "hookpin")]
#[command(about = "Validate pre-commit configs and show which hooks would run")]
#[command(version)]
struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .pre-commit-config.yaml in the repository)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the config's structure and report issues
    Validate {
        /// Runner version to check minimum_pre_commit_version against
        #[arg(long)]
        runner_version: Option<String>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Print issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the hooks that would run, in order (honours SKIP)
    List {
        /// Stage to plan for
        #[arg(long, default_value = "pre-commit")]
        stage: Stage,

        /// Only this hook id or alias
        #[arg(long)]
        hook: Option<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which of the given files each hook would receive
    Files {
        /// Stage to plan for
        #[arg(long, default_value = "pre-commit")]
        stage: Stage,

        /// Only this hook id or alias
        #[arg(long)]
        hook: Option<String>,

        /// Repository-relative paths
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Write the bundled .pre-commit-config.yaml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Validate {
            runner_version,
            strict,
            json,
        }) => {
            cli::validate::validate_command(
                &work_dir,
                config_path,
                runner_version.as_deref(),
                strict,
                json,
            )?;
        }
        Some(Commands::List { stage, hook, json }) => {
            cli::list::list_command(&work_dir, config_path, stage, hook, json)?;
        }
        Some(Commands::Files { stage, hook, paths }) => {
            cli::files::files_command(&work_dir, config_path, stage, hook, &paths)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, config_path, force)?;
        }
        None => {
            // Default: validate with default options
            cli::validate::validate_command(&work_dir, config_path, None, false, false)?;
        }
    }

    Ok(())
}
