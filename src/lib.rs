//! hookpin - pre-commit configuration checks
//!
//! Loads a `.pre-commit-config.yaml`, checks its structural contract and
//! computes the ordered list of hooks the runner would execute for a stage.
//! Running the hooks themselves is left to the runner.

pub mod config;
pub mod plan;
pub mod validate;

pub use config::{Config, ConfigError, HookSelection, RepoEntry, RepoSource, Stage};
pub use plan::{FileSelection, HookPlan, PlanError, PlanOptions, PlannedHook};
pub use validate::{Issue, IssueKind, Severity, ValidateOptions, ValidationReport, validate};
