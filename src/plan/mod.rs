//! Hook planning
//!
//! Turns a configuration into the ordered list of hooks a runner would
//! execute for one stage. Order is declaration order: repository entries as
//! listed, then hooks as listed within each entry. Nothing here runs hooks.

mod filter;

pub use filter::{FileFilter, FileSelection, normalize_path};

use std::path::Path;

use serde::Serialize;

use crate::config::{Config, HookSelection, RepoEntry, Stage};

/// Environment variable holding comma-separated hook ids to skip
pub const SKIP_ENV: &str = "SKIP";

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Error type for planning
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("No hook with id `{id}`{}", suggestion_suffix(.suggestion))]
    UnknownHook {
        id: String,
        suggestion: Option<String>,
    },

    #[error("No hook with id `{id}` in stage `{stage}`")]
    NotInStage { id: String, stage: Stage },

    #[error("Invalid `{field}` pattern for {owner}: {source}")]
    InvalidPattern {
        field: &'static str,
        owner: String,
        source: fancy_regex::Error,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean `{}`?)", s))
        .unwrap_or_default()
}

/// What to plan for
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub stage: Stage,
    /// Ids or aliases to leave out
    pub skip: Vec<String>,
    /// Plan only this id or alias
    pub only: Option<String>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            stage: Stage::PreCommit,
            skip: Vec::new(),
            only: None,
        }
    }
}

impl PlanOptions {
    /// Add the ids listed in `SKIP` to the skip list
    pub fn with_skip_env(mut self) -> Self {
        if let Ok(raw) = std::env::var(SKIP_ENV) {
            self.skip.extend(parse_skip_list(&raw));
        }
        self
    }
}

/// Split a `SKIP`-style list: comma-separated, blanks ignored
pub fn parse_skip_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A hook selected for execution, with defaults applied
#[derive(Debug, Clone, Serialize)]
pub struct PlannedHook {
    pub repo: String,
    pub rev: Option<String>,
    pub id: String,
    pub alias: Option<String>,
    pub name: String,
    pub entry: Option<String>,
    pub language: Option<String>,
    pub args: Vec<String>,
    pub stages: Vec<Stage>,
    pub pass_filenames: bool,
    pub always_run: bool,
    pub require_serial: bool,
    pub verbose: bool,
    #[serde(skip)]
    filter: FileFilter,
}

impl PlannedHook {
    fn new(config: &Config, repo: &RepoEntry, hook: &HookSelection) -> Result<Self, PlanError> {
        let include = hook.files.as_deref().unwrap_or(crate::config::DEFAULT_FILES);
        let exclude = hook.exclude.as_deref().unwrap_or(crate::config::DEFAULT_EXCLUDE);
        let filter =
            FileFilter::new(include, exclude).map_err(|(field, source)| PlanError::InvalidPattern {
                field,
                owner: format!("hook `{}`", hook.id),
                source,
            })?;

        Ok(Self {
            repo: repo.repo.clone(),
            rev: repo.rev.clone(),
            id: hook.id.clone(),
            alias: hook.alias.clone(),
            name: hook.effective_name().to_string(),
            entry: hook.entry.clone(),
            language: hook.language.clone(),
            args: hook.args.clone(),
            stages: hook.effective_stages(config),
            pass_filenames: hook.passes_filenames(),
            always_run: hook.runs_always(),
            require_serial: hook.require_serial.unwrap_or(false),
            verbose: hook.verbose.unwrap_or(false),
            filter,
        })
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }
}

/// Ordered hooks for one stage
#[derive(Debug, Clone, Serialize)]
pub struct HookPlan {
    pub stage: Stage,
    pub fail_fast: bool,
    pub hooks: Vec<PlannedHook>,
    /// Ids left out because of the skip list
    pub skipped: Vec<String>,
    #[serde(skip)]
    global: FileFilter,
}

impl HookPlan {
    pub fn build(config: &Config, options: &PlanOptions) -> Result<Self, PlanError> {
        if let Some(only) = options.only.as_deref() {
            if !config.hooks().any(|(_, hook)| hook.answers_to(only)) {
                return Err(PlanError::UnknownHook {
                    id: only.to_string(),
                    suggestion: suggest_hook_id(config, only),
                });
            }

            if !config
                .hooks()
                .any(|(_, hook)| hook.answers_to(only) && hook.effective_stages(config).contains(&options.stage))
            {
                return Err(PlanError::NotInStage {
                    id: only.to_string(),
                    stage: options.stage,
                });
            }
        }

        let global = FileFilter::new(config.files_pattern(), config.exclude_pattern()).map_err(
            |(field, source)| PlanError::InvalidPattern {
                field,
                owner: "config".to_string(),
                source,
            },
        )?;

        let mut hooks = Vec::new();
        let mut skipped = Vec::new();

        for (repo, hook) in config.hooks() {
            if let Some(only) = options.only.as_deref() {
                if !hook.answers_to(only) {
                    continue;
                }
            }

            if !hook.effective_stages(config).contains(&options.stage) {
                tracing::debug!("{}: not bound to {}", hook.id, options.stage);
                continue;
            }

            if options.skip.iter().any(|s| hook.answers_to(s)) {
                tracing::debug!("{}: skipped", hook.id);
                skipped.push(hook.id.clone());
                continue;
            }

            hooks.push(PlannedHook::new(config, repo, hook)?);
        }

        tracing::debug!(
            "Planned {} hook(s) for {}, {} skipped",
            hooks.len(),
            options.stage,
            skipped.len()
        );

        Ok(Self {
            stage: options.stage,
            fail_fast: config.fail_fast,
            hooks,
            skipped,
            global,
        })
    }

    /// Files `hook` would be handed out of `paths`
    pub fn files_for<P: AsRef<Path>>(&self, hook: &PlannedHook, paths: &[P]) -> FileSelection {
        let matched: Vec<String> = paths
            .iter()
            .map(|p| normalize_path(p.as_ref()))
            .filter(|p| self.global.matches(p) && hook.filter.matches(p))
            .collect();

        if matched.is_empty() && !hook.always_run {
            return FileSelection::NoFiles;
        }

        let passed = if hook.pass_filenames {
            matched.clone()
        } else {
            Vec::new()
        };

        FileSelection::Run { matched, passed }
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

/// Closest known id or alias to `key`, if any is close enough
pub fn suggest_hook_id(config: &Config, key: &str) -> Option<String> {
    use strsim::jaro_winkler;

    config
        .hooks()
        .flat_map(|(_, hook)| std::iter::once(hook.id.as_str()).chain(hook.alias.as_deref()))
        .map(|candidate| (candidate, jaro_winkler(key, candidate)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config::sample().expect("sample config")
    }

    fn ids(plan: &HookPlan) -> Vec<&str> {
        plan.hooks.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn plan_follows_declaration_order() {
        let plan = HookPlan::build(&sample(), &PlanOptions::default()).unwrap();
        assert_eq!(
            ids(&plan),
            vec![
                "trailing-whitespace",
                "end-of-file-fixer",
                "check-yaml",
                "check-json",
                "check-added-large-files",
                "detect-private-key",
                "ruff",
                "ruff-format",
                "mypy",
                "pytest",
            ]
        );
        assert!(!plan.fail_fast);
    }

    #[test]
    fn plan_is_deterministic() {
        let config = sample();
        let a = HookPlan::build(&config, &PlanOptions::default()).unwrap();
        let b = HookPlan::build(&config, &PlanOptions::default()).unwrap();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn skip_list_matches_ids() {
        let options = PlanOptions {
            skip: vec!["mypy".to_string(), "pytest".to_string()],
            ..PlanOptions::default()
        };
        let plan = HookPlan::build(&sample(), &options).unwrap();
        assert_eq!(plan.hooks.len(), 8);
        assert_eq!(plan.skipped, vec!["mypy", "pytest"]);
    }

    #[test]
    fn only_selects_a_single_hook() {
        let options = PlanOptions {
            only: Some("ruff-format".to_string()),
            ..PlanOptions::default()
        };
        let plan = HookPlan::build(&sample(), &options).unwrap();
        assert_eq!(ids(&plan), vec!["ruff-format"]);
    }

    #[test]
    fn unknown_only_suggests_close_id() {
        let options = PlanOptions {
            only: Some("check-yml".to_string()),
            ..PlanOptions::default()
        };
        let err = HookPlan::build(&sample(), &options).unwrap_err();
        match err {
            PlanError::UnknownHook { id, suggestion } => {
                assert_eq!(id, "check-yml");
                assert_eq!(suggestion.as_deref(), Some("check-yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stage_filtering_uses_default_stages() {
        let config: Config = r#"
default_stages: [pre-commit]
repos:
  - repo: local
    hooks:
      - {id: lint, name: lint, entry: lint, language: system}
      - {id: push-check, name: push, entry: check, language: system, stages: [push]}
"#
        .parse()
        .unwrap();

        let commit = HookPlan::build(&config, &PlanOptions::default()).unwrap();
        assert_eq!(ids(&commit), vec!["lint"]);

        let push = HookPlan::build(
            &config,
            &PlanOptions {
                stage: Stage::PrePush,
                ..PlanOptions::default()
            },
        )
        .unwrap();
        assert_eq!(ids(&push), vec!["push-check"]);
    }

    #[test]
    fn files_are_filtered_per_hook() {
        let config: Config = r#"
exclude: ^vendor/
repos:
  - repo: https://example.com/hooks
    rev: v1.0.0
    hooks:
      - id: check-json
        files: \.json$
      - id: pytest
        pass_filenames: false
        always_run: true
        files: ^tests/
"#
        .parse()
        .unwrap();
        let plan = HookPlan::build(&config, &PlanOptions::default()).unwrap();
        let paths = ["package.json", "vendor/lib.json", "src/app.py"];

        assert_eq!(
            plan.files_for(&plan.hooks[0], &paths),
            FileSelection::Run {
                matched: vec!["package.json".to_string()],
                passed: vec!["package.json".to_string()],
            }
        );

        // always_run with nothing matched still runs, and gets no file names
        assert_eq!(
            plan.files_for(&plan.hooks[1], &paths),
            FileSelection::Run {
                matched: vec![],
                passed: vec![],
            }
        );
    }

    #[test]
    fn hook_without_matches_does_not_run() {
        let plan = HookPlan::build(&sample(), &PlanOptions::default()).unwrap();
        let check_json = plan.hooks.iter().find(|h| h.id == "check-json").unwrap();
        // No `files` override in the config, so everything matches
        assert!(plan.files_for(check_json, &["README.md"]).runs());
        assert_eq!(
            plan.files_for(check_json, &[] as &[&str]),
            FileSelection::NoFiles
        );
    }

    #[test]
    fn only_hook_outside_stage_is_an_error() {
        let config: Config = r#"
repos:
  - repo: local
    hooks:
      - {id: push-check, name: push, entry: check, language: system, stages: [pre-push]}
"#
        .parse()
        .unwrap();

        let options = PlanOptions {
            only: Some("push-check".to_string()),
            ..PlanOptions::default()
        };
        let err = HookPlan::build(&config, &options).unwrap_err();
        assert!(matches!(err, PlanError::NotInStage { stage: Stage::PreCommit, .. }));
        assert_eq!(err.to_string(), "No hook with id `push-check` in stage `pre-commit`");
    }

    #[test]
    fn skip_list_matches_aliases() {
        let config: Config = r#"
repos:
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.8.4
    hooks:
      - id: ruff
      - id: ruff-format
        alias: fmt
"#
        .parse()
        .unwrap();

        let options = PlanOptions {
            skip: vec!["fmt".to_string()],
            ..PlanOptions::default()
        };
        let plan = HookPlan::build(&config, &options).unwrap();
        assert_eq!(ids(&plan), vec!["ruff"]);
        assert_eq!(plan.skipped, vec!["ruff-format"]);
    }

    #[test]
    fn look_ahead_global_exclude_plans() {
        let config: Config = r#"
exclude: ^(?!src/)
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v5.0.0
    hooks:
      - id: check-yaml
"#
        .parse()
        .unwrap();

        let plan = HookPlan::build(&config, &PlanOptions::default()).unwrap();
        assert_eq!(
            plan.files_for(&plan.hooks[0], &["src/ci.yaml", "docs/mkdocs.yaml"]),
            FileSelection::Run {
                matched: vec!["src/ci.yaml".to_string()],
                passed: vec!["src/ci.yaml".to_string()],
            }
        );
    }

    #[test]
    fn skip_list_parsing() {
        assert_eq!(parse_skip_list("mypy, pytest,,"), vec!["mypy", "pytest"]);
        assert!(parse_skip_list("").is_empty());
    }
}
