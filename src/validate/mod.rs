//! Structural validation of a loaded configuration
//!
//! Parsing only guarantees the document has the right shape. The checks here
//! cover what the runner would reject (or silently misbehave on) later:
//! duplicate ids, missing revision pins, incomplete local hooks, unknown meta
//! hooks, broken patterns and version requirements.

mod issue;

pub use issue::{Issue, IssueKind, Severity};

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use serde::Serialize;

use crate::config::{Config, HookSelection, META_HOOK_IDS, RepoEntry, RepoSource};

/// Refs that move, so pinning to them defeats the point of `rev`
static MUTABLE_REV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(HEAD|main|master|trunk|develop|origin/.+)$").expect("valid regex")
});

/// Options for [`validate`]
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Runner version to check `minimum_pre_commit_version` against
    pub runner_version: Option<Version>,
}

/// All issues found in one configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// True when there are no errors (warnings are allowed)
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }
}

/// Check a configuration against the structural contract
pub fn validate(config: &Config, options: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::default();

    for key in config.unexpected.keys() {
        report.push(Issue::warning(IssueKind::UnexpectedKey { key: key.clone() }));
    }

    check_pattern(&mut report, "files", config.files.as_deref(), None, None);
    check_pattern(&mut report, "exclude", config.exclude.as_deref(), None, None);
    check_minimum_version(&mut report, config, options);

    for stage in config.default_install_hook_types.iter().flatten() {
        if !stage.is_installable() {
            report.push(Issue::error(IssueKind::UninstallableHookType {
                stage: stage.to_string(),
            }));
        }
    }

    for (index, repo) in config.repos.iter().enumerate() {
        check_repo(&mut report, index, repo);
    }

    for issue in report.issues.iter() {
        tracing::debug!("{}", issue);
    }

    report
}

fn check_repo(report: &mut ValidationReport, index: usize, repo: &RepoEntry) {
    for key in repo.unexpected.keys() {
        report.push(Issue::warning(IssueKind::UnexpectedKey { key: key.clone() }).in_repo(index));
    }

    if repo.repo.trim().is_empty() {
        report.push(Issue::error(IssueKind::EmptyRepo).in_repo(index));
    }

    match repo.source() {
        RepoSource::Remote { rev, .. } => match rev.map(str::trim) {
            None | Some("") => report.push(Issue::error(IssueKind::MissingRev).in_repo(index)),
            Some(rev) if MUTABLE_REV.is_match(rev) => report.push(
                Issue::warning(IssueKind::MutableRev {
                    rev: rev.to_string(),
                })
                .in_repo(index),
            ),
            Some(_) => {}
        },
        RepoSource::Local | RepoSource::Meta => {
            if repo.rev.is_some() {
                report.push(
                    Issue::error(IssueKind::UnexpectedRev {
                        repo: repo.repo.clone(),
                    })
                    .in_repo(index),
                );
            }
        }
    }

    if repo.hooks.is_empty() {
        report.push(Issue::warning(IssueKind::NoHooks).in_repo(index));
    }

    let mut seen = HashSet::new();
    for hook in &repo.hooks {
        if hook.id.trim().is_empty() {
            report.push(Issue::error(IssueKind::EmptyHookId).in_repo(index));
            continue;
        }

        // Report each duplicated id once
        if !seen.insert(hook.id.as_str()) {
            if !report.issues.iter().any(|i| {
                i.kind == IssueKind::DuplicateHookId
                    && i.repo_index == Some(index)
                    && i.hook_id.as_deref() == Some(hook.id.as_str())
            }) {
                report.push(
                    Issue::error(IssueKind::DuplicateHookId)
                        .in_repo(index)
                        .for_hook(&hook.id),
                );
            }
        }

        check_hook(report, index, repo, hook);
    }
}

fn check_hook(report: &mut ValidationReport, index: usize, repo: &RepoEntry, hook: &HookSelection) {
    for key in hook.unexpected.keys() {
        report.push(
            Issue::warning(IssueKind::UnexpectedKey { key: key.clone() })
                .in_repo(index)
                .for_hook(&hook.id),
        );
    }

    match repo.source() {
        RepoSource::Local => {
            let required = [
                ("entry", &hook.entry),
                ("name", &hook.name),
                ("language", &hook.language),
            ];
            for (field, value) in required {
                if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                    report.push(
                        Issue::error(IssueKind::MissingLocalField { field })
                            .in_repo(index)
                            .for_hook(&hook.id),
                    );
                }
            }
        }
        RepoSource::Meta => {
            if !META_HOOK_IDS.contains(&hook.id.as_str()) {
                report.push(
                    Issue::error(IssueKind::UnknownMetaHook)
                        .in_repo(index)
                        .for_hook(&hook.id),
                );
            }
        }
        RepoSource::Remote { .. } => {}
    }

    check_pattern(report, "files", hook.files.as_deref(), Some(index), Some(&hook.id));
    check_pattern(report, "exclude", hook.exclude.as_deref(), Some(index), Some(&hook.id));
}

fn check_pattern(
    report: &mut ValidationReport,
    field: &'static str,
    pattern: Option<&str>,
    repo_index: Option<usize>,
    hook_id: Option<&str>,
) {
    let Some(pattern) = pattern else {
        return;
    };

    if let Err(e) = fancy_regex::Regex::new(pattern) {
        let mut issue = Issue::error(IssueKind::InvalidPattern {
            field,
            message: e.to_string(),
        });
        issue.repo_index = repo_index;
        issue.hook_id = hook_id.map(str::to_string);
        report.push(issue);
    }
}

fn check_minimum_version(report: &mut ValidationReport, config: &Config, options: &ValidateOptions) {
    let Some(raw) = config.minimum_pre_commit_version.as_deref() else {
        return;
    };

    let Some(required) = parse_version_lenient(raw) else {
        report.push(Issue::error(IssueKind::InvalidMinimumVersion {
            value: raw.to_string(),
        }));
        return;
    };

    if let Some(runner) = &options.runner_version {
        if *runner < required {
            report.push(Issue::error(IssueKind::RunnerTooOld {
                required: required.to_string(),
                runner: runner.to_string(),
            }));
        }
    }
}

/// Parse a version that may omit minor/patch components (`"3"`, `"2.9"`)
pub fn parse_version_lenient(raw: &str) -> Option<Version> {
    let raw = raw.trim().trim_start_matches('v');
    if let Ok(version) = Version::parse(raw) {
        return Some(version);
    }

    let parts: Vec<&str> = raw.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part.parse().ok()?;
    }

    Some(Version::new(numbers[0], numbers[1], numbers[2]))
}
