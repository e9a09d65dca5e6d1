//! Validation issue types

use serde::Serialize;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What is wrong
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// `repo` is empty
    EmptyRepo,
    /// Remote source without a usable `rev`
    MissingRev,
    /// `rev` given on a `local` or `meta` entry
    UnexpectedRev { repo: String },
    /// `rev` names a moving ref instead of a tag or commit
    MutableRev { rev: String },
    /// Entry lists no hooks
    NoHooks,
    /// Same `id` appears twice in one entry
    DuplicateHookId,
    /// Hook `id` is empty
    EmptyHookId,
    /// Local hook lacks a required key
    MissingLocalField { field: &'static str },
    /// Id not provided by `repo: meta`
    UnknownMetaHook,
    /// `files` / `exclude` doesn't compile
    InvalidPattern { field: &'static str, message: String },
    /// `minimum_pre_commit_version` isn't a version
    InvalidMinimumVersion { value: String },
    /// Config needs a newer runner than the one checked against
    RunnerTooOld { required: String, runner: String },
    /// `default_install_hook_types` names a stage with no git hook
    UninstallableHookType { stage: String },
    /// Key not part of the schema
    UnexpectedKey { key: String },
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRepo => write!(f, "repo locator is empty"),
            Self::MissingRev => write!(f, "remote repo requires a non-empty rev"),
            Self::UnexpectedRev { repo } => write!(f, "`{}` repos must not set rev", repo),
            Self::MutableRev { rev } => {
                write!(f, "rev `{}` is a moving ref, pin a tag or commit", rev)
            }
            Self::NoHooks => write!(f, "no hooks selected"),
            Self::DuplicateHookId => write!(f, "hook id is listed more than once"),
            Self::EmptyHookId => write!(f, "hook id is empty"),
            Self::MissingLocalField { field } => {
                write!(f, "local hook requires a non-empty `{}`", field)
            }
            Self::UnknownMetaHook => write!(f, "not a meta hook"),
            Self::InvalidPattern { field, message } => {
                write!(f, "invalid `{}` pattern: {}", field, message)
            }
            Self::InvalidMinimumVersion { value } => {
                write!(f, "minimum_pre_commit_version `{}` is not a version", value)
            }
            Self::RunnerTooOld { required, runner } => {
                write!(f, "config requires runner >= {}, have {}", required, runner)
            }
            Self::UninstallableHookType { stage } => {
                write!(f, "`{}` cannot be installed as a git hook", stage)
            }
            Self::UnexpectedKey { key } => write!(f, "unexpected key `{}`", key),
        }
    }
}

/// A single finding, located by entry index and hook id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    /// Index into `repos`, `None` for top-level issues
    pub repo_index: Option<usize>,
    pub hook_id: Option<String>,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl Issue {
    pub fn error(kind: IssueKind) -> Self {
        Self {
            severity: Severity::Error,
            repo_index: None,
            hook_id: None,
            kind,
        }
    }

    pub fn warning(kind: IssueKind) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind)
        }
    }

    pub fn in_repo(mut self, index: usize) -> Self {
        self.repo_index = Some(index);
        self
    }

    pub fn for_hook(mut self, id: &str) -> Self {
        self.hook_id = Some(id.to_string());
        self
    }

    /// Human-readable location, e.g. `repos[2].hooks[mypy]`
    pub fn location(&self) -> String {
        match (self.repo_index, &self.hook_id) {
            (Some(i), Some(id)) => format!("repos[{}].hooks[{}]", i, id),
            (Some(i), None) => format!("repos[{}]", i),
            (None, _) => "config".to_string(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location(), self.kind)
    }
}
