//! Git hook stages a hook can be bound to

use serde::{Deserialize, Serialize};

/// A git hook stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[serde(alias = "commit")]
    PreCommit,
    #[serde(alias = "merge-commit")]
    PreMergeCommit,
    #[serde(alias = "push")]
    PrePush,
    PrepareCommitMsg,
    CommitMsg,
    PostCheckout,
    PostCommit,
    PostMerge,
    PostRewrite,
    PreRebase,
    Manual,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::PreCommit,
        Stage::PreMergeCommit,
        Stage::PrePush,
        Stage::PrepareCommitMsg,
        Stage::CommitMsg,
        Stage::PostCheckout,
        Stage::PostCommit,
        Stage::PostMerge,
        Stage::PostRewrite,
        Stage::PreRebase,
        Stage::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreCommit => "pre-commit",
            Stage::PreMergeCommit => "pre-merge-commit",
            Stage::PrePush => "pre-push",
            Stage::PrepareCommitMsg => "prepare-commit-msg",
            Stage::CommitMsg => "commit-msg",
            Stage::PostCheckout => "post-checkout",
            Stage::PostCommit => "post-commit",
            Stage::PostMerge => "post-merge",
            Stage::PostRewrite => "post-rewrite",
            Stage::PreRebase => "pre-rebase",
            Stage::Manual => "manual",
        }
    }
}

impl Stage {
    /// Whether a git hook script can be installed for this stage.
    /// `manual` hooks only run when asked for explicitly.
    pub fn is_installable(&self) -> bool {
        *self != Stage::Manual
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit" => return Ok(Stage::PreCommit),
            "merge-commit" => return Ok(Stage::PreMergeCommit),
            "push" => return Ok(Stage::PrePush),
            _ => {}
        }

        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("Unknown stage: {}", s))
    }
}
