//! Repository source entries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::HookSelection;

/// Sentinel `repo` value for hooks defined inline in the consuming repository
pub const LOCAL: &str = "local";

/// Sentinel `repo` value for hooks provided by the runner itself
pub const META: &str = "meta";

/// Hook ids the runner provides under `repo: meta`
pub const META_HOOK_IDS: &[&str] = &["check-hooks-apply", "check-useless-excludes", "identity"];

/// One entry of the top-level `repos` sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Source locator, or one of the `local` / `meta` sentinels
    pub repo: String,

    /// Pinned revision (remote sources only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Hooks selected from this source, in execution order
    pub hooks: Vec<HookSelection>,

    #[serde(flatten)]
    pub unexpected: BTreeMap<String, serde_yaml::Value>,
}

/// Where the hooks of an entry come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoSource<'a> {
    Remote { url: &'a str, rev: Option<&'a str> },
    Local,
    Meta,
}

impl RepoEntry {
    pub fn remote(url: impl Into<String>, rev: impl Into<String>, hooks: Vec<HookSelection>) -> Self {
        Self {
            repo: url.into(),
            rev: Some(rev.into()),
            hooks,
            unexpected: BTreeMap::new(),
        }
    }

    pub fn local(hooks: Vec<HookSelection>) -> Self {
        Self {
            repo: LOCAL.to_string(),
            rev: None,
            hooks,
            unexpected: BTreeMap::new(),
        }
    }

    pub fn source(&self) -> RepoSource<'_> {
        match self.repo.as_str() {
            LOCAL => RepoSource::Local,
            META => RepoSource::Meta,
            url => RepoSource::Remote {
                url,
                rev: self.rev.as_deref(),
            },
        }
    }

    pub fn is_local(&self) -> bool {
        self.repo == LOCAL
    }

    /// Revision to report for this entry (`local` / `meta` have none)
    pub fn display_rev(&self) -> &str {
        match self.source() {
            RepoSource::Remote { rev, .. } => rev.unwrap_or("?"),
            RepoSource::Local | RepoSource::Meta => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_recognised() {
        assert_eq!(RepoEntry::local(vec![]).source(), RepoSource::Local);

        let meta: RepoEntry =
            serde_yaml::from_str("repo: meta\nhooks:\n  - id: identity\n").unwrap();
        assert_eq!(meta.source(), RepoSource::Meta);
        assert_eq!(meta.display_rev(), "-");
    }

    #[test]
    fn remote_entry_exposes_rev() {
        let entry = RepoEntry::remote(
            "https://github.com/pre-commit/pre-commit-hooks",
            "v5.0.0",
            vec![HookSelection::new("check-yaml")],
        );
        assert_eq!(
            entry.source(),
            RepoSource::Remote {
                url: "https://github.com/pre-commit/pre-commit-hooks",
                rev: Some("v5.0.0"),
            }
        );
        assert_eq!(entry.display_rev(), "v5.0.0");
    }

    #[test]
    fn hooks_key_is_required() {
        let result: Result<RepoEntry, _> = serde_yaml::from_str("repo: local\n");
        assert!(result.is_err());
    }
}
