//! Hook selection records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Config, Stage};

/// One hook selected from a repository entry, with optional overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookSelection {
    /// Identifier of the hook in its defining source
    pub id: String,

    /// Alternate id that can be used with `--hook` and `SKIP`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Command to run (required for local hooks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Language / runtime used to install and run the hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,

    /// Extra arguments appended to the entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Include pattern (regex, searched anywhere in the path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Exclude pattern (regex, searched anywhere in the path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types_or: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_types: Vec<String>,

    /// Stages this hook runs in (falls back to `default_stages`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_dependencies: Vec<String>,

    /// Pass matched file names as arguments (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_filenames: Option<bool>,

    /// Run even when no files match (default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_run: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_serial: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keys this version does not know about
    #[serde(flatten)]
    pub unexpected: BTreeMap<String, serde_yaml::Value>,
}

impl HookSelection {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Name shown in output: the `name` override, or the id
    pub fn effective_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }

    /// Stages this hook is bound to, after applying `default_stages`.
    /// A hook with neither runs in every stage.
    pub fn effective_stages(&self, config: &Config) -> Vec<Stage> {
        self.stages
            .clone()
            .or_else(|| config.default_stages.clone())
            .unwrap_or_else(|| Stage::ALL.to_vec())
    }

    /// Whether `key` names this hook by id or alias
    pub fn answers_to(&self, key: &str) -> bool {
        self.id == key || self.alias.as_deref() == Some(key)
    }

    pub fn passes_filenames(&self) -> bool {
        self.pass_filenames.unwrap_or(true)
    }

    pub fn runs_always(&self) -> bool {
        self.always_run.unwrap_or(false)
    }
}
