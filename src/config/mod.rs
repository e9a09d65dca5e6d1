//! Configuration loading and management
//!
//! The configuration is a YAML document with a top-level `repos` sequence.
//! Each entry names a hook source (`repo`), a pinned revision (`rev`) and
//! the hooks to run from it, in order. Two sentinel sources exist: `local`
//! for hooks defined inline and `meta` for hooks provided by the runner.

mod hook;
mod io;
mod repo;
mod stage;

pub use hook::HookSelection;
pub use io::write_atomic;
pub use repo::{LOCAL, META, META_HOOK_IDS, RepoEntry, RepoSource};
pub use stage::Stage;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File names searched for by [`Config::from_dir`], in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".pre-commit-config.yaml", ".pre-commit-config.yml"];

/// The configuration this repository ships with, written by `hookpin init`
pub const SAMPLE_CONFIG: &str = include_str!("../../.pre-commit-config.yaml");

/// Include pattern used when `files` is not set
pub const DEFAULT_FILES: &str = "";

/// Exclude pattern used when `exclude` is not set
pub const DEFAULT_EXCLUDE: &str = "^$";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No {} found in {}", CONFIG_FILE_NAMES[0], .0.display())]
    NotFound(PathBuf),
}

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Hook sources, in execution order
    pub repos: Vec<RepoEntry>,

    /// Stages applied to hooks that don't set `stages`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_stages: Option<Vec<Stage>>,

    /// Hook types installed when none are given explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_install_hook_types: Option<Vec<Stage>>,

    /// Global include pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Global exclude pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Stop after the first failing hook
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fail_fast: bool,

    /// Oldest runner version able to read this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_pre_commit_version: Option<String>,

    #[serde(flatten)]
    pub unexpected: BTreeMap<String, serde_yaml::Value>,
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Config = serde_yaml::from_str(content)?;
        tracing::debug!(
            "Parsed config with {} repos, {} hooks",
            config.repos.len(),
            config.hook_count()
        );
        Ok(config)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        content.parse()
    }

    /// Load configuration from a directory.
    /// Looks for `.pre-commit-config.yaml`, then `.pre-commit-config.yml`.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::locate(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;
        Self::from_file(&path)
    }

    /// Path of the config file inside `dir`, if any
    pub fn locate(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// The configuration this repository ships with
    pub fn sample() -> Result<Self, ConfigError> {
        SAMPLE_CONFIG.parse()
    }

    /// Global include pattern, with the default applied
    pub fn files_pattern(&self) -> &str {
        self.files.as_deref().unwrap_or(DEFAULT_FILES)
    }

    /// Global exclude pattern, with the default applied
    pub fn exclude_pattern(&self) -> &str {
        self.exclude.as_deref().unwrap_or(DEFAULT_EXCLUDE)
    }

    /// Total number of hook selections across all entries
    pub fn hook_count(&self) -> usize {
        self.repos.iter().map(|r| r.hooks.len()).sum()
    }

    /// All hooks in declaration order, paired with their owning entry
    pub fn hooks(&self) -> impl Iterator<Item = (&RepoEntry, &HookSelection)> {
        self.repos
            .iter()
            .flat_map(|repo| repo.hooks.iter().map(move |hook| (repo, hook)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config = Config::sample().unwrap();
        assert_eq!(config.repos.len(), 4);
        assert_eq!(config.hook_count(), 10);
        assert!(config.repos.last().unwrap().is_local());
    }

    #[test]
    fn global_patterns_default() {
        let config: Config = "repos: []".parse().unwrap();
        assert_eq!(config.files_pattern(), "");
        assert_eq!(config.exclude_pattern(), "^$");
        assert!(!config.fail_fast);
    }

    #[test]
    fn repos_key_is_required() {
        let result = "fail_fast: true".parse::<Config>();
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn non_mapping_document_is_rejected() {
        assert!("- repo: local".parse::<Config>().is_err());
        assert!("".parse::<Config>().is_err());
    }

    #[test]
    fn hooks_iterate_in_declaration_order() {
        let config = Config::sample().unwrap();
        let ids: Vec<&str> = config.hooks().map(|(_, h)| h.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"trailing-whitespace"));
        assert_eq!(ids.last(), Some(&"pytest"));
        assert_eq!(ids[6], "ruff");
        assert_eq!(ids[7], "ruff-format");
    }

    #[test]
    fn unexpected_top_level_keys_are_kept() {
        let config: Config = "repos: []\nci:\n  autofix: true\n".parse().unwrap();
        assert!(config.unexpected.contains_key("ci"));
    }
}
