//! Include/exclude file filters

use std::path::Path;

use fancy_regex::Regex;
use serde::Serialize;

/// Compiled `files` / `exclude` pair.
///
/// Both are regular expressions searched anywhere in the path, so `\.py$`
/// matches by suffix and `^docs/` by prefix. Look-around and backreferences
/// are allowed (`^(?!src/)`), matching what the runner accepts.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Regex,
    exclude: Regex,
}

impl FileFilter {
    pub fn new(include: &str, exclude: &str) -> Result<Self, (&'static str, fancy_regex::Error)> {
        Ok(Self {
            include: Regex::new(include).map_err(|e| ("files", e))?,
            exclude: Regex::new(exclude).map_err(|e| ("exclude", e))?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        search(&self.include, path) && !search(&self.exclude, path)
    }

    pub fn include_pattern(&self) -> &str {
        self.include.as_str()
    }

    pub fn exclude_pattern(&self) -> &str {
        self.exclude.as_str()
    }
}

/// Backtracking can hit its limit at match time; treat that as no match
fn search(re: &Regex, path: &str) -> bool {
    re.is_match(path).unwrap_or_else(|e| {
        tracing::debug!("Pattern `{}` failed on {}: {}", re.as_str(), path, e);
        false
    })
}

/// Repository-relative path with `/` separators
pub fn normalize_path(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    raw.strip_prefix("./").unwrap_or(&raw).to_string()
}

/// Which files a hook would be handed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileSelection {
    /// Hook runs. `passed` is empty when it doesn't take file names
    Run {
        matched: Vec<String>,
        passed: Vec<String>,
    },
    /// Nothing matched and the hook doesn't always run
    NoFiles,
}

impl FileSelection {
    pub fn runs(&self) -> bool {
        matches!(self, FileSelection::Run { .. })
    }
}
