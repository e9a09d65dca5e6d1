//! Structural checks on the .pre-commit-config.yaml this repository ships

mod common;

use std::collections::HashSet;

use hookpin::{Config, RepoSource, ValidateOptions, validate};

fn shipped() -> Config {
    Config::from_file(&common::shipped_config_path()).expect("shipped config parses")
}

#[test]
fn shipped_config_matches_bundled_sample() {
    assert_eq!(shipped(), Config::sample().expect("sample"));
}

#[test]
fn shipped_config_has_no_issues() {
    let report = validate(&shipped(), &ValidateOptions::default());
    assert!(report.issues.is_empty(), "issues: {:?}", report.issues);
}

#[test]
fn hook_ids_unique_within_each_entry() {
    for repo in &shipped().repos {
        let mut seen = HashSet::new();
        for hook in &repo.hooks {
            assert!(seen.insert(&hook.id), "duplicate {} in {}", hook.id, repo.repo);
        }
    }
}

#[test]
fn remote_entries_are_pinned() {
    for repo in &shipped().repos {
        if let RepoSource::Remote { url, rev } = repo.source() {
            let rev = rev.unwrap_or_default();
            assert!(!rev.trim().is_empty(), "{} has no rev", url);
        }
    }
}

#[test]
fn local_hooks_have_entries() {
    let config = shipped();
    let local: Vec<_> = config.repos.iter().filter(|r| r.is_local()).collect();
    assert_eq!(local.len(), 1);

    for hook in &local[0].hooks {
        let entry = hook.entry.as_deref().unwrap_or_default();
        assert!(!entry.trim().is_empty(), "{} has no entry", hook.id);
    }
}

#[test]
fn expected_checks_are_present() {
    let config = shipped();
    let ids: Vec<&str> = config.hooks().map(|(_, h)| h.id.as_str()).collect();
    for expected in [
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
    ] {
        assert!(ids.contains(&expected), "missing {}", expected);
    }
}
