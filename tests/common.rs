//! Shared test utilities for integration tests.
//!
//! Provides helper functions for creating temporary git repositories and
//! catalog files used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Runs git command in repository, failing on non-zero exit.
///
/// # Errors
///
/// Returns error if git cannot be spawned or exits unsuccessfully
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Creates temporary git repository with test configuration.
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    git(path, &["init"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;

    Ok(dir)
}

/// Creates test repository with `origin` pointing at `url`.
///
/// # Errors
///
/// Returns error if repository creation or remote setup fails
pub fn create_repo_with_remote(url: &str) -> Result<TempDir> {
    let dir = create_test_repo()?;
    git(dir.path(), &["remote", "add", "origin", url])?;
    Ok(dir)
}

/// Writes, stages and commits a file, returning the commit hash.
///
/// # Errors
///
/// Returns error if the write, add or commit fails
pub fn commit_file(repo_path: &Path, path: &str, content: &str) -> Result<String> {
    write_file(repo_path, path, content)?;
    git(repo_path, &["add", path])?;
    git(repo_path, &["commit", "-m", &format!("Add {}", path)])?;
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Writes file, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Catalog in the repository listing layout with common hosting patterns.
pub const LISTING: &str = r##"{
    "kernel": {
        "url": "git@github.com:torvalds/linux.git",
        "url-pattern": {
            "base-url": "https:{hostname}/{project}/{repo}/blob/{rev}/{path}{anchor}",
            "anchor": "#L{line}"
        }
    },
    "jira": {
        "url": "ssh://git@bitbucket.example.com:7999/ATLASSIAN/jira.git",
        "url-pattern": {
            "base-url": "https:{hostname}/projects/{project}/repos/{repo}/browse/{path}?at={rev}{anchor}",
            "anchor": "#{line}"
        },
        "vcs-config": { "ref": "master" }
    },
    "docs": {
        "url": "https://github.com/foo/bar.wiki.git",
        "url-pattern": { "base-url": "{url}/{path}{anchor}" }
    },
    "gitlab": {
        "url": "https://gitlab.com/group/sub/tool.git",
        "url-pattern": {
            "base-url": "{url}/-/blob/{rev}/{path}{anchor}",
            "anchor": "#L{line}"
        }
    },
    "mercurial": {
        "url": "ssh://hg@bitbucket.org/user/repo",
        "vcs": "hg",
        "url-pattern": {
            "base-url": "https:{hostname}/{project}/{repo}/src/{rev}/{path}{anchor}",
            "anchor": "#{filename}-{line}"
        }
    }
}"##;
