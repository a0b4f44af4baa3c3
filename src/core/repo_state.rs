//! Read-through snapshot of repository status.
//!
//! [`RepositoryState`] is rebuilt from a single `git status --porcelain=v1 -z --branch`
//! call on every rescan and replaced wholesale. A failed rebuild yields an error and the
//! caller keeps its previous snapshot, so there is never a half-updated state.
//!
//! Invariant: every path in `unmerged_files` also appears in `modified_files`.

use crate::core::error::Result;
use crate::core::git::GitRepo;
use crate::core::git_status::{GitStatus, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    pub staged_files: Vec<String>,
    pub modified_files: Vec<String>,
    pub untracked_files: Vec<String>,
    pub unmerged_files: BTreeSet<String>,
    pub current_branch: String,
    #[serde(skip)]
    staged_status: BTreeMap<String, GitStatus>,
    #[serde(skip)]
    unstaged_status: BTreeMap<String, GitStatus>,
}

impl RepositoryState {
    /// Ask git for a fresh snapshot
    pub fn load(repo: &GitRepo) -> Result<Self> {
        let porcelain = repo.status_porcelain()?;
        let state = Self::parse(&porcelain);
        log::debug!(
            "Repository state: {} staged, {} modified, {} untracked, {} unmerged on '{}'",
            state.staged_files.len(),
            state.modified_files.len(),
            state.untracked_files.len(),
            state.unmerged_files.len(),
            state.current_branch
        );
        Ok(state)
    }

    /// Parse NUL-separated porcelain v1 output with a `## branch` header
    pub fn parse(porcelain: &str) -> Self {
        let mut state = RepositoryState::default();
        let mut entries = porcelain.split('\0').filter(|entry| !entry.is_empty());

        while let Some(entry) = entries.next() {
            if let Some(header) = entry.strip_prefix("## ") {
                state.current_branch = parse_branch_header(header);
                continue;
            }
            let Some(code) = StatusCode::parse(entry) else {
                continue;
            };
            if code.has_source_path() {
                // Skip the rename/copy source; the destination is the entry's path.
                entries.next();
            }
            let Some(path) = entry.get(3..).filter(|p| !p.is_empty()) else {
                continue;
            };
            let path = path.to_string();

            if code.is_ignored() {
                continue;
            }
            if code.is_untracked() {
                state.untracked_files.push(path.clone());
                state.unstaged_status.insert(path, GitStatus::Untracked);
                continue;
            }
            if code.is_unmerged() {
                state.modified_files.push(path.clone());
                state.unmerged_files.insert(path.clone());
                state.unstaged_status.insert(path, GitStatus::Unmerged);
                continue;
            }
            if let Some(status) = code.staged() {
                state.staged_files.push(path.clone());
                state.staged_status.insert(path.clone(), status);
            }
            if let Some(status) = code.unstaged() {
                state.modified_files.push(path.clone());
                state.unstaged_status.insert(path, status);
            }
        }

        state
    }

    /// Items of the unstaged list: modified files, then untracked ones when shown
    pub fn unstaged_items(&self, show_untracked: bool) -> Vec<String> {
        let mut items = self.modified_files.clone();
        if show_untracked {
            items.extend(self.untracked_files.iter().cloned());
        }
        items
    }

    pub fn is_untracked(&self, path: &str) -> bool {
        self.untracked_files.iter().any(|p| p == path)
    }

    pub fn is_unmerged(&self, path: &str) -> bool {
        self.unmerged_files.contains(path)
    }

    pub fn is_staged(&self, path: &str) -> bool {
        self.staged_files.iter().any(|p| p == path)
    }

    pub fn status_of(&self, path: &str, staged: bool) -> Option<GitStatus> {
        if staged {
            self.staged_status.get(path).copied()
        } else {
            self.unstaged_status.get(path).copied()
        }
    }

    /// One-line description shown above a file's diff
    pub fn describe(&self, path: &str, staged: bool) -> String {
        if staged {
            return "Staged for commit".to_string();
        }
        match self.status_of(path, false) {
            Some(GitStatus::Untracked) => "Untracked, not staged".to_string(),
            Some(GitStatus::Unmerged) => "Unmerged, not staged".to_string(),
            Some(GitStatus::Deleted) => "Deleted, not staged".to_string(),
            _ => "Modified, not staged".to_string(),
        }
    }
}

fn parse_branch_header(header: &str) -> String {
    let header = header
        .strip_prefix("No commits yet on ")
        .or_else(|| header.strip_prefix("Initial commit on "))
        .unwrap_or(header);
    let local = header.split("...").next().unwrap_or(header);
    local
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
