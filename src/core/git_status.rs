//! Type-safe classification of `git status --porcelain` codes.
//!
//! Porcelain output carries two status letters per path: `X` for the index and `Y`
//! for the working tree. [`GitStatus`] names what one side of that pair means, and
//! [`StatusCode`] holds the raw pair so the unmerged combinations can be recognised.
//!
//! # Public API
//! - [`GitStatus`]: Status of one side (index or working tree) of a path
//! - [`StatusCode`]: The raw `XY` pair as printed by git

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GitStatus {
    /// Modified file (M)
    Modified,
    /// Added/new file in index (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Copied file (C)
    Copied,
    /// Type changed (T)
    TypeChanged,
    /// Untracked file (??)
    Untracked,
    /// Unmerged/conflicted file (UU and friends)
    Unmerged,
}

impl GitStatus {
    /// Status of the index side, `None` when the index matches HEAD
    pub fn from_index_code(code: char) -> Option<GitStatus> {
        match code {
            'M' => Some(GitStatus::Modified),
            'A' => Some(GitStatus::Added),
            'D' => Some(GitStatus::Deleted),
            'R' => Some(GitStatus::Renamed),
            'C' => Some(GitStatus::Copied),
            'T' => Some(GitStatus::TypeChanged),
            _ => None,
        }
    }

    /// Status of the working tree side, `None` when the file matches the index
    pub fn from_worktree_code(code: char) -> Option<GitStatus> {
        match code {
            'M' => Some(GitStatus::Modified),
            'D' => Some(GitStatus::Deleted),
            'T' => Some(GitStatus::TypeChanged),
            // Intent-to-add entries show up as 'A' in the worktree column
            'A' => Some(GitStatus::Added),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GitStatus::Modified => "M",
            GitStatus::Added => "A",
            GitStatus::Deleted => "D",
            GitStatus::Renamed => "R",
            GitStatus::Copied => "C",
            GitStatus::TypeChanged => "T",
            GitStatus::Untracked => "??",
            GitStatus::Unmerged => "UU",
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            GitStatus::Modified => "modified",
            GitStatus::Added => "new",
            GitStatus::Deleted => "deleted",
            GitStatus::Renamed => "renamed",
            GitStatus::Copied => "copied",
            GitStatus::TypeChanged => "type changed",
            GitStatus::Untracked => "untracked",
            GitStatus::Unmerged => "both modified",
        }
    }
}

impl fmt::Display for GitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two status letters git prints in front of each porcelain entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode {
    pub index: char,
    pub worktree: char,
}

impl StatusCode {
    pub fn parse(entry: &str) -> Option<StatusCode> {
        let mut chars = entry.chars();
        let index = chars.next()?;
        let worktree = chars.next()?;
        Some(StatusCode { index, worktree })
    }

    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }

    pub fn is_ignored(&self) -> bool {
        self.index == '!' && self.worktree == '!'
    }

    /// DD, AU, UD, UA, DU, AA and UU mark an unresolved merge
    pub fn is_unmerged(&self) -> bool {
        matches!(
            (self.index, self.worktree),
            ('D', 'D') | ('A', 'U') | ('U', 'D') | ('U', 'A') | ('D', 'U') | ('A', 'A') | ('U', 'U')
        )
    }

    /// Renames and copies are followed by a second NUL-terminated source path
    pub fn has_source_path(&self) -> bool {
        matches!(self.index, 'R' | 'C') || matches!(self.worktree, 'R' | 'C')
    }

    pub fn staged(&self) -> Option<GitStatus> {
        if self.is_untracked() || self.is_ignored() || self.is_unmerged() {
            return None;
        }
        GitStatus::from_index_code(self.index)
    }

    pub fn unstaged(&self) -> Option<GitStatus> {
        if self.is_untracked() {
            return Some(GitStatus::Untracked);
        }
        if self.is_unmerged() {
            return Some(GitStatus::Unmerged);
        }
        if self.is_ignored() {
            return None;
        }
        GitStatus::from_worktree_code(self.worktree)
    }
}
