//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`StagehandError`], the error type shared by every stagehand
//! component. It uses `thiserror` for the definitions and carries a handful of
//! constructors for the failure modes raised in more than one place.
//!
//! # Public API
//! - [`StagehandError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, StagehandError>`
//!
//! # Error Categories
//! - **Repository**: not a git repository, git2 discovery errors
//! - **Subprocess**: git exited non-zero, external program could not be spawned
//! - **Watcher**: the filesystem watcher could not be started
//! - **Diff selection**: no hunk under the cursor, invalid branch diff context
//! - **User input**: row selections typed on the command line, gestures that logged errors
//! - **Settings**: configuration directory, JSON (de)serialization

use crate::core::git::CommandOutput;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for stagehand
#[derive(Error, Debug)]
pub enum StagehandError {
    // Repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    Git2(#[from] git2::Error),

    #[error("Repository has no working directory")]
    BareRepository,

    // Subprocess errors
    #[error("{command} failed: {}", .output.combined())]
    GitFailed {
        command: String,
        output: CommandOutput,
    },

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    // Diff selection errors
    #[error("Branch diff needs both a branch and a file (got branch '{branch}', file '{filename}')")]
    InvalidBranchDiff { branch: String, filename: String },

    #[error("No hunk at diff line {line}")]
    NoHunkAtLine { line: usize },

    #[error("Diff text contains no file header")]
    MissingDiffHeader,

    // Row selection errors (command line)
    #[error("Invalid row selection: '{input}'. Use format like: 1, 1-3, or 1,3,5")]
    InvalidRowFormat { input: String },

    #[error("Row {row} is out of range (1-{max} available)")]
    RowOutOfRange { row: usize, max: usize },

    #[error("{count} operation(s) reported errors")]
    GestureFailed { count: usize },

    // Settings errors
    #[error("Could not find configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read settings file '{path}': {source}")]
    SettingsReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using StagehandError
pub type Result<T> = std::result::Result<T, StagehandError>;

impl StagehandError {
    /// Create a git failure carrying the full command output
    pub fn git_failed(command: impl Into<String>, output: CommandOutput) -> Self {
        Self::GitFailed {
            command: command.into(),
            output,
        }
    }

    /// Create a spawn failure for an external program
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create an invalid branch diff error
    pub fn invalid_branch_diff(branch: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::InvalidBranchDiff {
            branch: branch.into(),
            filename: filename.into(),
        }
    }

    /// Create an invalid row format error
    pub fn invalid_row_format(input: impl Into<String>) -> Self {
        Self::InvalidRowFormat {
            input: input.into(),
        }
    }

    /// Create a row out of range error
    pub fn row_out_of_range(row: usize, max: usize) -> Self {
        Self::RowOutOfRange { row, max }
    }

    /// Create a settings read failure
    pub fn settings_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SettingsReadFailed {
            path: path.into(),
            source,
        }
    }
}
