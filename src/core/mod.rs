//! Core of the stagehand front-end.
//!
//! This module holds everything below the CLI: the git subprocess boundary, the
//! repository snapshot, list and diff-pane models, the view-mode state machine, patch
//! construction, the refresh controller and the change watcher.

pub mod colors;
pub mod controller;
pub mod diff_parser;
pub mod diff_selection;
pub mod dirs;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod git_status;
pub mod launch;
pub mod log_sink;
pub mod output;
pub mod repo_state;
pub mod rows;
pub mod selection;
pub mod settings;
#[cfg(test)]
pub(crate) mod testing;
pub mod tmpfiles;
pub mod view_mode;
pub mod watcher;

// === Error handling ===
pub use error::{Result, StagehandError};

// === Git boundary ===
pub use git::{
    CommandOutput, CommitSummary, GitInvocation, GitRepo, GitRunner, RepoPaths, SearchKind, SystemGit,
};
pub use git_status::GitStatus;

// === Models ===
pub use repo_state::RepositoryState;
pub use selection::{DiffPane, ListView, SelectionSnapshot};
pub use view_mode::{BranchDiffContext, MenuAction, ModeState, ViewMode};

// === Diff selection ===
pub use diff_parser::{PatchScope, UnifiedDiff};
pub use diff_selection::{DiffOperation, DiffSelectionRequest};

// === Controller and event flow ===
pub use controller::{AlwaysAnswer, Confirm, Controller};
pub use dispatch::{Gesture, GestureTable};
pub use log_sink::{CommandLog, LogEntry, LogLevel};
pub use watcher::{channel, EventLoop, Notifier, RepoWatcher};

// === Settings and helpers ===
pub use launch::{SystemLauncher, ToolLauncher};
pub use rows::parse_rows;
pub use settings::GuiSettings;
pub use tmpfiles::TempFiles;

// === Output formatting ===
pub use output::{
    print_block, print_error, print_error_with_structured_usage, print_info, print_log_entries,
    print_numbered_diff, print_section_header, print_success,
};
