//! Stagehand - the core of a git staging front-end, driven from the command line.
//!
//! All version-control work is done by the `git` binary. The library keeps a snapshot of
//! repository status, two selectable file lists and a diff pane, and routes every user
//! gesture through a single [`Controller`](core::Controller) that rescans after each
//! change while keeping the user's selection.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - Git boundary and repository snapshot
//! - View modes, menus and gesture dispatch
//! - Hunk and line staging
//! - Change watching
//! - Error handling and result types

pub mod commands;
pub mod core;

pub use core::{
    // Controller and gestures
    Controller,
    Gesture,
    GestureTable,
    // Git boundary
    GitRepo,
    GitStatus,
    GuiSettings,
    RepositoryState,
    Result,
    // Error handling
    StagehandError,
    ViewMode,
};
