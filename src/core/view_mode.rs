//! The diff pane's view mode and the context menus it allows.
//!
//! Exactly one mode is active. The branch-diff context lives inside
//! [`ViewMode::Branch`], so entering any other mode drops it and a branch mode can
//! never exist without a branch and file. Menu construction is a pure function of the
//! mode plus facts about the focused list item.

use crate::core::error::{Result, StagehandError};
use std::fmt;

/// Branch and file picked in the branch-diff flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDiffContext {
    branch: String,
    filename: String,
}

impl BranchDiffContext {
    pub fn new(branch: impl Into<String>, filename: impl Into<String>) -> Result<Self> {
        let branch = branch.into();
        let filename = filename.into();
        if branch.trim().is_empty() || filename.trim().is_empty() {
            return Err(StagehandError::invalid_branch_diff(branch, filename));
        }
        Ok(Self { branch, filename })
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Nothing per-file is displayed; no hunk actions
    #[default]
    None,
    /// Unstaged diff of the focused file: stage or discard hunks
    Worktree,
    /// Staged diff of the focused file: unstage hunks
    Index,
    /// Working tree against another branch: apply hunks to the worktree
    Branch(BranchDiffContext),
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::None => "none",
            ViewMode::Worktree => "worktree",
            ViewMode::Index => "index",
            ViewMode::Branch(_) => "branch",
        }
    }

    pub fn branch_context(&self) -> Option<&BranchDiffContext> {
        match self {
            ViewMode::Branch(context) => Some(context),
            _ => None,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, ViewMode::Branch(_))
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Branch(context) => {
                write!(f, "branch ({} vs {})", context.filename, context.branch)
            }
            other => f.write_str(other.name()),
        }
    }
}

/// Owner of the single current mode; all transitions go through here
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeState {
    mode: ViewMode,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &ViewMode {
        &self.mode
    }

    pub fn enter_worktree(&mut self) {
        self.transition(ViewMode::Worktree);
    }

    pub fn enter_index(&mut self) {
        self.transition(ViewMode::Index);
    }

    pub fn enter_branch(&mut self, context: BranchDiffContext) {
        self.transition(ViewMode::Branch(context));
    }

    pub fn reset(&mut self) {
        self.transition(ViewMode::None);
    }

    /// Drop a branch context; other modes are left alone
    pub fn leave_branch(&mut self) {
        if self.mode.is_branch() {
            self.reset();
        }
    }

    fn transition(&mut self, next: ViewMode) {
        if self.mode != next {
            log::debug!("View mode {} -> {}", self.mode, next);
        }
        self.mode = next;
    }
}

/// Entries offered by the context menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    StageSelected,
    UnstageSelected,
    LaunchEditor,
    LaunchDiffEditor,
    LaunchMergetool,
    UndoAllChanges,
    StageHunk,
    StageSelectedLines,
    UndoHunk,
    UndoSelection,
    UnstageHunk,
    UnstageSelectedLines,
    ApplyDiffToWorktree,
    ApplyDiffSelectionToWorktree,
    Copy,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::StageSelected => "Stage Selected",
            MenuAction::UnstageSelected => "Unstage Selected",
            MenuAction::LaunchEditor => "Launch Editor",
            MenuAction::LaunchDiffEditor => "Launch Diff Editor",
            MenuAction::LaunchMergetool => "Launch Mergetool",
            MenuAction::UndoAllChanges => "Undo All Changes",
            MenuAction::StageHunk => "Stage Hunk For Commit",
            MenuAction::StageSelectedLines => "Stage Selected Lines",
            MenuAction::UndoHunk => "Undo Hunk",
            MenuAction::UndoSelection => "Undo Selection",
            MenuAction::UnstageHunk => "Unstage Hunk From Commit",
            MenuAction::UnstageSelectedLines => "Unstage Selected Lines",
            MenuAction::ApplyDiffToWorktree => "Apply Diff To Work Tree",
            MenuAction::ApplyDiffSelectionToWorktree => "Apply Diff Selection To Work Tree",
            MenuAction::Copy => "Copy",
        }
    }
}

/// What the menus need to know about the focused unstaged item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusFacts {
    pub has_item: bool,
    pub tracked: bool,
    pub unmerged: bool,
}

/// Context menu of the diff pane
pub fn diff_menu(mode: &ViewMode, focus: FocusFacts) -> Vec<MenuAction> {
    let mut menu = Vec::new();
    match mode {
        ViewMode::Worktree => {
            if focus.has_item && focus.tracked && !focus.unmerged {
                menu.extend([
                    MenuAction::StageHunk,
                    MenuAction::StageSelectedLines,
                    MenuAction::UndoHunk,
                    MenuAction::UndoSelection,
                ]);
            }
        }
        ViewMode::Index => {
            menu.extend([MenuAction::UnstageHunk, MenuAction::UnstageSelectedLines]);
        }
        ViewMode::Branch(_) => {
            menu.extend([
                MenuAction::ApplyDiffToWorktree,
                MenuAction::ApplyDiffSelectionToWorktree,
            ]);
        }
        ViewMode::None => {}
    }
    menu.push(MenuAction::Copy);
    menu
}

/// Context menu of the unstaged list
pub fn unstaged_menu(mode: &ViewMode, focus: FocusFacts) -> Vec<MenuAction> {
    let enable_staging = *mode == ViewMode::Worktree;
    let mut menu = Vec::new();
    if enable_staging {
        menu.push(MenuAction::StageSelected);
    }
    if focus.has_item && focus.unmerged {
        menu.push(MenuAction::LaunchMergetool);
    }
    menu.push(MenuAction::LaunchEditor);
    if enable_staging {
        menu.push(MenuAction::LaunchDiffEditor);
    }
    if enable_staging && focus.has_item && focus.tracked {
        menu.push(MenuAction::UndoAllChanges);
    }
    menu
}

/// Context menu of the staged list
pub fn staged_menu() -> Vec<MenuAction> {
    vec![
        MenuAction::UnstageSelected,
        MenuAction::LaunchEditor,
        MenuAction::LaunchDiffEditor,
    ]
}
