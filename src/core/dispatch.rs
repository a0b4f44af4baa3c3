//! Gesture dispatch.
//!
//! Every gesture without arguments maps to one handler in a table built once at
//! startup. Gestures that carry data (a branch name, a path, a commit message) call the
//! controller directly.

use crate::core::controller::Controller;
use crate::core::view_mode::MenuAction;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Rescan,
    StageSelected,
    UnstageSelected,
    UndoChanges,
    StageModified,
    StageUntracked,
    UnstageAll,
    ToggleUntracked,
    ViewUnstagedDiff,
    ViewStagedDiff,
    ShowDiffstat,
    ShowIndex,
    StageHunk,
    StageSelectedLines,
    UnstageHunk,
    UnstageSelectedLines,
    UndoHunk,
    UndoSelection,
    ApplyDiffToWorktree,
    ApplyDiffSelectionToWorktree,
    Commit,
    AddSignoff,
    LoadPreviousCommitMessage,
    AbortMerge,
    LaunchEditor,
    LaunchDiffEditor,
    LaunchMergetool,
    Visualize,
    VisualizeAll,
    Copy,
    Quit,
}

impl Gesture {
    pub const ALL: [Gesture; 31] = [
        Gesture::Rescan,
        Gesture::StageSelected,
        Gesture::UnstageSelected,
        Gesture::UndoChanges,
        Gesture::StageModified,
        Gesture::StageUntracked,
        Gesture::UnstageAll,
        Gesture::ToggleUntracked,
        Gesture::ViewUnstagedDiff,
        Gesture::ViewStagedDiff,
        Gesture::ShowDiffstat,
        Gesture::ShowIndex,
        Gesture::StageHunk,
        Gesture::StageSelectedLines,
        Gesture::UnstageHunk,
        Gesture::UnstageSelectedLines,
        Gesture::UndoHunk,
        Gesture::UndoSelection,
        Gesture::ApplyDiffToWorktree,
        Gesture::ApplyDiffSelectionToWorktree,
        Gesture::Commit,
        Gesture::AddSignoff,
        Gesture::LoadPreviousCommitMessage,
        Gesture::AbortMerge,
        Gesture::LaunchEditor,
        Gesture::LaunchDiffEditor,
        Gesture::LaunchMergetool,
        Gesture::Visualize,
        Gesture::VisualizeAll,
        Gesture::Copy,
        Gesture::Quit,
    ];
}

impl From<MenuAction> for Gesture {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::StageSelected => Gesture::StageSelected,
            MenuAction::UnstageSelected => Gesture::UnstageSelected,
            MenuAction::LaunchEditor => Gesture::LaunchEditor,
            MenuAction::LaunchDiffEditor => Gesture::LaunchDiffEditor,
            MenuAction::LaunchMergetool => Gesture::LaunchMergetool,
            MenuAction::UndoAllChanges => Gesture::UndoChanges,
            MenuAction::StageHunk => Gesture::StageHunk,
            MenuAction::StageSelectedLines => Gesture::StageSelectedLines,
            MenuAction::UndoHunk => Gesture::UndoHunk,
            MenuAction::UndoSelection => Gesture::UndoSelection,
            MenuAction::UnstageHunk => Gesture::UnstageHunk,
            MenuAction::UnstageSelectedLines => Gesture::UnstageSelectedLines,
            MenuAction::ApplyDiffToWorktree => Gesture::ApplyDiffToWorktree,
            MenuAction::ApplyDiffSelectionToWorktree => Gesture::ApplyDiffSelectionToWorktree,
            MenuAction::Copy => Gesture::Copy,
        }
    }
}

pub type Handler = fn(&mut Controller);

/// Editor launches target the staged list only when it alone has focus
fn staged_has_focus(controller: &Controller) -> bool {
    controller.unstaged().focused_item().is_none() && controller.staged().focused_item().is_some()
}

pub struct GestureTable {
    handlers: HashMap<Gesture, Handler>,
}

impl GestureTable {
    pub fn new() -> Self {
        let entries: [(Gesture, Handler); 31] = [
            (Gesture::Rescan, |c| c.rescan()),
            (Gesture::StageSelected, |c| c.stage_selected()),
            (Gesture::UnstageSelected, |c| c.unstage_selected()),
            (Gesture::UndoChanges, |c| c.undo_changes()),
            (Gesture::StageModified, |c| c.stage_modified()),
            (Gesture::StageUntracked, |c| c.stage_untracked()),
            (Gesture::UnstageAll, |c| c.unstage_all()),
            (Gesture::ToggleUntracked, |c| c.toggle_untracked()),
            (Gesture::ViewUnstagedDiff, |c| c.view_diff(false)),
            (Gesture::ViewStagedDiff, |c| c.view_diff(true)),
            (Gesture::ShowDiffstat, |c| c.show_diffstat()),
            (Gesture::ShowIndex, |c| c.show_index()),
            (Gesture::StageHunk, |c| c.stage_hunk()),
            (Gesture::StageSelectedLines, |c| c.stage_selected_lines()),
            (Gesture::UnstageHunk, |c| c.unstage_hunk()),
            (Gesture::UnstageSelectedLines, |c| c.unstage_selected_lines()),
            (Gesture::UndoHunk, |c| c.undo_hunk()),
            (Gesture::UndoSelection, |c| c.undo_selection()),
            (Gesture::ApplyDiffToWorktree, |c| c.apply_diff_to_worktree()),
            (Gesture::ApplyDiffSelectionToWorktree, |c| {
                c.apply_diff_selection_to_worktree()
            }),
            (Gesture::Commit, |c| c.commit()),
            (Gesture::AddSignoff, |c| c.add_signoff()),
            (Gesture::LoadPreviousCommitMessage, |c| {
                c.load_previous_commit_message()
            }),
            (Gesture::AbortMerge, |c| c.abort_merge()),
            (Gesture::LaunchEditor, |c| {
                let staged = staged_has_focus(c);
                c.launch_editor(staged)
            }),
            (Gesture::LaunchDiffEditor, |c| {
                let staged = staged_has_focus(c);
                c.launch_diff_editor(staged)
            }),
            (Gesture::LaunchMergetool, |c| c.launch_mergetool()),
            (Gesture::Visualize, |c| c.visualize(false)),
            (Gesture::VisualizeAll, |c| c.visualize(true)),
            // Clipboard access belongs to the front-end
            (Gesture::Copy, |_| {}),
            (Gesture::Quit, |c| c.quit()),
        ];
        Self {
            handlers: entries.into_iter().collect(),
        }
    }

    pub fn handler(&self, gesture: Gesture) -> Option<Handler> {
        self.handlers.get(&gesture).copied()
    }

    /// Run the handler for `gesture`; false when none is registered
    pub fn dispatch(&self, gesture: Gesture, controller: &mut Controller) -> bool {
        log::debug!("Gesture {:?} in {} mode", gesture, controller.mode());
        match self.handler(gesture) {
            Some(handler) => {
                handler(controller);
                true
            }
            None => false,
        }
    }
}

impl Default for GestureTable {
    fn default() -> Self {
        Self::new()
    }
}
