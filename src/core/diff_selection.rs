//! Turn a selection in the diff pane into exactly one `git apply`.
//!
//! A [`DiffSelectionRequest`] is resolved from the current view mode, so an
//! operation that makes no sense in that mode never produces a request. Executing a
//! request parses the displayed diff, builds the patch for the requested scope and
//! pipes it to a single `git apply` invocation.

use crate::core::diff_parser::{PatchScope, UnifiedDiff};
use crate::core::error::Result;
use crate::core::git::{CommandOutput, GitRepo};
use crate::core::view_mode::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOperation {
    Stage,
    Unstage,
    /// Discard working tree changes
    Undo,
    /// Apply a branch diff to the working tree
    Apply,
}

impl DiffOperation {
    pub fn verb(&self) -> &'static str {
        match self {
            DiffOperation::Stage => "stage",
            DiffOperation::Unstage => "unstage",
            DiffOperation::Undo => "undo",
            DiffOperation::Apply => "apply",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSelectionRequest {
    pub target_file: String,
    /// The displayed diff is the index diff
    pub cached: bool,
    pub reverse: bool,
    /// Patch the working tree instead of the index
    pub apply_to_worktree: bool,
    pub scope: PatchScope,
}

impl DiffSelectionRequest {
    /// Resolve `operation` against `mode`, or `None` when the mode does not allow it
    pub fn resolve(
        operation: DiffOperation,
        mode: &ViewMode,
        unstaged_focus: Option<&str>,
        staged_focus: Option<&str>,
        scope: PatchScope,
    ) -> Option<Self> {
        let (target, cached, reverse, apply_to_worktree) = match (mode, operation) {
            (ViewMode::Worktree, DiffOperation::Stage) => (unstaged_focus?, false, false, false),
            (ViewMode::Worktree, DiffOperation::Undo) => (unstaged_focus?, false, true, true),
            (ViewMode::Index, DiffOperation::Unstage) => (staged_focus?, true, true, false),
            (ViewMode::Branch(context), DiffOperation::Stage | DiffOperation::Apply) => {
                (context.filename(), false, false, true)
            }
            _ => return None,
        };
        Some(Self {
            target_file: target.to_string(),
            cached,
            reverse,
            apply_to_worktree,
            scope,
        })
    }

    /// Reverse application to the working tree throws changes away
    pub fn is_destructive(&self) -> bool {
        self.reverse && self.apply_to_worktree
    }

    /// Build the patch from `diff_text` and run it; `Ok(None)` when nothing was selected
    pub fn execute(&self, repo: &GitRepo, diff_text: &str) -> Result<Option<CommandOutput>> {
        let diff = UnifiedDiff::parse(diff_text)?;
        let Some(patch) = diff.patch(self.scope, self.reverse)? else {
            log::debug!("No changes selected in {}", self.target_file);
            return Ok(None);
        };
        log::debug!(
            "Applying {:?} patch to {} (cached={}, reverse={}, worktree={})",
            self.scope,
            self.target_file,
            self.cached,
            self.reverse,
            self.apply_to_worktree
        );
        repo.apply_patch(&patch, !self.apply_to_worktree, self.reverse)
            .map(Some)
    }
}
