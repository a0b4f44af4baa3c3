//! Hunk and line gestures on the diff pane, plus the branch-diff flow.
//!
//! Line numbers are the one-based numbers printed in the gutter by `stagehand diff`
//! and `stagehand branch-diff`. `--line` alone targets the hunk under that line;
//! `--line` with `--to` targets exactly the changed lines in that range.

use crate::commands::session::{dispatch, open_controller, report, run_gesture};
use crate::commands::status::print_status;
use crate::core::{
    controller::Controller,
    error::{Result, StagehandError},
    parse_rows, print_numbered_diff, print_section_header, Gesture,
};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HunkAction {
    /// Stage from the unstaged diff
    Stage,
    /// Unstage from the staged diff
    Unstage,
    /// Discard from the unstaged diff
    Undo,
}

impl HunkAction {
    /// The hunk gesture, or the selected-lines gesture when `lines` is set
    fn gesture(self, lines: bool) -> Gesture {
        match (self, lines) {
            (HunkAction::Stage, false) => Gesture::StageHunk,
            (HunkAction::Stage, true) => Gesture::StageSelectedLines,
            (HunkAction::Unstage, false) => Gesture::UnstageHunk,
            (HunkAction::Unstage, true) => Gesture::UnstageSelectedLines,
            (HunkAction::Undo, false) => Gesture::UndoHunk,
            (HunkAction::Undo, true) => Gesture::UndoSelection,
        }
    }
}

fn check_line(line: usize, available: usize) -> Result<usize> {
    if line == 0 || line > available {
        return Err(StagehandError::row_out_of_range(line, available));
    }
    Ok(line - 1)
}

/// Put the cursor on `line` or select `line..=to` in the displayed diff
fn place(controller: &mut Controller, line: usize, to: Option<usize>) -> Result<()> {
    let available = controller.diff().line_count();
    let start = check_line(line, available)?;
    match to {
        Some(to) => {
            let end = check_line(to, available)?;
            controller.diff_mut().select_lines(start, end);
        }
        None => controller.diff_mut().place_cursor(start),
    }
    Ok(())
}

pub fn execute_hunk(
    action: HunkAction,
    row: String,
    line: usize,
    to: Option<usize>,
    yes: bool,
) -> Result<()> {
    let mut controller = open_controller(yes)?;
    let staged = action == HunkAction::Unstage;
    let available = if staged {
        controller.staged().len()
    } else {
        controller.unstaged().len()
    };
    let Some(&first) = parse_rows(&[row], available)?.first() else {
        return Err(StagehandError::row_out_of_range(0, available));
    };
    if staged {
        controller.click_staged(first);
    } else {
        controller.click_unstaged(first);
    }
    place(&mut controller, line, to)?;

    dispatch(&mut controller, action.gesture(to.is_some()))?;
    print_status(&controller);
    Ok(())
}

/// List files differing from `branch`, show one file's diff, or open it in the diff editor
pub fn execute_branch_diff(branch: String, file: Option<String>, edit: bool) -> Result<()> {
    let mut controller = open_controller(false)?;
    let Some(file) = file else {
        let files = controller.branch_files(&branch);
        report(&mut controller)?;
        print_section_header(&format!("Files differing from {branch}"));
        for (index, path) in files.iter().enumerate() {
            println!("   [{}] {}", index + 1, path);
        }
        return Ok(());
    };

    if edit {
        controller.diffedit_branch(&branch, &file);
        return report(&mut controller);
    }
    controller.diff_branch(&branch, &file);
    report(&mut controller)?;
    print_numbered_diff(controller.diff().info(), controller.diff().text());
    Ok(())
}

/// Apply part or all of the branch diff of `file` to the working tree
pub fn execute_branch_apply(
    branch: String,
    file: String,
    line: Option<usize>,
    to: Option<usize>,
) -> Result<()> {
    let mut controller = open_controller(false)?;
    controller.diff_branch(&branch, &file);
    report(&mut controller)?;

    match line {
        Some(line) => {
            place(&mut controller, line, to)?;
            let gesture = if to.is_some() {
                Gesture::ApplyDiffSelectionToWorktree
            } else {
                Gesture::ApplyDiffToWorktree
            };
            dispatch(&mut controller, gesture)?;
        }
        None => run_gesture(&mut controller, |c| c.apply_whole_diff_to_worktree())?,
    }
    print_status(&controller);
    Ok(())
}
