//! Opening files in the configured editor, diff editor or merge tool.

use crate::commands::session::{gestures, open_controller, report};
use crate::core::{
    error::{Result, StagehandError},
    parse_rows, Gesture,
};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EditTool {
    /// The configured editor
    Editor,
    /// The configured diff editor, against the HEAD version
    Diff,
    /// `git mergetool` in a terminal, for unmerged files
    Merge,
}

pub fn execute_edit(row: String, staged: bool, tool: EditTool) -> Result<()> {
    let mut controller = open_controller(false)?;
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

    match tool {
        EditTool::Editor => controller.launch_editor(staged),
        EditTool::Diff => controller.launch_diff_editor(staged),
        EditTool::Merge => {
            gestures().dispatch(Gesture::LaunchMergetool, &mut controller);
        }
    }
    report(&mut controller)
}
