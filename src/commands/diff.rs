//! Read-only views of the diff pane: file diffs, diffstat, index summary and grep.

use crate::commands::session::{gestures, open_controller, report};
use crate::core::{
    error::{Result, StagehandError},
    parse_rows, print_block, print_numbered_diff, Gesture,
};

/// Show the diff of one row of the unstaged (or staged) list with line numbers
pub fn execute_diff(row: String, staged: bool) -> Result<()> {
    let mut controller = open_controller(false)?;
    let available = if staged {
        controller.staged().len()
    } else {
        controller.unstaged().len()
    };
    let selected = parse_rows(&[row], available)?;
    let Some(&first) = selected.first() else {
        return Err(StagehandError::row_out_of_range(0, available));
    };
    if staged {
        controller.click_staged(first);
    } else {
        controller.click_unstaged(first);
    }
    report(&mut controller)?;
    print_numbered_diff(controller.diff().info(), controller.diff().text());
    Ok(())
}

pub fn execute_diffstat() -> Result<()> {
    let mut controller = open_controller(false)?;
    gestures().dispatch(Gesture::ShowDiffstat, &mut controller);
    report(&mut controller)?;
    print_block(controller.diff().info(), controller.diff().text());
    Ok(())
}

pub fn execute_index() -> Result<()> {
    let mut controller = open_controller(false)?;
    gestures().dispatch(Gesture::ShowIndex, &mut controller);
    report(&mut controller)?;
    print_block(controller.diff().info(), controller.diff().text());
    Ok(())
}

pub fn execute_grep(pattern: String) -> Result<()> {
    let mut controller = open_controller(false)?;
    controller.grep(&pattern);
    report(&mut controller)?;
    print_block(controller.diff().info(), controller.diff().text());
    Ok(())
}
