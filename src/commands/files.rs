//! List gestures: stage, unstage and undo whole files by row.

use crate::commands::session::{dispatch, open_controller};
use crate::commands::status::print_status;
use crate::core::{
    error::Result, parse_rows, print_error_with_structured_usage, Gesture, StagehandError,
};

fn missing_rows(usage: &str) -> StagehandError {
    print_error_with_structured_usage(
        "No rows provided",
        &[usage],
        &[("-h, --help", "Show this help message")],
    );
    StagehandError::invalid_row_format("")
}

pub fn execute_stage(rows: Vec<String>, modified: bool, untracked: bool) -> Result<()> {
    let mut controller = open_controller(false)?;
    if modified || untracked {
        if modified {
            dispatch(&mut controller, Gesture::StageModified)?;
        }
        if untracked {
            dispatch(&mut controller, Gesture::StageUntracked)?;
        }
    } else {
        if rows.is_empty() {
            return Err(missing_rows("stagehand stage <row>... | --modified | --untracked"));
        }
        let selected = parse_rows(&rows, controller.unstaged().len())?;
        controller.select_unstaged(&selected);
        dispatch(&mut controller, Gesture::StageSelected)?;
    }
    print_status(&controller);
    Ok(())
}

pub fn execute_unstage(rows: Vec<String>, all: bool) -> Result<()> {
    let mut controller = open_controller(false)?;
    if all {
        dispatch(&mut controller, Gesture::UnstageAll)?;
    } else {
        if rows.is_empty() {
            return Err(missing_rows("stagehand unstage <row>... | --all"));
        }
        let selected = parse_rows(&rows, controller.staged().len())?;
        controller.select_staged(&selected);
        dispatch(&mut controller, Gesture::UnstageSelected)?;
    }
    print_status(&controller);
    Ok(())
}

/// Check the selected unstaged files out of HEAD after confirmation
pub fn execute_undo(rows: Vec<String>, yes: bool) -> Result<()> {
    if rows.is_empty() {
        return Err(missing_rows("stagehand undo <row>... [--yes]"));
    }
    let mut controller = open_controller(yes)?;
    let selected = parse_rows(&rows, controller.unstaged().len())?;
    controller.select_unstaged(&selected);
    dispatch(&mut controller, Gesture::UndoChanges)?;
    print_status(&controller);
    Ok(())
}
