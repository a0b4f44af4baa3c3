use crate::commands::session::open_controller;
use crate::core::{
    colors::format_row, controller::Controller, error::Result, print_info, RepositoryState,
};
use colored::*;
use serde::Serialize;

#[derive(Serialize)]
struct StatusRow<'a> {
    row: usize,
    status: Option<&'a str>,
    path: &'a str,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    branch: &'a str,
    unstaged: Vec<StatusRow<'a>>,
    staged: Vec<StatusRow<'a>>,
    unmerged: Vec<&'a str>,
}

pub fn execute_status(json: bool) -> Result<()> {
    let controller = open_controller(false)?;
    if json {
        println!("{}", status_json(&controller)?);
    } else {
        print_status(&controller);
    }
    Ok(())
}

fn rows<'a>(state: &'a RepositoryState, items: &'a [String], staged: bool) -> Vec<StatusRow<'a>> {
    items
        .iter()
        .enumerate()
        .map(|(index, path)| StatusRow {
            row: index + 1,
            status: state.status_of(path, staged).map(|status| status.as_str()),
            path,
        })
        .collect()
}

pub fn status_json(controller: &Controller) -> Result<String> {
    let state = controller.state();
    let report = StatusReport {
        branch: &state.current_branch,
        unstaged: rows(state, controller.unstaged().items(), false),
        staged: rows(state, controller.staged().items(), true),
        unmerged: state.unmerged_files.iter().map(String::as_str).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Both lists, numbered the way row arguments refer to them
pub fn print_status(controller: &Controller) {
    let state = controller.state();
    println!();
    println!("{} {}", "Branch:".white(), state.current_branch.blue());

    if controller.unstaged().is_empty() && controller.staged().is_empty() {
        print_info("Nothing to commit, working tree clean");
        return;
    }

    print_list(
        "➤ Not staged:",
        state,
        controller.unstaged().items(),
        false,
    );
    print_list("➤ Staged:", state, controller.staged().items(), true);
    println!();
}

fn print_list(header: &str, state: &RepositoryState, items: &[String], staged: bool) {
    if items.is_empty() {
        return;
    }
    println!("\n{}", header.white());
    for (index, path) in items.iter().enumerate() {
        println!("   {}", format_row(index + 1, state.status_of(path, staged), path));
    }
}
