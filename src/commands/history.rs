//! History listing, patch export and the external history browser.

use crate::commands::session::{gestures, open_controller, report};
use crate::core::{
    error::Result, print_block, print_info, print_section_header, print_success, CommitSummary,
    Gesture, SearchKind,
};
use clap::ValueEnum;
use colored::*;
use std::path::PathBuf;

pub fn execute_log(max: usize, all: bool) -> Result<()> {
    let mut controller = open_controller(false)?;
    let entries = controller.log_entries(max, all);
    report(&mut controller)?;

    if entries.is_empty() {
        print_info("No commits yet.");
        return Ok(());
    }
    print_commits("History", &entries);
    Ok(())
}

fn print_commits(header: &str, entries: &[CommitSummary]) {
    print_section_header(header);
    for entry in entries {
        let short = entry.rev.get(..7).unwrap_or(&entry.rev);
        println!("   {} {}", short.yellow(), entry.summary.white());
    }
    println!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchBy {
    /// Commit message
    Message,
    Author,
    Committer,
    /// Commits adding or removing the text
    Content,
    /// Commits touching a path
    Path,
}

impl From<SearchBy> for SearchKind {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::Message => SearchKind::Message,
            SearchBy::Author => SearchKind::Author,
            SearchBy::Committer => SearchKind::Committer,
            SearchBy::Content => SearchKind::Content,
            SearchBy::Path => SearchKind::Path,
        }
    }
}

/// List commits on any branch whose message, author, committer, diff or paths match
pub fn execute_search(query: String, by: SearchBy, max: usize) -> Result<()> {
    let mut controller = open_controller(false)?;
    let found = controller.search_commits(by.into(), &query, max);
    report(&mut controller)?;

    if found.is_empty() {
        print_info(&format!("No commits match \"{query}\"."));
        return Ok(());
    }
    print_commits(&format!("Commits matching \"{query}\""), &found);
    Ok(())
}

/// List the files on a branch, or print one of them as it is there
pub fn execute_browse(branch: Option<String>, file: Option<String>) -> Result<()> {
    let mut controller = open_controller(false)?;
    let branch = branch.unwrap_or_default();
    match file {
        Some(file) => {
            controller.browse_file(&branch, &file);
            report(&mut controller)?;
            print_block(controller.diff().info(), controller.diff().text());
        }
        None => {
            let files = controller.browse_branch(&branch);
            report(&mut controller)?;
            let shown = if branch.is_empty() {
                controller.state().current_branch.clone()
            } else {
                branch
            };
            print_section_header(&format!("Files on {shown}"));
            for path in &files {
                println!("   {path}");
            }
            println!();
        }
    }
    Ok(())
}

pub fn execute_export_patches(revs: Vec<String>, output_dir: PathBuf) -> Result<()> {
    let mut controller = open_controller(false)?;
    controller.export_patches(&revs, &output_dir);
    report(&mut controller)?;
    if !revs.is_empty() {
        print_success(&format!(
            "Exported {} patch(es) to {}",
            revs.len(),
            output_dir.display()
        ));
    }
    Ok(())
}

pub fn execute_visualize(all: bool) -> Result<()> {
    let mut controller = open_controller(false)?;
    let gesture = if all {
        Gesture::VisualizeAll
    } else {
        Gesture::Visualize
    };
    gestures().dispatch(gesture, &mut controller);
    report(&mut controller)
}
