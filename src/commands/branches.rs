//! Branch, merge and stash gestures.

use crate::commands::session::{dispatch, open_controller, report, run_gesture};
use crate::commands::status::print_status;
use crate::core::{error::Result, print_info, print_section_header, Gesture};
use clap::Subcommand;
use colored::*;

#[derive(Subcommand, Debug)]
pub enum BranchCommand {
    /// List branches, current one marked
    List {
        /// Include remote-tracking branches
        #[arg(short, long)]
        all: bool,
    },
    /// Create a branch
    Create {
        name: String,
        /// Start point (defaults to HEAD)
        #[arg(long)]
        start: Option<String>,
        /// Switch to the new branch
        #[arg(short, long)]
        checkout: bool,
    },
    /// Delete a merged branch
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum StashCommand {
    /// Stash the working tree and index
    Save {
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Apply a stash without dropping it
    Apply {
        #[arg(default_value = "stash@{0}")]
        stash: String,
    },
}

pub fn execute_branch(command: BranchCommand) -> Result<()> {
    let mut controller = open_controller(false)?;
    match command {
        BranchCommand::List { all } => {
            let branches = if all {
                controller.all_branches()
            } else {
                controller.local_branches()
            };
            report(&mut controller)?;
            if branches.is_empty() {
                print_info("No branches found. Make your first commit to create one.");
                return Ok(());
            }
            print_section_header(if all { "Branches" } else { "Local Branches" });
            let current = controller.state().current_branch.clone();
            for branch in &branches {
                if *branch == current {
                    println!("{}{}{} {}", "[".bright_black(), "*".white(), "]".bright_black(), branch.blue());
                } else {
                    println!("    {}", branch.white());
                }
            }
            println!();
        }
        BranchCommand::Create {
            name,
            start,
            checkout,
        } => {
            let start = start.unwrap_or_default();
            run_gesture(&mut controller, |c| c.create_branch(&name, &start, checkout))?;
            print_status(&controller);
        }
        BranchCommand::Delete { name } => {
            run_gesture(&mut controller, |c| c.delete_branch(&name))?;
        }
    }
    Ok(())
}

pub fn execute_checkout(branch: String) -> Result<()> {
    let mut controller = open_controller(false)?;
    run_gesture(&mut controller, |c| c.checkout_branch(&branch))?;
    print_status(&controller);
    Ok(())
}

pub fn execute_rebase(branch: String) -> Result<()> {
    let mut controller = open_controller(false)?;
    run_gesture(&mut controller, |c| c.rebase(&branch))?;
    print_status(&controller);
    Ok(())
}

/// Merge a local branch, or abort the merge in progress
pub fn execute_merge(branch: Option<String>, abort: bool, yes: bool) -> Result<()> {
    let mut controller = open_controller(yes)?;
    if abort {
        dispatch(&mut controller, Gesture::AbortMerge)?;
    } else {
        let branch = branch.unwrap_or_default();
        run_gesture(&mut controller, |c| c.merge_local(&branch))?;
    }
    print_status(&controller);
    Ok(())
}

pub fn execute_cherry_pick(revs: Vec<String>) -> Result<()> {
    let mut controller = open_controller(false)?;
    run_gesture(&mut controller, |c| c.cherry_pick(&revs))?;
    print_status(&controller);
    Ok(())
}

pub fn execute_stash(command: StashCommand) -> Result<()> {
    let mut controller = open_controller(false)?;
    match command {
        StashCommand::Save { message } => {
            run_gesture(&mut controller, |c| c.stash_save(message.as_deref()))?
        }
        StashCommand::Apply { stash } => run_gesture(&mut controller, |c| c.stash_apply(&stash))?,
    }
    print_status(&controller);
    Ok(())
}
