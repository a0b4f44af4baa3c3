//! Predicates for validating stagehand command output
//!
//! Commands run with `NO_COLOR` set, so output can be matched as plain text.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for git repository error messages
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

pub fn has_branch_info() -> impl Predicate<str> {
    predicates::str::contains("Branch:")
}

/// Creates a predicate that checks for a numbered row
pub fn has_row(row: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("[{}]", row))
}

pub fn has_unstaged_section() -> impl Predicate<str> {
    predicates::str::contains("Not staged:")
}

pub fn has_staged_section() -> impl Predicate<str> {
    predicates::str::contains("Staged:")
}

pub fn has_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

pub fn working_tree_clean() -> impl Predicate<str> {
    predicates::str::contains("Nothing to commit, working tree clean")
}
