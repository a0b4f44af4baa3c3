//! Repositories in specific states, shared by the command and controller tests

#![allow(dead_code)]

use super::repository::*;
use stagehand::core::error::Result;

/// Twenty numbered lines, "line 1" through "line 20"
pub fn numbered_lines() -> String {
    (1..=20).map(|n| format!("line {n}\n")).collect()
}

/// Repository with three committed files modified and two untracked files
pub fn create_multi_file_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    create_test_files(&repo.path, &["file4.txt", "file5.txt"])?;

    Ok(repo)
}

/// "numbers.txt" edited at lines 2 and 18, far enough apart to give two hunks.
///
/// Printed diff lines (one-based): 1-4 are the file header, 5 is the first `@@`,
/// 7 is `-line 2` and 8 is `+LINE 2`.
pub fn create_two_hunk_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    create_file(&repo.path, "numbers.txt", &numbered_lines())?;
    git_add(&repo.path, "numbers.txt")?;
    git_commit(&repo.path, "Add numbers")?;

    let edited = numbered_lines()
        .replace("line 2\n", "LINE 2\n")
        .replace("line 18\n", "LINE 18\n");
    create_file(&repo.path, "numbers.txt", &edited)?;
    Ok(repo)
}

/// "letters.txt" going from "a b c" to "a b X Y c": one hunk with two added lines.
///
/// Printed diff lines (one-based): 5 is the `@@`, 8 is `+X` and 9 is `+Y`.
pub fn create_two_line_addition_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    create_file(&repo.path, "letters.txt", "a\nb\nc\n")?;
    git_add(&repo.path, "letters.txt")?;
    git_commit(&repo.path, "Add letters")?;

    create_file(&repo.path, "letters.txt", "a\nb\nX\nY\nc\n")?;
    Ok(repo)
}

/// `main` has "shared.txt" as "one"; branch `feature` extends it with "two"
pub fn create_feature_branch_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    create_file(&repo.path, "shared.txt", "one\n")?;
    git_add(&repo.path, "shared.txt")?;
    git_commit(&repo.path, "Add shared")?;

    git_checkout(&repo.path, &["-b", "feature"])?;
    create_file(&repo.path, "shared.txt", "one\ntwo\n")?;
    git_add(&repo.path, "shared.txt")?;
    git_commit(&repo.path, "Extend shared")?;
    git_checkout(&repo.path, &["main"])?;

    Ok(repo)
}
