//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories, driving git directly to
//! check results, and building `stagehand` invocations bound to a repository.

#![allow(dead_code)]

use stagehand::core::error::{Result, StagehandError};
use stagehand::core::{AlwaysAnswer, Controller, GitRepo, GuiSettings};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository plus a private settings directory. Both `TempDir`s must stay
/// alive for the duration of the test.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub config_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A `stagehand` invocation running inside this repository
    pub fn stagehand(&self) -> anyhow::Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("stagehand")?;
        cmd.current_dir(&self.path)
            .env("STAGEHAND_CONFIG_DIR", self.config_dir.path())
            .env("NO_COLOR", "1");
        Ok(cmd)
    }

    /// Controller over this repository that accepts every confirmation
    pub fn controller(&self) -> Result<Controller> {
        let repo = GitRepo::open(&self.path)?;
        Ok(Controller::new(repo, GuiSettings::default())
            .with_confirm(AlwaysAnswer(true))
            .with_settings_dir(self.config_dir.path())
            .with_temp_dir(self.config_dir.path()))
    }

    pub fn read(&self, filename: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path.join(filename))?)
    }
}

/// Run git in `repo_path` and return its stdout
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .map_err(StagehandError::Io)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Sets up a fresh git repository on branch `main`
///
/// Identity and signing are configured locally so commits never prompt.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(StagehandError::Io)?;
    let config_dir = TempDir::new().map_err(StagehandError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo {
        temp_dir,
        config_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with "initial.txt" committed
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content).map_err(StagehandError::Io)?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

pub fn git_checkout(repo_path: &Path, args: &[&str]) -> Result<()> {
    let mut full = vec!["checkout"];
    full.extend_from_slice(args);
    git(repo_path, &full)?;
    Ok(())
}

/// Names of staged files, one per line
pub fn staged_names(repo_path: &Path) -> Result<Vec<String>> {
    Ok(git(repo_path, &["diff", "--cached", "--name-only"])?
        .lines()
        .map(str::to_string)
        .collect())
}

pub fn staged_diff(repo_path: &Path) -> Result<String> {
    git(repo_path, &["diff", "--cached"])
}

pub fn unstaged_diff(repo_path: &Path) -> Result<String> {
    git(repo_path, &["diff"])
}

/// Creates multiple test files with sequential content
pub fn create_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("content{}\nline 2\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

pub fn modify_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("modified{}\nline 2\nnew line\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}
