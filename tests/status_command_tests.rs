use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::{assertions, fixtures::*, repository::*};

#[cfg(test)]
mod status_command_tests {
    use super::*;

    #[test]
    fn test_status_shows_numbered_modified_files() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "modified content\n")?;

        repo.stagehand()?
            .arg("status")
            .assert()
            .success()
            .stdout(assertions::has_branch_info())
            .stdout(predicate::str::contains("main"))
            .stdout(assertions::has_unstaged_section())
            .stdout(assertions::has_row(1))
            .stdout(predicate::str::contains("initial.txt"));

        Ok(())
    }

    #[test]
    fn test_status_shows_untracked_files() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        create_file(&repo.path, "newfile.txt", "new content\n")?;

        repo.stagehand()?
            .arg("status")
            .assert()
            .success()
            .stdout(assertions::has_row(1))
            .stdout(predicate::str::contains("??"))
            .stdout(predicate::str::contains("newfile.txt"));

        Ok(())
    }

    #[test]
    fn test_status_splits_staged_and_unstaged() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        git_add(&repo.path, "file2.txt")?;

        let output = repo.stagehand()?.arg("status").output()?;
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);

        let staged_at = stdout.find("➤ Staged:").expect("staged section");
        let unstaged_at = stdout.find("➤ Not staged:").expect("unstaged section");
        assert!(unstaged_at < staged_at);
        assert!(stdout[staged_at..].contains("file2.txt"));
        assert!(stdout[unstaged_at..staged_at].contains("file5.txt"));
        assert!(!stdout[unstaged_at..staged_at].contains("file2.txt"));

        Ok(())
    }

    #[test]
    fn test_status_json_lists_rows() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        git_add(&repo.path, "file1.txt")?;

        let output = repo.stagehand()?.args(["status", "--json"]).output()?;
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

        assert_eq!(json["branch"], "main");
        assert_eq!(json["staged"][0]["row"], 1);
        assert_eq!(json["staged"][0]["path"], "file1.txt");
        assert_eq!(json["unstaged"].as_array().map(Vec::len), Some(4));

        Ok(())
    }

    #[test]
    fn test_status_clean_tree() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.stagehand()?
            .arg("status")
            .assert()
            .success()
            .stdout(assertions::working_tree_clean());

        Ok(())
    }

    #[test]
    fn test_status_not_in_git_repo() -> anyhow::Result<()> {
        // Use completely independent temp directory to avoid git discovery
        let temp_dir = tempfile::TempDir::new()?;
        let config_dir = tempfile::TempDir::new()?;
        let non_repo_path = temp_dir.path().join("not-a-repo");
        std::fs::create_dir(&non_repo_path)?;

        let mut cmd = Command::cargo_bin("stagehand")?;
        cmd.arg("status")
            .current_dir(non_repo_path)
            .env("STAGEHAND_CONFIG_DIR", config_dir.path())
            .assert()
            .failure()
            .stdout(assertions::not_in_git_repo());

        Ok(())
    }
}
