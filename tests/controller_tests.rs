//! Controller scenarios against real repositories and the system git binary

mod common;
use common::{fixtures::*, repository::*};
use stagehand::core::{channel, RepoWatcher, ViewMode};
use std::time::{Duration, Instant};

#[cfg(test)]
mod controller_tests {
    use super::*;

    #[test]
    fn test_rescan_fills_both_lists() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        git_add(&repo.path, "file3.txt")?;

        let mut controller = repo.controller()?;
        controller.rescan();

        assert_eq!(
            controller.unstaged().items(),
            ["file1.txt", "file2.txt", "file4.txt", "file5.txt"]
        );
        assert_eq!(controller.staged().items(), ["file3.txt"]);
        assert_eq!(controller.state().current_branch, "main");
        assert!(controller.title().ends_with("[main]"));
        assert_eq!(controller.log().error_count(), 0);
        Ok(())
    }

    #[test]
    fn test_hidden_untracked_files() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;

        let mut controller = repo.controller()?;
        controller.set_show_untracked(false);

        assert_eq!(
            controller.unstaged().items(),
            ["file1.txt", "file2.txt", "file3.txt"]
        );
        Ok(())
    }

    #[test]
    fn test_stage_and_unstage_round_trip() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        let mut controller = repo.controller()?;
        controller.rescan();

        controller.select_unstaged(&[0, 3]);
        controller.stage_selected();
        assert_eq!(staged_names(&repo.path)?, vec!["file1.txt", "file4.txt"]);
        assert_eq!(controller.staged().items(), ["file1.txt", "file4.txt"]);

        controller.select_staged(&[1]);
        controller.unstage_selected();
        assert_eq!(staged_names(&repo.path)?, vec!["file1.txt"]);
        assert!(controller
            .unstaged()
            .items()
            .contains(&"file4.txt".to_string()));
        Ok(())
    }

    #[test]
    fn test_rescan_keeps_focused_file_and_diff() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        let mut controller = repo.controller()?;
        controller.rescan();

        controller.click_unstaged(1);
        assert_eq!(controller.unstaged().focused_item(), Some("file2.txt"));
        assert_eq!(controller.mode(), &ViewMode::Worktree);

        // file1 leaves the list; file2 must stay focused at its new row
        git_add(&repo.path, "file1.txt")?;
        controller.rescan();

        assert_eq!(controller.unstaged().focused_item(), Some("file2.txt"));
        assert!(controller.diff().text().contains("+modified2"));
        assert_eq!(controller.mode(), &ViewMode::Worktree);
        Ok(())
    }

    #[test]
    fn test_commit_guards_and_success() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "changed\n")?;
        let mut controller = repo.controller()?;
        controller.rescan();

        controller.set_commit_message("Change initial");
        controller.commit();
        assert_eq!(controller.log().error_count(), 1);

        controller.click_unstaged(0);
        controller.stage_selected();
        controller.commit();

        assert_eq!(controller.log().error_count(), 1);
        assert_eq!(controller.commit_message(), "");
        let log = git(&repo.path, &["log", "--format=%s"])?;
        assert_eq!(log.lines().next(), Some("Change initial"));
        assert!(controller.staged().is_empty());
        Ok(())
    }

    #[test]
    fn test_stage_hunk_through_index() -> anyhow::Result<()> {
        let repo = create_two_hunk_repo()?;
        let mut controller = repo.controller()?;
        controller.rescan();

        controller.click_unstaged(0);
        controller.diff_mut().place_cursor(16);
        controller.stage_hunk();

        let staged = staged_diff(&repo.path)?;
        assert!(staged.contains("+LINE 18"));
        assert!(!staged.contains("+LINE 2\n"));
        // Both lists now hold the file; focus stays on the unstaged copy
        assert_eq!(controller.staged().items(), ["numbers.txt"]);
        assert_eq!(controller.unstaged().focused_item(), Some("numbers.txt"));
        assert!(!controller.diff().text().contains("+LINE 18"));
        Ok(())
    }

    #[test]
    fn test_branch_mode_applies_hunk_and_survives_rescan() -> anyhow::Result<()> {
        let repo = create_feature_branch_repo()?;
        let mut controller = repo.controller()?;
        controller.rescan();

        controller.diff_branch("feature", "shared.txt");
        assert!(controller.mode().is_branch());
        assert!(controller.diff().text().contains("+two"));

        let hunk_line = controller
            .diff()
            .text()
            .lines()
            .position(|line| line == "+two")
            .unwrap_or_default();
        controller.diff_mut().place_cursor(hunk_line);
        controller.apply_diff_to_worktree();

        assert_eq!(repo.read("shared.txt")?, "one\ntwo\n");
        assert!(controller.mode().is_branch());
        assert!(!controller.diff().text().contains("+two"));
        assert_eq!(controller.unstaged().items(), ["shared.txt"]);
        Ok(())
    }

    #[test]
    fn test_branch_diff_requires_file() -> anyhow::Result<()> {
        let repo = create_feature_branch_repo()?;
        let mut controller = repo.controller()?;
        controller.rescan();

        controller.diff_branch("feature", "");
        assert_eq!(controller.log().error_count(), 1);
        assert!(!controller.mode().is_branch());
        Ok(())
    }

    #[test]
    fn test_create_and_checkout_branch() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let mut controller = repo.controller()?;
        controller.rescan();

        controller.create_branch("topic", "", true);
        assert_eq!(controller.state().current_branch, "topic");
        assert!(controller.title().ends_with("[topic]"));
        assert_eq!(controller.local_branches(), vec!["main", "topic"]);

        controller.checkout_branch("main");
        assert_eq!(controller.state().current_branch, "main");
        Ok(())
    }

    #[test]
    fn test_watcher_reports_worktree_change() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let mut controller = repo.controller()?;
        controller.rescan();

        let (notifier, events) = channel();
        let git_dir = repo.path.join(".git");
        let _watcher = RepoWatcher::start(&repo.path, &git_dir, notifier)?;
        create_file(&repo.path, "initial.txt", "touched\n")?;

        let deadline = Instant::now() + Duration::from_secs(10);
        while controller.unstaged().is_empty() && Instant::now() < deadline {
            if !events.pump(&mut controller) {
                std::thread::sleep(Duration::from_millis(50));
            }
        }

        assert_eq!(controller.unstaged().items(), ["initial.txt"]);
        Ok(())
    }
}
