//! The git subprocess boundary.
//!
//! Every read of repository state and every mutation goes through one `git`
//! invocation. [`GitRunner`] is the seam: [`SystemGit`] spawns the real binary,
//! tests substitute a scripted runner. [`GitRepo`] couples a runner with the
//! repository paths and exposes one method per command the front-end issues.
//!
//! # Public API
//! - [`GitRepo`]: Typed wrapper issuing git commands for a repository
//! - [`GitRunner`] / [`SystemGit`]: Subprocess seam and its production implementation
//! - [`GitInvocation`] / [`CommandOutput`]: One command and what it printed
//! - [`RepoPaths`]: Working directory and `.git` directory of the repository
//!
//! # Exit status
//! A runner only fails when the process cannot be run at all. Exit status is
//! reported in [`CommandOutput::exit_code`]; [`GitRepo`] turns a non-zero status into
//! [`StagehandError::GitFailed`] carrying the output verbatim.

use crate::core::error::{Result, StagehandError};
use git2::Repository;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured result of one subprocess
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(command: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    pub fn failure(command: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout and stderr joined, trimmed, empty streams skipped
    pub fn combined(&self) -> String {
        let mut out = String::new();
        if !self.stdout.trim().is_empty() {
            out.push_str(self.stdout.trim_end());
        }
        if !self.stderr.trim().is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(self.stderr.trim_end());
        }
        out.trim().to_string()
    }
}

/// A single git command line plus optional stdin payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInvocation {
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl GitInvocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Human-readable command line used in logs
    pub fn label(&self) -> String {
        let mut label = String::from("git");
        for arg in &self.args {
            label.push(' ');
            label.push_str(arg);
        }
        label
    }
}

/// Runs git invocations. Implementations must not interpret the exit status.
pub trait GitRunner {
    fn run(&self, invocation: &GitInvocation) -> Result<CommandOutput>;
}

/// Runs the `git` binary found on `PATH` inside a working directory
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, invocation: &GitInvocation) -> Result<CommandOutput> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.workdir)
            .args(&invocation.args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_PAGER", "cat")
            .env("PAGER", "cat")
            .env("GIT_EDITOR", ":")
            .env("GIT_SEQUENCE_EDITOR", ":")
            .env("GIT_MERGE_AUTOEDIT", "no")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("Running {}", invocation.label());

        let output = match &invocation.stdin {
            Some(payload) => {
                cmd.stdin(Stdio::piped());
                let mut child = cmd.spawn()?;
                if let Some(mut stdin) = child.stdin.take() {
                    stdin.write_all(payload.as_bytes())?;
                }
                child.wait_with_output()?
            }
            None => {
                cmd.stdin(Stdio::null());
                cmd.output()?
            }
        };

        Ok(CommandOutput {
            command: invocation.label(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

/// Location of a non-bare repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    pub workdir: PathBuf,
    pub git_dir: PathBuf,
}

impl RepoPaths {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        let workdir = workdir.into();
        let git_dir = workdir.join(".git");
        Self { workdir, git_dir }
    }

    /// Directory name of the working tree, shown in the window title
    pub fn project_name(&self) -> String {
        self.workdir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.workdir.display().to_string())
    }
}

/// One line of `git log`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub rev: String,
    pub summary: String,
}

/// Which part of a commit `search_commits` matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Message,
    Author,
    Committer,
    /// Commits that add or remove the string (pickaxe)
    Content,
    /// Commits touching the path
    Path,
}

impl SearchKind {
    fn args(self, query: &str) -> Vec<String> {
        match self {
            SearchKind::Message => vec!["-i".to_string(), format!("--grep={query}")],
            SearchKind::Author => vec!["-i".to_string(), format!("--author={query}")],
            SearchKind::Committer => vec!["-i".to_string(), format!("--committer={query}")],
            SearchKind::Content => vec![format!("-S{query}")],
            SearchKind::Path => vec!["--".to_string(), query.to_string()],
        }
    }
}

fn summary_log_args(max: usize) -> Vec<String> {
    vec![
        "log".to_string(),
        "--no-color".to_string(),
        "--pretty=format:%H%x09%s".to_string(),
        format!("--max-count={max}"),
    ]
}

fn parse_commit_summaries(out: &str) -> Vec<CommitSummary> {
    out.lines()
        .filter_map(|line| {
            let (rev, summary) = line.split_once('\t')?;
            Some(CommitSummary {
                rev: rev.trim().to_string(),
                summary: summary.trim().to_string(),
            })
        })
        .collect()
}

pub struct GitRepo {
    paths: RepoPaths,
    runner: Box<dyn GitRunner>,
}

impl GitRepo {
    /// Discover the repository containing `path` and drive the system git binary
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| StagehandError::NotInGitRepo)?;
        let workdir = repo
            .workdir()
            .ok_or(StagehandError::BareRepository)?
            .to_path_buf();
        let paths = RepoPaths {
            git_dir: repo.path().to_path_buf(),
            workdir: workdir.clone(),
        };
        Ok(Self::with_runner(paths, Box::new(SystemGit::new(workdir))))
    }

    pub fn with_runner(paths: RepoPaths, runner: Box<dyn GitRunner>) -> Self {
        Self { paths, runner }
    }

    pub fn paths(&self) -> &RepoPaths {
        &self.paths
    }

    pub fn workdir(&self) -> &Path {
        &self.paths.workdir
    }

    pub fn git_dir(&self) -> &Path {
        &self.paths.git_dir
    }

    /// Run an invocation, turning a non-zero exit into [`StagehandError::GitFailed`]
    pub fn execute(&self, invocation: GitInvocation) -> Result<CommandOutput> {
        let output = self.runner.run(&invocation)?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(StagehandError::git_failed(invocation.label(), output))
        }
    }

    fn capture(&self, invocation: GitInvocation) -> Result<String> {
        self.execute(invocation).map(|output| output.stdout)
    }

    fn with_paths(mut args: Vec<String>, paths: &[String]) -> GitInvocation {
        args.push("--".to_string());
        args.extend(paths.iter().cloned());
        GitInvocation::new(args)
    }

    // Queries

    /// `git status` in porcelain v1 form, NUL separated, branch header first
    pub fn status_porcelain(&self) -> Result<String> {
        self.capture(GitInvocation::new([
            "status",
            "--porcelain=v1",
            "-z",
            "--branch",
            "--untracked-files=all",
        ]))
    }

    pub fn diff_file(&self, path: &str, cached: bool) -> Result<String> {
        let mut args = vec!["diff".to_string(), "--no-color".to_string(), "--no-ext-diff".to_string()];
        if cached {
            args.push("--cached".to_string());
        }
        self.capture(Self::with_paths(args, &[path.to_string()]))
    }

    /// Diff that turns the working tree version of `path` into the one on `branch`
    pub fn diff_against_branch(&self, branch: &str, path: &str) -> Result<String> {
        let args = vec![
            "diff".to_string(),
            "--no-color".to_string(),
            "--no-ext-diff".to_string(),
            "-R".to_string(),
            branch.to_string(),
        ];
        self.capture(Self::with_paths(args, &[path.to_string()]))
    }

    pub fn files_changed_against(&self, branch: &str) -> Result<Vec<String>> {
        let out = self.capture(GitInvocation::new(["diff", "--name-only", "-z", branch]))?;
        Ok(out
            .split('\0')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn diffstat(&self) -> Result<String> {
        self.capture(GitInvocation::new([
            "diff", "--stat", "--no-color", "-M", "HEAD^", "HEAD",
        ]))
    }

    pub fn diff_index(&self) -> Result<String> {
        self.capture(GitInvocation::new(["diff-index", "--stat", "--cached", "HEAD"]))
    }

    pub fn local_branches(&self) -> Result<Vec<String>> {
        self.refs_under(&["refs/heads/"])
    }

    pub fn all_branches(&self) -> Result<Vec<String>> {
        self.refs_under(&["refs/heads/", "refs/remotes/"])
    }

    fn refs_under(&self, prefixes: &[&str]) -> Result<Vec<String>> {
        let mut args = vec!["for-each-ref".to_string(), "--format=%(refname:short)".to_string()];
        args.extend(prefixes.iter().map(|p| p.to_string()));
        let out = self.capture(GitInvocation::new(args))?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.ends_with("/HEAD"))
            .map(str::to_string)
            .collect())
    }

    pub fn log(&self, max: usize, all: bool) -> Result<Vec<CommitSummary>> {
        let mut args = summary_log_args(max);
        if all {
            args.push("--all".to_string());
        }
        let out = self.capture(GitInvocation::new(args))?;
        Ok(parse_commit_summaries(&out))
    }

    /// Commits on every branch matching `query` in the field chosen by `kind`
    pub fn search_commits(
        &self,
        kind: SearchKind,
        query: &str,
        max: usize,
    ) -> Result<Vec<CommitSummary>> {
        let mut args = summary_log_args(max);
        args.push("--all".to_string());
        args.extend(kind.args(query));
        let out = self.capture(GitInvocation::new(args))?;
        Ok(parse_commit_summaries(&out))
    }

    /// Every file tracked at `rev`
    pub fn tree_files(&self, rev: &str) -> Result<Vec<String>> {
        let out = self.capture(GitInvocation::new(["ls-tree", "-r", "--name-only", rev]))?;
        Ok(out.lines().map(str::to_string).collect())
    }

    pub fn grep(&self, pattern: &str) -> Result<String> {
        let invocation = GitInvocation::new(["grep", "-n", "--no-color", "-e", pattern]);
        let output = self.runner.run(&invocation)?;
        match output.exit_code {
            Some(0) => Ok(output.stdout),
            Some(1) if output.stderr.trim().is_empty() => Ok(String::new()),
            _ => Err(StagehandError::git_failed(invocation.label(), output)),
        }
    }

    /// Contents of `path` at `rev`
    pub fn show_blob(&self, rev: &str, path: &str) -> Result<String> {
        self.capture(GitInvocation::new(["show".to_string(), format!("{rev}:{path}")]))
    }

    pub fn previous_commit_message(&self) -> Result<String> {
        self.capture(GitInvocation::new(["log", "-1", "--pretty=format:%B"]))
    }

    pub fn version(&self) -> Result<String> {
        self.capture(GitInvocation::new(["--version"]))
            .map(|out| out.trim().to_string())
    }

    pub fn config_value(&self, key: &str) -> Result<Option<String>> {
        let invocation = GitInvocation::new(["config", "--get", key]);
        let output = self.runner.run(&invocation)?;
        match output.exit_code {
            Some(0) => Ok(Some(output.stdout.trim().to_string())),
            Some(1) => Ok(None),
            _ => Err(StagehandError::git_failed(invocation.label(), output)),
        }
    }

    // Mutations

    /// Stage paths, including deletions
    pub fn add(&self, paths: &[String]) -> Result<CommandOutput> {
        self.execute(Self::with_paths(
            vec!["add".to_string(), "-A".to_string()],
            paths,
        ))
    }

    pub fn add_untracked(&self, paths: &[String]) -> Result<CommandOutput> {
        self.execute(Self::with_paths(vec!["add".to_string()], paths))
    }

    pub fn reset(&self, paths: &[String]) -> Result<CommandOutput> {
        self.execute(Self::with_paths(
            vec!["reset".to_string(), "-q".to_string(), "HEAD".to_string()],
            paths,
        ))
    }

    pub fn reset_all(&self) -> Result<CommandOutput> {
        self.execute(GitInvocation::new(["reset", "-q", "HEAD"]))
    }

    pub fn checkout_from_head(&self, paths: &[String]) -> Result<CommandOutput> {
        self.execute(Self::with_paths(
            vec!["checkout".to_string(), "HEAD".to_string()],
            paths,
        ))
    }

    /// Apply a patch read from stdin to the index, the worktree, or both reversed
    pub fn apply_patch(&self, patch: &str, cached: bool, reverse: bool) -> Result<CommandOutput> {
        let mut args = vec![
            "apply".to_string(),
            "--recount".to_string(),
            "--whitespace=nowarn".to_string(),
        ];
        if cached {
            args.push("--cached".to_string());
        }
        if reverse {
            args.push("--reverse".to_string());
        }
        args.push("-".to_string());
        self.execute(GitInvocation::new(args).with_stdin(patch))
    }

    pub fn commit(&self, message: &str, amend: bool) -> Result<CommandOutput> {
        let mut args = vec!["commit".to_string(), "-F".to_string(), "-".to_string()];
        if amend {
            args.push("--amend".to_string());
        }
        self.execute(GitInvocation::new(args).with_stdin(message))
    }

    pub fn checkout_branch(&self, branch: &str) -> Result<CommandOutput> {
        self.execute(GitInvocation::new(["checkout", branch]))
    }

    pub fn create_branch(&self, name: &str, start: &str, checkout: bool) -> Result<CommandOutput> {
        if checkout {
            self.execute(GitInvocation::new(["checkout", "-b", name, start]))
        } else {
            self.execute(GitInvocation::new(["branch", name, start]))
        }
    }

    pub fn delete_branch(&self, branch: &str) -> Result<CommandOutput> {
        self.execute(GitInvocation::new(["branch", "-d", branch]))
    }

    pub fn rebase(&self, branch: &str) -> Result<CommandOutput> {
        self.execute(GitInvocation::new(["rebase", branch]))
    }

    pub fn merge(&self, branch: &str) -> Result<CommandOutput> {
        self.execute(GitInvocation::new(["merge", "--no-edit", branch]))
    }

    pub fn abort_merge(&self) -> Result<CommandOutput> {
        self.execute(GitInvocation::new(["merge", "--abort"]))
    }

    pub fn cherry_pick(&self, revs: &[String]) -> Result<CommandOutput> {
        let mut args = vec!["cherry-pick".to_string()];
        args.extend(revs.iter().cloned());
        self.execute(GitInvocation::new(args))
    }

    pub fn stash_save(&self, message: Option<&str>) -> Result<CommandOutput> {
        let mut args = vec!["stash".to_string(), "push".to_string()];
        if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
            args.push("-m".to_string());
            args.push(message.to_string());
        }
        self.execute(GitInvocation::new(args))
    }

    pub fn stash_apply(&self, stash: &str) -> Result<CommandOutput> {
        self.execute(GitInvocation::new(["stash", "apply", stash]))
    }

    /// Write `rev` as a numbered patch file into `output_dir`
    pub fn format_patch(&self, rev: &str, number: usize, output_dir: &Path) -> Result<CommandOutput> {
        self.execute(GitInvocation::new([
            "format-patch".to_string(),
            "-o".to_string(),
            output_dir.display().to_string(),
            format!("--start-number={number}"),
            "-1".to_string(),
            rev.to_string(),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeGit;

    fn repo_with(fake: &FakeGit) -> GitRepo {
        GitRepo::with_runner(RepoPaths::new("/tmp/project"), Box::new(fake.clone()))
    }

    #[test]
    fn test_label_joins_arguments() {
        let invocation = GitInvocation::new(["apply", "--cached", "-"]);
        assert_eq!(invocation.label(), "git apply --cached -");
        assert_eq!(invocation.subcommand(), Some("apply"));
    }

    #[test]
    fn test_combined_output_skips_empty_streams() {
        let output = CommandOutput::success("git add", "  \n");
        assert_eq!(output.combined(), "");

        let output = CommandOutput {
            command: "git merge".to_string(),
            stdout: "Auto-merging a.txt\n".to_string(),
            stderr: "CONFLICT (content)\n".to_string(),
            exit_code: Some(1),
        };
        assert_eq!(output.combined(), "Auto-merging a.txt\nCONFLICT (content)");
    }

    #[test]
    fn test_execute_maps_nonzero_exit_to_error() {
        let fake = FakeGit::new();
        fake.fail_next("rebase", "cannot rebase: You have unstaged changes.");
        let repo = repo_with(&fake);

        let err = repo.rebase("main").unwrap_err();
        match err {
            StagehandError::GitFailed { command, output } => {
                assert_eq!(command, "git rebase main");
                assert!(output.stderr.contains("unstaged changes"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_apply_patch_passes_stdin_and_flags() {
        let fake = FakeGit::new();
        let repo = repo_with(&fake);

        repo.apply_patch("diff --git a/x b/x\n", true, true).unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].args,
            vec!["apply", "--recount", "--whitespace=nowarn", "--cached", "--reverse", "-"]
        );
        assert_eq!(calls[0].stdin.as_deref(), Some("diff --git a/x b/x\n"));
    }

    #[test]
    fn test_commit_reads_message_from_stdin() {
        let fake = FakeGit::new();
        let repo = repo_with(&fake);

        repo.commit("Fix parser\n", true).unwrap();

        let calls = fake.calls();
        assert_eq!(calls[0].args, vec!["commit", "-F", "-", "--amend"]);
        assert_eq!(calls[0].stdin.as_deref(), Some("Fix parser\n"));
    }

    #[test]
    fn test_grep_without_matches_is_empty() {
        let fake = FakeGit::new();
        fake.respond("grep", CommandOutput::failure("git grep", 1, ""));
        let repo = repo_with(&fake);

        assert_eq!(repo.grep("needle").unwrap(), "");
    }

    #[test]
    fn test_log_parses_tab_separated_lines() {
        let fake = FakeGit::new();
        fake.respond(
            "log",
            CommandOutput::success("git log", "abc123\tFirst commit\ndef456\tSecond\tcommit"),
        );
        let repo = repo_with(&fake);

        let log = repo.log(10, false).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].rev, "abc123");
        assert_eq!(log[1].summary, "Second\tcommit");
    }

    #[test]
    fn test_search_places_query_per_kind() {
        let fake = FakeGit::new();
        fake.respond(
            "log",
            CommandOutput::success("git log", "abc123\tFix parser\n"),
        );
        let repo = repo_with(&fake);

        let found = repo.search_commits(SearchKind::Author, "ada", 5).unwrap();
        assert_eq!(found[0].summary, "Fix parser");
        repo.search_commits(SearchKind::Content, "needle", 5).unwrap();
        repo.search_commits(SearchKind::Path, "src/lib.rs", 5).unwrap();

        let calls = fake.calls_to("log");
        assert!(calls[0].args.ends_with(&["--all".into(), "-i".into(), "--author=ada".into()]));
        assert_eq!(calls[1].args.last().map(String::as_str), Some("-Sneedle"));
        assert!(calls[2].args.ends_with(&["--".into(), "src/lib.rs".into()]));
    }

    #[test]
    fn test_tree_files_lists_one_path_per_line() {
        let fake = FakeGit::new();
        fake.respond(
            "ls-tree",
            CommandOutput::success("git ls-tree", "README.md\nsrc/main.rs\n"),
        );
        let repo = repo_with(&fake);

        assert_eq!(repo.tree_files("main").unwrap(), vec!["README.md", "src/main.rs"]);
        assert_eq!(
            fake.calls()[0].args,
            vec!["ls-tree", "-r", "--name-only", "main"]
        );
    }

    #[test]
    fn test_branch_listing_skips_symbolic_heads() {
        let fake = FakeGit::new();
        fake.respond(
            "for-each-ref",
            CommandOutput::success("git for-each-ref", "main\norigin/HEAD\norigin/main\n"),
        );
        let repo = repo_with(&fake);

        assert_eq!(repo.all_branches().unwrap(), vec!["main", "origin/main"]);
    }

    #[test]
    fn test_open_non_git_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = GitRepo::open(temp_dir.path());
        assert!(matches!(result, Err(StagehandError::NotInGitRepo)));
    }

    #[test]
    fn test_project_name_is_workdir_basename() {
        assert_eq!(RepoPaths::new("/home/me/widgets").project_name(), "widgets");
    }
}
