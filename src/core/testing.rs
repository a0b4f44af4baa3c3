//! Scripted git runner for unit tests.
//!
//! [`FakeGit`] records every invocation and simulates just enough of a repository
//! (branch, staged, modified, untracked and unmerged paths, canned diffs) for the
//! controller to rescan against. Clones share state, so a test keeps one handle
//! while the repository owns another.

use crate::core::error::Result;
use crate::core::git::{CommandOutput, GitInvocation, GitRunner, GitRepo, RepoPaths};
use crate::core::launch::ToolLauncher;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::path::Path;
use std::rc::Rc;

#[derive(Default)]
struct FakeState {
    calls: Vec<GitInvocation>,
    failures: HashMap<String, VecDeque<String>>,
    responses: HashMap<String, CommandOutput>,
    branch: String,
    staged: BTreeSet<String>,
    modified: BTreeSet<String>,
    untracked: BTreeSet<String>,
    unmerged: BTreeSet<String>,
    diffs: HashMap<(String, bool), String>,
}

#[derive(Clone, Default)]
pub struct FakeGit {
    state: Rc<RefCell<FakeState>>,
}

impl FakeGit {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().branch = "main".to_string();
        fake
    }

    /// Repository handle driven by this fake
    pub fn repo(&self) -> GitRepo {
        GitRepo::with_runner(RepoPaths::new("/tmp/project"), Box::new(self.clone()))
    }

    /// Repository handle whose paths point at a real directory
    pub fn repo_at(&self, workdir: &Path) -> GitRepo {
        GitRepo::with_runner(RepoPaths::new(workdir), Box::new(self.clone()))
    }

    pub fn set_branch(&self, branch: &str) {
        self.state.borrow_mut().branch = branch.to_string();
    }

    pub fn modify(&self, path: &str) {
        self.state.borrow_mut().modified.insert(path.to_string());
    }

    pub fn stage(&self, path: &str) {
        self.state.borrow_mut().staged.insert(path.to_string());
    }

    pub fn untracked(&self, path: &str) {
        self.state.borrow_mut().untracked.insert(path.to_string());
    }

    pub fn conflict(&self, path: &str) {
        self.state.borrow_mut().unmerged.insert(path.to_string());
    }

    /// Remove every trace of `path`, as if its changes were committed elsewhere
    pub fn forget(&self, path: &str) {
        let mut state = self.state.borrow_mut();
        state.staged.remove(path);
        state.modified.remove(path);
        state.untracked.remove(path);
        state.unmerged.remove(path);
    }

    pub fn set_diff(&self, path: &str, cached: bool, diff: &str) {
        self.state
            .borrow_mut()
            .diffs
            .insert((path.to_string(), cached), diff.to_string());
    }

    /// Make the next call to `subcommand` exit with status 1 and `stderr`
    pub fn fail_next(&self, subcommand: &str, stderr: &str) {
        self.state
            .borrow_mut()
            .failures
            .entry(subcommand.to_string())
            .or_default()
            .push_back(stderr.to_string());
    }

    /// Answer every call to `subcommand` with `output`
    pub fn respond(&self, subcommand: &str, output: CommandOutput) {
        self.state
            .borrow_mut()
            .responses
            .insert(subcommand.to_string(), output);
    }

    pub fn calls(&self) -> Vec<GitInvocation> {
        self.state.borrow().calls.clone()
    }

    pub fn calls_to(&self, subcommand: &str) -> Vec<GitInvocation> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| call.subcommand() == Some(subcommand))
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn staged_paths(&self) -> Vec<String> {
        self.state.borrow().staged.iter().cloned().collect()
    }

    fn simulate(&self, invocation: &GitInvocation) -> CommandOutput {
        let label = invocation.label();
        let args = &invocation.args;
        let paths = paths_after_separator(args);
        let mut state = self.state.borrow_mut();

        match invocation.subcommand().unwrap_or_default() {
            "status" => CommandOutput::success(label, render_status(&state)),
            "add" => {
                for path in paths {
                    state.modified.remove(&path);
                    state.untracked.remove(&path);
                    state.unmerged.remove(&path);
                    state.staged.insert(path);
                }
                CommandOutput::success(label, "")
            }
            "reset" => {
                let targets: Vec<String> = if paths.is_empty() {
                    state.staged.iter().cloned().collect()
                } else {
                    paths
                };
                for path in targets {
                    if state.staged.remove(&path) {
                        state.modified.insert(path);
                    }
                }
                CommandOutput::success(label, "")
            }
            "commit" => {
                let amend = args.iter().any(|arg| arg == "--amend");
                if state.staged.is_empty() && !amend {
                    return CommandOutput::failure(label, 1, "nothing to commit");
                }
                state.staged.clear();
                CommandOutput::success(label, "[main abc1234] commit\n")
            }
            "diff" => {
                let cached = args.iter().any(|arg| arg == "--cached");
                let diff = paths
                    .first()
                    .and_then(|path| state.diffs.get(&(path.clone(), cached)))
                    .cloned()
                    .unwrap_or_default();
                CommandOutput::success(label, diff)
            }
            "checkout" => {
                if args.get(1).map(String::as_str) == Some("-b") {
                    if let Some(name) = args.get(2) {
                        state.branch = name.clone();
                    }
                } else if args.get(1).map(String::as_str) == Some("HEAD") {
                    for path in paths {
                        state.modified.remove(&path);
                    }
                } else if let Some(branch) = args.get(1) {
                    state.branch = branch.clone();
                }
                CommandOutput::success(label, "")
            }
            "--version" => CommandOutput::success(label, "git version 2.43.0\n"),
            _ => CommandOutput::success(label, ""),
        }
    }
}

impl GitRunner for FakeGit {
    fn run(&self, invocation: &GitInvocation) -> Result<CommandOutput> {
        let subcommand = invocation.subcommand().unwrap_or_default().to_string();
        let scripted = {
            let mut state = self.state.borrow_mut();
            state.calls.push(invocation.clone());
            let failure = state
                .failures
                .get_mut(&subcommand)
                .and_then(VecDeque::pop_front);
            match failure {
                Some(stderr) => Some(CommandOutput::failure(invocation.label(), 1, stderr)),
                None => state.responses.get(&subcommand).cloned(),
            }
        };
        Ok(scripted.unwrap_or_else(|| self.simulate(invocation)))
    }
}

fn paths_after_separator(args: &[String]) -> Vec<String> {
    args.iter()
        .skip_while(|arg| arg.as_str() != "--")
        .skip(1)
        .cloned()
        .collect()
}

fn render_status(state: &FakeState) -> String {
    let mut out = format!("## {}\0", state.branch);
    let tracked: BTreeSet<&String> = state
        .staged
        .iter()
        .chain(&state.modified)
        .chain(&state.unmerged)
        .collect();
    for path in tracked {
        let code = if state.unmerged.contains(path) {
            "UU".to_string()
        } else {
            let index = if state.staged.contains(path) { 'M' } else { ' ' };
            let worktree = if state.modified.contains(path) { 'M' } else { ' ' };
            format!("{index}{worktree}")
        };
        out.push_str(&format!("{code} {path}\0"));
    }
    for path in &state.untracked {
        out.push_str(&format!("?? {path}\0"));
    }
    out
}

/// Records launches instead of spawning anything
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    launches: Rc<RefCell<Vec<(String, Vec<String>)>>>,
}

impl RecordingLauncher {
    pub fn launches(&self) -> Vec<(String, Vec<String>)> {
        self.launches.borrow().clone()
    }
}

impl ToolLauncher for RecordingLauncher {
    fn launch(&self, tool: &str, args: &[String], _workdir: &Path) -> Result<()> {
        self.launches
            .borrow_mut()
            .push((tool.to_string(), args.to_vec()));
        Ok(())
    }
}
