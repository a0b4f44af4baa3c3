//! The refresh controller: every user gesture and every change notification ends up here.
//!
//! The controller owns the repository snapshot, both file lists, the diff pane, the
//! view mode and the commit message. Its central operation is [`Controller::rescan`],
//! which rebuilds the snapshot from git and maps the previous selection back onto the
//! rebuilt lists by path.
//!
//! # Error handling
//! Nothing here is fatal. Git failures and bad input are written to the
//! [`CommandLog`]; mutations rescan afterwards whether they succeeded or not, read-only
//! queries never do. Gestures without a selection to act on return silently, as do
//! declined confirmations.

use crate::core::diff_parser::PatchScope;
use crate::core::diff_selection::{DiffOperation, DiffSelectionRequest};
use crate::core::dirs::get_temp_directory;
use crate::core::error::{Result, StagehandError};
use crate::core::git::{CommandOutput, CommitSummary, GitRepo, SearchKind};
use crate::core::launch::{SystemLauncher, ToolLauncher};
use crate::core::log_sink::CommandLog;
use crate::core::repo_state::RepositoryState;
use crate::core::selection::{DiffPane, ListView, SelectionSnapshot};
use crate::core::settings::GuiSettings;
use crate::core::tmpfiles::TempFiles;
use crate::core::view_mode::{
    diff_menu, staged_menu, unstaged_menu, BranchDiffContext, FocusFacts, MenuAction, ModeState,
    ViewMode,
};
use std::path::{Path, PathBuf};

const COMMIT_MESSAGE_HELP: &str = "Please supply a commit message.\n\n\
A good commit message has the following format:\n\n\
- First line: Describe in one sentence what you did.\n\
- Second line: Blank\n\
- Remaining lines: Describe why this change is good.";

const NOTHING_STAGED: &str =
    "No changes to commit.\n\nYou must stage at least 1 file before you can commit.";

const UNDO_TITLE: &str = "Destroy Local Changes?";
const UNDO_MESSAGE: &str = "This operation will drop uncommitted changes.\nContinue?";

/// Asks the user a yes/no question before destructive operations
pub trait Confirm {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str, &str) -> bool,
{
    fn confirm(&self, title: &str, message: &str) -> bool {
        self(title, message)
    }
}

/// Fixed answer to every confirmation
pub struct AlwaysAnswer(pub bool);

impl Confirm for AlwaysAnswer {
    fn confirm(&self, title: &str, _message: &str) -> bool {
        log::debug!("Confirmation '{}' answered {}", title, self.0);
        self.0
    }
}

pub struct Controller {
    repo: GitRepo,
    state: RepositoryState,
    unstaged: ListView,
    staged: ListView,
    diff: DiffPane,
    mode: ModeState,
    settings: GuiSettings,
    settings_dir: Option<PathBuf>,
    commit_msg: String,
    amend: bool,
    show_untracked: bool,
    merge_msg_imported: bool,
    title: String,
    log: CommandLog,
    tmp: TempFiles,
    confirm: Box<dyn Confirm>,
    launcher: Box<dyn ToolLauncher>,
    rescans: usize,
    quitting: bool,
}

impl Controller {
    /// Controller that declines every confirmation until one is installed
    pub fn new(repo: GitRepo, settings: GuiSettings) -> Self {
        let tmp = TempFiles::for_repo(repo.workdir(), get_temp_directory());
        Self {
            show_untracked: settings.show_untracked,
            title: repo.paths().project_name(),
            repo,
            state: RepositoryState::default(),
            unstaged: ListView::new(),
            staged: ListView::new(),
            diff: DiffPane::default(),
            mode: ModeState::new(),
            settings,
            settings_dir: None,
            commit_msg: String::new(),
            amend: false,
            merge_msg_imported: false,
            log: CommandLog::new(),
            tmp,
            confirm: Box::new(AlwaysAnswer(false)),
            launcher: Box::new(SystemLauncher),
            rescans: 0,
            quitting: false,
        }
    }

    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn with_launcher(mut self, launcher: impl ToolLauncher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    /// Save settings here instead of the user's config directory
    pub fn with_settings_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings_dir = Some(dir.into());
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp = TempFiles::for_repo(self.repo.workdir(), dir);
        self
    }

    /// First rescan plus the banner with git and stagehand versions
    pub fn startup(&mut self) {
        self.rescan();
        let git_version = match self.repo.version() {
            Ok(version) => version,
            Err(e) => {
                self.log.error(e.to_string());
                "git version unknown".to_string()
            }
        };
        self.log.info(format!(
            "{}\nstagehand version {}\nCurrent Branch: {}",
            git_version,
            env!("CARGO_PKG_VERSION"),
            self.state.current_branch
        ));
    }

    // Accessors

    pub fn mode(&self) -> &ViewMode {
        self.mode.current()
    }

    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    pub fn repo(&self) -> &GitRepo {
        &self.repo
    }

    pub fn unstaged(&self) -> &ListView {
        &self.unstaged
    }

    pub fn staged(&self) -> &ListView {
        &self.staged
    }

    pub fn diff(&self) -> &DiffPane {
        &self.diff
    }

    pub fn diff_mut(&mut self) -> &mut DiffPane {
        &mut self.diff
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut CommandLog {
        &mut self.log
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn commit_message(&self) -> &str {
        &self.commit_msg
    }

    pub fn amend(&self) -> bool {
        self.amend
    }

    pub fn show_untracked(&self) -> bool {
        self.show_untracked
    }

    pub fn settings(&self) -> &GuiSettings {
        &self.settings
    }

    pub fn rescan_count(&self) -> usize {
        self.rescans
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    // Refresh

    /// Rebuild repository state and restore the selection by path
    pub fn rescan(&mut self) {
        self.rescans += 1;
        let unstaged_snapshot = SelectionSnapshot::capture(&self.unstaged);
        let staged_snapshot = SelectionSnapshot::capture(&self.staged);
        let scroll = self.diff.scroll_offset();

        match RepositoryState::load(&self.repo) {
            Ok(state) => self.state = state,
            Err(e) => {
                self.log.error(format!("Could not read repository status: {e}"));
                return;
            }
        }

        self.unstaged
            .set_items(self.state.unstaged_items(self.show_untracked));
        self.staged.set_items(self.state.staged_files.clone());
        let unstaged = unstaged_snapshot.restore(&mut self.unstaged);
        let staged = staged_snapshot.restore(&mut self.staged);

        if let Some(context) = self.mode.current().branch_context().cloned() {
            self.render_branch_diff(&context);
            self.diff.scroll_to(scroll);
        } else if unstaged.focused_row.is_some() {
            self.view_diff(false);
            self.diff.scroll_to(scroll);
        } else if staged.focused_row.is_some() {
            self.view_diff(true);
            self.diff.scroll_to(scroll);
        } else {
            self.mode.reset();
            self.diff.clear();
        }

        self.title = format!(
            "{} [{}]",
            self.repo.paths().project_name(),
            self.state.current_branch
        );
        self.import_merge_message();
    }

    fn import_merge_message(&mut self) {
        if self.merge_msg_imported {
            return;
        }
        let git_dir = self.repo.git_dir();
        let Some(path) = ["MERGE_MSG", "SQUASH_MSG"]
            .iter()
            .map(|name| git_dir.join(name))
            .find(|path| path.is_file())
        else {
            return;
        };
        match std::fs::read_to_string(&path) {
            Ok(message) => {
                log::debug!("Imported commit message from {}", path.display());
                self.merge_msg_imported = true;
                self.commit_msg = message;
            }
            Err(e) => self.log.error(format!("Could not read {}: {}", path.display(), e)),
        }
    }

    /// Log the outcome of a mutation and rescan regardless
    fn finish(&mut self, result: Result<CommandOutput>) {
        self.record(result);
        self.rescan();
    }

    fn record(&mut self, result: Result<CommandOutput>) {
        match result {
            Ok(output) => self.log.command(&output),
            Err(e) => self.log.error(e.to_string()),
        }
    }

    // List gestures

    pub fn click_unstaged(&mut self, row: usize) {
        if self.unstaged.click(row) {
            self.staged.clear_selection();
        }
        self.view_diff(false);
    }

    pub fn click_staged(&mut self, row: usize) {
        if self.staged.click(row) {
            self.unstaged.clear_selection();
        }
        self.view_diff(true);
    }

    /// Select several unstaged rows; the first one is focused and shown
    pub fn select_unstaged(&mut self, rows: &[usize]) {
        self.unstaged.select_rows(rows);
        if self.unstaged.has_selection() {
            self.staged.clear_selection();
        }
        self.view_diff(false);
    }

    pub fn select_staged(&mut self, rows: &[usize]) {
        self.staged.select_rows(rows);
        if self.staged.has_selection() {
            self.unstaged.clear_selection();
        }
        self.view_diff(true);
    }

    pub fn double_click_unstaged(&mut self, row: usize) {
        self.click_unstaged(row);
        self.stage_selected();
    }

    pub fn double_click_staged(&mut self, row: usize) {
        self.click_staged(row);
        self.unstage_selected();
    }

    pub fn stage_selected(&mut self) {
        let items = self.unstaged.selected_items();
        if items.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.add(&items);
        self.finish(result);
    }

    pub fn unstage_selected(&mut self) {
        let items = self.staged.selected_items();
        if items.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.reset(&items);
        self.finish(result);
    }

    /// Check selected tracked files out of HEAD, dropping their changes
    pub fn undo_changes(&mut self) {
        let selected = self.unstaged.selected_items();
        if selected.is_empty() {
            return;
        }
        let tracked: Vec<String> = selected
            .into_iter()
            .filter(|path| !self.state.is_untracked(path))
            .collect();
        if tracked.is_empty() {
            self.log.error("No files selected for checkout from HEAD.");
            return;
        }
        if !self.confirm.confirm(UNDO_TITLE, UNDO_MESSAGE) {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.checkout_from_head(&tracked);
        self.finish(result);
    }

    pub fn stage_modified(&mut self) {
        let modified = self.state.modified_files.clone();
        if modified.is_empty() {
            self.log.info("No modified files to stage.");
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.add(&modified);
        self.finish(result);
    }

    pub fn stage_untracked(&mut self) {
        let untracked = self.state.untracked_files.clone();
        if untracked.is_empty() {
            self.log.info("No untracked files to stage.");
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.add_untracked(&untracked);
        self.finish(result);
    }

    pub fn unstage_all(&mut self) {
        self.mode.leave_branch();
        let result = self.repo.reset_all();
        self.finish(result);
    }

    pub fn set_show_untracked(&mut self, show: bool) {
        self.show_untracked = show;
        self.settings.show_untracked = show;
        self.rescan();
    }

    pub fn toggle_untracked(&mut self) {
        let show = !self.show_untracked;
        self.set_show_untracked(show);
    }

    // Diff views

    /// Show the diff of the focused item of the staged or unstaged list
    pub fn view_diff(&mut self, staged: bool) {
        if staged {
            self.mode.enter_index();
        } else {
            self.mode.enter_worktree();
        }
        let list = if staged { &self.staged } else { &self.unstaged };
        let Some(path) = list.focused_item().map(str::to_string) else {
            self.mode.reset();
            self.diff.clear();
            return;
        };

        let info = self.state.describe(&path, staged);
        let text = if !staged && self.state.is_untracked(&path) {
            std::fs::read(self.repo.workdir().join(&path))
                .map(|bytes| untracked_preview(&bytes))
                .map_err(StagehandError::from)
        } else {
            self.repo.diff_file(&path, staged)
        };
        match text {
            Ok(text) => self.diff.set_display(text, info),
            Err(e) => {
                self.log.error(e.to_string());
                self.diff.set_display(String::new(), info);
            }
        }
    }

    pub fn show_diffstat(&mut self) {
        self.mode.reset();
        match self.repo.diffstat() {
            Ok(text) => self.diff.set_display(text, "Diffstat"),
            Err(e) => self.log.error(e.to_string()),
        }
    }

    pub fn show_index(&mut self) {
        self.mode.reset();
        match self.repo.diff_index() {
            Ok(text) => self.diff.set_display(text, "Index"),
            Err(e) => self.log.error(e.to_string()),
        }
    }

    /// Files that differ between the working tree and `branch`
    pub fn branch_files(&mut self, branch: &str) -> Vec<String> {
        self.repo.files_changed_against(branch).unwrap_or_else(|e| {
            self.log.error(e.to_string());
            Vec::new()
        })
    }

    /// Show how `filename` would change to match `branch` and enter branch mode
    pub fn diff_branch(&mut self, branch: &str, filename: &str) {
        let context = match BranchDiffContext::new(branch, filename) {
            Ok(context) => context,
            Err(e) => {
                self.log.error(e.to_string());
                return;
            }
        };
        self.render_branch_diff(&context);
        self.mode.enter_branch(context);
    }

    fn render_branch_diff(&mut self, context: &BranchDiffContext) {
        let info = format!(
            "Diff of \"{}\" between the work tree and {}",
            context.filename(),
            context.branch()
        );
        match self
            .repo
            .diff_against_branch(context.branch(), context.filename())
        {
            Ok(text) => self.diff.set_display(text, info),
            Err(e) => {
                self.log.error(e.to_string());
                self.diff.set_display(String::new(), info);
            }
        }
    }

    pub fn grep(&mut self, pattern: &str) {
        if pattern.is_empty() {
            return;
        }
        self.mode.reset();
        match self.repo.grep(pattern) {
            Ok(text) => self.diff.set_display(text, format!("grep {pattern}")),
            Err(e) => self.log.error(e.to_string()),
        }
    }

    /// Commits matching `query`; an empty query logs an error and finds nothing
    pub fn search_commits(
        &mut self,
        kind: SearchKind,
        query: &str,
        max: usize,
    ) -> Vec<CommitSummary> {
        if query.trim().is_empty() {
            self.log.error("Please supply a search term.");
            return Vec::new();
        }
        self.repo
            .search_commits(kind, query, max)
            .unwrap_or_else(|e| {
                self.log.error(e.to_string());
                Vec::new()
            })
    }

    /// Files tracked on `branch`, or on the current branch when it is empty
    pub fn browse_branch(&mut self, branch: &str) -> Vec<String> {
        let branch = self.browse_target(branch);
        self.repo.tree_files(&branch).unwrap_or_else(|e| {
            self.log.error(e.to_string());
            Vec::new()
        })
    }

    /// Show `path` as it is on `branch` (the current branch when empty)
    pub fn browse_file(&mut self, branch: &str, path: &str) {
        if path.is_empty() {
            self.log.error("Please supply a file name.");
            return;
        }
        let branch = self.browse_target(branch);
        self.mode.reset();
        let info = format!("{path} on {branch}");
        match self.repo.show_blob(&branch, path) {
            Ok(text) => self.diff.set_display(text, info),
            Err(e) => self.log.error(e.to_string()),
        }
    }

    fn browse_target(&self, branch: &str) -> String {
        if branch.is_empty() {
            self.state.current_branch.clone()
        } else {
            branch.to_string()
        }
    }

    // Hunk operations

    pub fn stage_hunk(&mut self) {
        self.process_diff_selection(DiffOperation::Stage, self.hunk_scope());
    }

    pub fn stage_selected_lines(&mut self) {
        self.process_diff_selection(DiffOperation::Stage, self.lines_scope());
    }

    pub fn unstage_hunk(&mut self) {
        self.process_diff_selection(DiffOperation::Unstage, self.hunk_scope());
    }

    pub fn unstage_selected_lines(&mut self) {
        self.process_diff_selection(DiffOperation::Unstage, self.lines_scope());
    }

    pub fn undo_hunk(&mut self) {
        self.process_diff_selection(DiffOperation::Undo, self.hunk_scope());
    }

    pub fn undo_selection(&mut self) {
        self.process_diff_selection(DiffOperation::Undo, self.lines_scope());
    }

    pub fn apply_diff_to_worktree(&mut self) {
        self.process_diff_selection(DiffOperation::Apply, self.hunk_scope());
    }

    pub fn apply_diff_selection_to_worktree(&mut self) {
        self.process_diff_selection(DiffOperation::Apply, self.lines_scope());
    }

    /// Apply every hunk of the displayed branch diff
    pub fn apply_whole_diff_to_worktree(&mut self) {
        self.process_diff_selection(DiffOperation::Apply, Some(PatchScope::WholeFile));
    }

    fn hunk_scope(&self) -> Option<PatchScope> {
        Some(PatchScope::Hunk {
            line: self.diff.cursor_line(),
        })
    }

    fn lines_scope(&self) -> Option<PatchScope> {
        self.diff
            .selection()
            .map(|(start, end)| PatchScope::Lines { start, end })
    }

    fn process_diff_selection(&mut self, operation: DiffOperation, scope: Option<PatchScope>) {
        let Some(scope) = scope else {
            return;
        };
        let Some(request) = DiffSelectionRequest::resolve(
            operation,
            self.mode.current(),
            self.unstaged.focused_item(),
            self.staged.focused_item(),
            scope,
        ) else {
            log::debug!("{} is not available in {} mode", operation.verb(), self.mode.current());
            return;
        };
        if request.is_destructive() && !self.confirm.confirm(UNDO_TITLE, UNDO_MESSAGE) {
            return;
        }

        match request.execute(&self.repo, self.diff.text()) {
            Ok(Some(output)) => self.log.command(&output),
            Ok(None) => return,
            Err(StagehandError::NoHunkAtLine { line }) => {
                log::debug!("No hunk under diff line {line}");
                return;
            }
            Err(e) => self.log.error(e.to_string()),
        }
        self.rescan();
    }

    // Commit message

    pub fn set_commit_message(&mut self, message: impl Into<String>) {
        self.commit_msg = message.into();
    }

    pub fn set_amend(&mut self, amend: bool) {
        self.amend = amend;
    }

    pub fn commit(&mut self) {
        if self.commit_msg.trim().is_empty() {
            self.log.error(COMMIT_MESSAGE_HELP);
            return;
        }
        if self.state.staged_files.is_empty() && !self.amend {
            self.log.error(NOTHING_STAGED);
            return;
        }
        self.mode.leave_branch();
        match self.repo.commit(&self.commit_msg, self.amend) {
            Ok(output) => {
                self.amend = false;
                self.commit_msg.clear();
                self.log.command(&output);
            }
            Err(e) => self.log.error(e.to_string()),
        }
        self.rescan();
    }

    /// Append a `Signed-off-by` line for the configured identity
    pub fn add_signoff(&mut self) {
        let identity = self
            .repo
            .config_value("user.name")
            .and_then(|name| Ok((name, self.repo.config_value("user.email")?)));
        let (name, email) = match identity {
            Ok((Some(name), Some(email))) => (name, email),
            Ok(_) => {
                self.log.error("Set user.name and user.email to sign off commits.");
                return;
            }
            Err(e) => {
                self.log.error(e.to_string());
                return;
            }
        };
        let signoff = format!("Signed-off-by: {name} <{email}>");
        if self.commit_msg.contains(&signoff) {
            return;
        }
        let trimmed = self.commit_msg.trim_end();
        self.commit_msg = if trimmed.is_empty() {
            format!("\n\n{signoff}")
        } else {
            format!("{trimmed}\n\n{signoff}")
        };
    }

    pub fn load_commit_message(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(message) if !message.is_empty() => self.commit_msg = message,
            Ok(_) => {}
            Err(e) => self
                .log
                .error(format!("Could not read {}: {}", path.display(), e)),
        }
    }

    pub fn load_previous_commit_message(&mut self) {
        match self.repo.previous_commit_message() {
            Ok(message) => self.commit_msg = message,
            Err(e) => self.log.error(e.to_string()),
        }
    }

    // Branches and history

    pub fn local_branches(&mut self) -> Vec<String> {
        self.repo.local_branches().unwrap_or_else(|e| {
            self.log.error(e.to_string());
            Vec::new()
        })
    }

    pub fn all_branches(&mut self) -> Vec<String> {
        self.repo.all_branches().unwrap_or_else(|e| {
            self.log.error(e.to_string());
            Vec::new()
        })
    }

    pub fn log_entries(&mut self, max: usize, all: bool) -> Vec<CommitSummary> {
        self.repo.log(max, all).unwrap_or_else(|e| {
            self.log.error(e.to_string());
            Vec::new()
        })
    }

    pub fn checkout_branch(&mut self, branch: &str) {
        if branch.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.checkout_branch(branch);
        self.finish(result);
    }

    pub fn create_branch(&mut self, name: &str, start: &str, checkout: bool) {
        if name.trim().is_empty() {
            self.log.error("Please supply a branch name.");
            return;
        }
        let start = if start.is_empty() { "HEAD" } else { start };
        self.mode.leave_branch();
        let result = self.repo.create_branch(name, start, checkout);
        self.finish(result);
    }

    pub fn delete_branch(&mut self, branch: &str) {
        if branch.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.delete_branch(branch);
        self.finish(result);
    }

    pub fn rebase(&mut self, branch: &str) {
        if branch.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.rebase(branch);
        self.finish(result);
    }

    pub fn merge_local(&mut self, branch: &str) {
        if branch.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.merge(branch);
        self.finish(result);
    }

    pub fn abort_merge(&mut self) {
        if !self.confirm.confirm(
            "Abort Merge?",
            "Aborting the current merge will cause *ALL* uncommitted changes to be lost.\nContinue?",
        ) {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.abort_merge();
        self.finish(result);
    }

    pub fn cherry_pick(&mut self, revs: &[String]) {
        if revs.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.cherry_pick(revs);
        self.finish(result);
    }

    pub fn stash_save(&mut self, message: Option<&str>) {
        self.mode.leave_branch();
        let result = self.repo.stash_save(message);
        self.finish(result);
    }

    pub fn stash_apply(&mut self, stash: &str) {
        if stash.is_empty() {
            return;
        }
        self.mode.leave_branch();
        let result = self.repo.stash_apply(stash);
        self.finish(result);
    }

    /// Write each revision as a numbered patch, oldest first as given
    pub fn export_patches(&mut self, revs: &[String], output_dir: &Path) {
        for (number, rev) in revs.iter().enumerate() {
            let result = self.repo.format_patch(rev, number + 1, output_dir);
            let failed = result.is_err();
            self.record(result);
            if failed {
                break;
            }
        }
    }

    // External tools

    fn focused(&self, staged: bool) -> Option<String> {
        let list = if staged { &self.staged } else { &self.unstaged };
        list.focused_item().map(str::to_string)
    }

    fn launch(&mut self, tool: &str, args: &[String]) {
        if let Err(e) = self.launcher.launch(tool, args, self.repo.workdir()) {
            self.log.error(e.to_string());
        }
    }

    pub fn launch_editor(&mut self, staged: bool) {
        let Some(path) = self.focused(staged) else {
            return;
        };
        let editor = self.settings.editor.clone();
        self.launch(&editor, &[path]);
    }

    /// Open the diff editor on the HEAD version against the working file
    pub fn launch_diff_editor(&mut self, staged: bool) {
        let Some(path) = self.focused(staged) else {
            return;
        };
        self.diff_edit("HEAD", &path);
    }

    pub fn diffedit_branch(&mut self, branch: &str, filename: &str) {
        if branch.is_empty() || filename.is_empty() {
            return;
        }
        self.diff_edit(branch, filename);
        self.mode.reset();
    }

    fn diff_edit(&mut self, rev: &str, path: &str) {
        let written = self
            .repo
            .show_blob(rev, path)
            .and_then(|contents| self.tmp.write(rev, path, &contents));
        let tmpfile = match written {
            Ok(tmpfile) => tmpfile.display().to_string(),
            Err(e) => {
                self.log.error(e.to_string());
                return;
            }
        };
        let args = if self.settings.edit_diff_reverse {
            vec![tmpfile, path.to_string()]
        } else {
            vec![path.to_string(), tmpfile]
        };
        let tool = self.settings.diff_editor.clone();
        self.launch(&tool, &args);
    }

    pub fn launch_mergetool(&mut self) {
        let Some(path) = self.focused(false) else {
            return;
        };
        if !self.state.is_unmerged(&path) {
            return;
        }
        let args = vec![
            "-e".to_string(),
            "git".to_string(),
            "mergetool".to_string(),
            "-t".to_string(),
            self.settings.diff_editor.clone(),
            path,
        ];
        self.launch("xterm", &args);
    }

    pub fn visualize(&mut self, all: bool) {
        let target = if all {
            "--all".to_string()
        } else {
            self.state.current_branch.clone()
        };
        let browser = self.settings.history_browser.clone();
        self.launch(&browser, &[target]);
    }

    // Menus

    fn focus_facts(&self) -> FocusFacts {
        match self.unstaged.focused_item() {
            Some(path) => FocusFacts {
                has_item: true,
                tracked: !self.state.is_untracked(path),
                unmerged: self.state.is_unmerged(path),
            },
            None => FocusFacts::default(),
        }
    }

    pub fn diff_menu(&self) -> Vec<MenuAction> {
        diff_menu(self.mode.current(), self.focus_facts())
    }

    pub fn unstaged_menu(&self) -> Vec<MenuAction> {
        unstaged_menu(self.mode.current(), self.focus_facts())
    }

    pub fn staged_menu(&self) -> Vec<MenuAction> {
        staged_menu()
    }

    // Window

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.settings.move_to(x, y);
    }

    pub fn resize_to(&mut self, width: u32, height: u32) {
        self.settings.resize_to(width, height);
    }

    /// Persist settings when asked to, sweep temporary files and stop the loop
    pub fn quit(&mut self) {
        if self.settings.remember_settings {
            let saved = match &self.settings_dir {
                Some(dir) => self.settings.save_in(dir),
                None => self.settings.save(),
            };
            if let Err(e) = saved {
                self.log.error(format!("Could not save settings: {e}"));
            }
        }
        match self.tmp.sweep() {
            Ok(removed) => log::debug!("Removed {removed} temporary files"),
            Err(e) => log::warn!("Could not clean temporary files: {e}"),
        }
        self.quitting = true;
    }
}

/// Contents of an untracked file for the diff pane; binary files get a one-line note
fn untracked_preview(bytes: &[u8]) -> String {
    if bytes.contains(&0) {
        return format!("Binary file ({} bytes)\n", bytes.len());
    }
    String::from_utf8_lossy(bytes).into_owned()
}
