use clap::{Parser, Subcommand};
use stagehand::commands::*;
use stagehand::core::{
    error::{Result, StagehandError},
    print_error,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(about = "Review, stage and commit git changes one file, hunk or line at a time")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the numbered unstaged and staged lists
    Status {
        /// Print the lists as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stage files by row in the unstaged list
    Stage {
        /// Rows to stage (e.g., "1 3-5,8")
        rows: Vec<String>,
        /// Stage every modified tracked file
        #[arg(long, conflicts_with = "rows")]
        modified: bool,
        /// Stage every untracked file
        #[arg(long, conflicts_with = "rows")]
        untracked: bool,
    },
    /// Unstage files by row in the staged list
    Unstage {
        /// Rows to unstage (e.g., "1 3-5,8")
        rows: Vec<String>,
        /// Unstage everything
        #[arg(long, conflicts_with = "rows")]
        all: bool,
    },
    /// Discard working tree changes of files by row in the unstaged list
    Undo {
        /// Rows to revert (e.g., "1 3-5,8")
        rows: Vec<String>,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the numbered diff of one file
    Diff {
        /// Row of the file
        row: String,
        /// Take the row from the staged list
        #[arg(long)]
        staged: bool,
    },
    /// Stage, unstage or undo the hunk or lines at a diff line number
    Hunk {
        #[arg(value_enum)]
        action: HunkAction,
        /// Row of the file (staged list for `unstage`, unstaged list otherwise)
        row: String,
        /// Diff line number as printed by `stagehand diff`
        #[arg(short, long)]
        line: usize,
        /// Last diff line of a line range; without it the whole hunk is used
        #[arg(long)]
        to: Option<usize>,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show files changed against a branch, or one file's diff against it
    BranchDiff {
        branch: String,
        file: Option<String>,
        /// Open the file in the diff editor against the branch version
        #[arg(long, requires = "file")]
        edit: bool,
    },
    /// Apply a file's diff against a branch (or part of it) to the working tree
    BranchApply {
        branch: String,
        file: String,
        /// Diff line number; without it the whole diff is applied
        #[arg(short, long)]
        line: Option<usize>,
        /// Last diff line of a line range
        #[arg(long, requires = "line")]
        to: Option<usize>,
    },
    /// Commit the staged files
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
        /// Read the commit message from a file
        #[arg(short = 'F', long, conflicts_with = "message")]
        file: Option<PathBuf>,
        /// Amend the previous commit
        #[arg(long)]
        amend: bool,
        /// Append a Signed-off-by line
        #[arg(short, long)]
        signoff: bool,
        /// Start from the previous commit's message
        #[arg(long)]
        reuse_message: bool,
    },
    /// Switch to a local branch
    Checkout { branch: String },
    /// List, create or delete branches
    Branch {
        #[command(subcommand)]
        command: BranchCommand,
    },
    /// Rebase the current branch onto another
    Rebase { branch: String },
    /// Merge a local branch, or abort a merge in progress
    Merge {
        #[arg(required_unless_present = "abort")]
        branch: Option<String>,
        /// Abort the merge in progress
        #[arg(long, conflicts_with = "branch")]
        abort: bool,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Cherry-pick commits onto the current branch
    CherryPick {
        #[arg(required = true)]
        revs: Vec<String>,
    },
    /// Save or apply a stash
    Stash {
        #[command(subcommand)]
        command: StashCommand,
    },
    /// Show a diffstat of the working tree against HEAD
    Diffstat,
    /// Show the index entries that differ from HEAD
    Index,
    /// Show recent commits
    Log {
        /// Number of commits
        #[arg(short = 'n', long, default_value_t = 20)]
        max: usize,
        /// Include every branch
        #[arg(long)]
        all: bool,
    },
    /// Search tracked files
    Grep { pattern: String },
    /// Find commits on any branch by message, author, committer, content or path
    Search {
        query: String,
        /// Which part of each commit to match
        #[arg(long, value_enum, default_value = "message")]
        by: SearchBy,
        /// Number of commits
        #[arg(short = 'n', long, default_value_t = 50)]
        max: usize,
    },
    /// List the files on a branch (the current one by default), or print one of them
    Browse {
        branch: Option<String>,
        #[arg(requires = "branch")]
        file: Option<String>,
    },
    /// Write commits as patch files
    ExportPatches {
        #[arg(required = true)]
        revs: Vec<String>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Open the configured history browser
    Visualize {
        /// Show every branch
        #[arg(long)]
        all: bool,
    },
    /// Open a file in the editor, diff editor or merge tool
    Edit {
        /// Row of the file
        row: String,
        /// Take the row from the staged list
        #[arg(long)]
        staged: bool,
        #[arg(long, value_enum, default_value = "editor")]
        tool: EditTool,
    },
    /// Keep the status on screen and refresh it when the repository changes
    Watch,
    /// Show or change the saved settings
    Settings(SettingsArgs),
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Status { json } => execute_status(json),
        Commands::Stage {
            rows,
            modified,
            untracked,
        } => execute_stage(rows, modified, untracked),
        Commands::Unstage { rows, all } => execute_unstage(rows, all),
        Commands::Undo { rows, yes } => execute_undo(rows, yes),
        Commands::Diff { row, staged } => execute_diff(row, staged),
        Commands::Hunk {
            action,
            row,
            line,
            to,
            yes,
        } => execute_hunk(action, row, line, to, yes),
        Commands::BranchDiff { branch, file, edit } => execute_branch_diff(branch, file, edit),
        Commands::BranchApply {
            branch,
            file,
            line,
            to,
        } => execute_branch_apply(branch, file, line, to),
        Commands::Commit {
            message,
            file,
            amend,
            signoff,
            reuse_message,
        } => execute_commit(CommitArgs {
            message,
            file,
            amend,
            signoff,
            reuse_previous: reuse_message,
        }),
        Commands::Checkout { branch } => execute_checkout(branch),
        Commands::Branch { command } => execute_branch(command),
        Commands::Rebase { branch } => execute_rebase(branch),
        Commands::Merge { branch, abort, yes } => execute_merge(branch, abort, yes),
        Commands::CherryPick { revs } => execute_cherry_pick(revs),
        Commands::Stash { command } => execute_stash(command),
        Commands::Diffstat => execute_diffstat(),
        Commands::Index => execute_index(),
        Commands::Log { max, all } => execute_log(max, all),
        Commands::Grep { pattern } => execute_grep(pattern),
        Commands::Search { query, by, max } => execute_search(query, by, max),
        Commands::Browse { branch, file } => execute_browse(branch, file),
        Commands::ExportPatches { revs, output } => execute_export_patches(revs, output),
        Commands::Visualize { all } => execute_visualize(all),
        Commands::Edit { row, staged, tool } => execute_edit(row, staged, tool),
        Commands::Watch => execute_watch(),
        Commands::Settings(args) => execute_settings(args),
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli.command) {
        match e {
            StagehandError::NotInGitRepo => print_error("Not in a git repository"),
            // Already printed from the command log
            StagehandError::GestureFailed { .. } => {}
            e => print_error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
