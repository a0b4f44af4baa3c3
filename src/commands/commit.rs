use crate::commands::session::{dispatch, open_controller};
use crate::commands::status::print_status;
use crate::core::{error::Result, Gesture};
use std::path::PathBuf;

pub struct CommitArgs {
    pub message: Option<String>,
    pub file: Option<PathBuf>,
    pub amend: bool,
    pub signoff: bool,
    /// Start from the previous commit's message (with `--amend`, reword it)
    pub reuse_previous: bool,
}

/// Commit the staged files; a pending merge message is used when no message is given
pub fn execute_commit(args: CommitArgs) -> Result<()> {
    let mut controller = open_controller(false)?;

    if args.reuse_previous {
        controller.load_previous_commit_message();
    }
    if let Some(path) = &args.file {
        controller.load_commit_message(path);
    }
    if let Some(message) = args.message {
        controller.set_commit_message(message);
    }
    if args.signoff {
        controller.add_signoff();
    }
    controller.set_amend(args.amend);

    dispatch(&mut controller, Gesture::Commit)?;
    print_status(&controller);
    Ok(())
}
