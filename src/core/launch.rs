//! Fire-and-forget launching of external tools (editor, diff editor, history browser).

use crate::core::error::{Result, StagehandError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Seam for starting external programs
pub trait ToolLauncher {
    fn launch(&self, tool: &str, args: &[String], workdir: &Path) -> Result<()>;
}

/// Spawns real processes
pub struct SystemLauncher;

impl ToolLauncher for SystemLauncher {
    fn launch(&self, tool: &str, args: &[String], workdir: &Path) -> Result<()> {
        spawn_detached(tool, args, workdir)
    }
}

/// Split a configured tool such as `"code --wait"` into program and leading arguments
pub fn split_tool(tool: &str) -> Option<(String, Vec<String>)> {
    let mut parts = tool.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Start `tool` with `args` in `workdir` without waiting for it to exit
pub fn spawn_detached(tool: &str, args: &[String], workdir: &Path) -> Result<()> {
    let (program, mut full_args) = split_tool(tool).ok_or_else(|| {
        StagehandError::spawn(
            tool,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "no program configured"),
        )
    })?;
    full_args.extend(args.iter().cloned());

    log::debug!("Launching {} {:?}", program, full_args);
    Command::new(&program)
        .args(&full_args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| StagehandError::spawn(program, e))
}
