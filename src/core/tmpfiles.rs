//! Temporary pre-image files written for the diff-edit flows.
//!
//! Every file lives in the system temp directory under the prefix
//! `stagehand-<md5 of repository path>-`, so [`TempFiles::sweep`] can remove what
//! this repository left behind even after a crash.

use crate::core::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TempFiles {
    dir: PathBuf,
    prefix: String,
}

impl TempFiles {
    pub fn for_repo(repo_path: &Path, dir: impl Into<PathBuf>) -> Self {
        let repo_hash = format!("{:x}", md5::compute(repo_path.to_string_lossy().as_bytes()));
        Self {
            dir: dir.into(),
            prefix: format!("stagehand-{repo_hash}-"),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Write `contents` under a name derived from `rev` and the file's base name
    pub fn write(&self, rev: &str, path: &str, contents: &str) -> Result<PathBuf> {
        let basename = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.replace('/', "_"));
        let rev = rev.replace(['/', ':'], "_");
        let target = self.dir.join(format!("{}{}.{}", self.prefix, rev, basename));
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&target, contents)?;
        log::debug!("Wrote temporary file {}", target.display());
        Ok(target)
    }

    /// Remove every file carrying this repository's prefix; returns how many went
    pub fn sweep(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_name().to_string_lossy().starts_with(&self.prefix) {
                continue;
            }
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("Could not remove {}: {}", entry.path().display(), e),
            }
        }
        Ok(removed)
    }
}
