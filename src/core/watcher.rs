//! Repository change notifications and the loop that turns them into rescans.
//!
//! The watcher thread only ever sends a payload-free notification into a channel of
//! capacity one. A send that finds the slot occupied is dropped, and the event loop
//! drains at most one notification per cycle, so any burst of changes during a rescan
//! costs exactly one follow-up rescan.

use crate::core::controller::Controller;
use crate::core::error::Result;
use notify::event::{AccessKind, AccessMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError, TrySendError};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Connected notifier and event loop
pub fn channel() -> (Notifier, EventLoop) {
    let (tx, rx) = mpsc::sync_channel(1);
    (
        Notifier { tx },
        EventLoop {
            rx,
            poll: POLL_INTERVAL,
        },
    )
}

/// Sending half, safe to move into the watcher thread
#[derive(Clone)]
pub struct Notifier {
    tx: SyncSender<()>,
}

impl Notifier {
    /// Post "repository changed"; false once the event loop is gone
    pub fn notify(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => {
                log::trace!("Change notification already pending");
                true
            }
            Err(TrySendError::Disconnected(())) => false,
        }
    }
}

pub struct EventLoop {
    rx: Receiver<()>,
    poll: Duration,
}

impl EventLoop {
    /// Handle at most one pending notification; true if a rescan ran
    pub fn pump(&self, controller: &mut Controller) -> bool {
        match self.rx.try_recv() {
            Ok(()) => {
                controller.rescan();
                true
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => false,
        }
    }

    /// Rescan on every notification until the controller quits or every notifier is gone
    pub fn run<F>(&self, controller: &mut Controller, after_rescan: F)
    where
        F: FnMut(&mut Controller),
    {
        self.run_until(controller, || false, after_rescan);
    }

    /// Like [`EventLoop::run`], but also leaves once `stop` returns true. `stop` is
    /// polled before every wait, so it is seen within one poll interval.
    pub fn run_until<S, F>(&self, controller: &mut Controller, mut stop: S, mut after_rescan: F)
    where
        S: FnMut() -> bool,
        F: FnMut(&mut Controller),
    {
        while !controller.is_quitting() {
            if stop() {
                log::debug!("Stop requested; leaving event loop");
                break;
            }
            match self.rx.recv_timeout(self.poll) {
                Ok(()) => {
                    controller.rescan();
                    after_rescan(controller);
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("All change notifiers dropped; leaving event loop");
                    break;
                }
            }
        }
    }
}

/// Decides which filesystem events mean the repository changed
#[derive(Debug, Clone)]
struct ChangeFilter {
    git_dir: PathBuf,
}

impl ChangeFilter {
    fn new(git_dir: &Path) -> Self {
        Self {
            git_dir: git_dir.canonicalize().unwrap_or_else(|_| git_dir.to_path_buf()),
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        match &event.kind {
            // Our own git reads must not trigger a refresh loop
            EventKind::Access(AccessKind::Close(AccessMode::Write)) => {}
            EventKind::Access(_) => return false,
            _ => {}
        }
        if event.need_rescan() || event.paths.is_empty() {
            return true;
        }
        event.paths.iter().any(|path| self.path_matters(path))
    }

    fn path_matters(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.git_dir) else {
            return true;
        };
        if relative
            .extension()
            .is_some_and(|extension| extension == "lock")
        {
            return false;
        }
        let Some(first) = relative.components().next() else {
            return false;
        };
        let first = first.as_os_str().to_string_lossy();
        first == "index" || first == "HEAD" || first == "refs" || first.starts_with("MERGE_")
    }
}

/// Keeps a filesystem watcher alive; dropping it stops notifications
pub struct RepoWatcher {
    _watcher: RecommendedWatcher,
}

impl RepoWatcher {
    pub fn start(workdir: &Path, git_dir: &Path, notifier: Notifier) -> Result<Self> {
        let filter = ChangeFilter::new(git_dir);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if filter.is_relevant(&event) {
                    notifier.notify();
                }
            }
            Err(e) => {
                log::warn!("File watcher error: {e}");
                notifier.notify();
            }
        })?;

        watcher.watch(workdir, RecursiveMode::Recursive)?;
        if !git_dir.starts_with(workdir) {
            watcher.watch(git_dir, RecursiveMode::Recursive)?;
        }
        log::debug!("Watching {} for changes", workdir.display());
        Ok(Self { _watcher: watcher })
    }
}
