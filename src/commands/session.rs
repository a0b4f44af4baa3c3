//! Shared setup for every command: open the repository, load settings, build the
//! controller and report what the gesture logged.

use crate::core::{
    controller::{Confirm, Controller},
    dispatch::{Gesture, GestureTable},
    error::{Result, StagehandError},
    git::GitRepo,
    print_log_entries,
    settings::GuiSettings,
};
use colored::*;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::OnceLock;

/// Asks on the terminal; `--yes` answers every question up front
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("\n{}\n{} {} ", title.yellow().bold(), message, "[y/N]".bright_black());
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        }
    }
}

/// Controller for the repository around the current directory, already rescanned
pub fn open_controller(assume_yes: bool) -> Result<Controller> {
    let current_dir = env::current_dir()?;
    let repo = GitRepo::open(&current_dir)?;
    let settings = GuiSettings::load_or_create().unwrap_or_else(|e| {
        log::warn!("Using default settings: {e}");
        GuiSettings::default()
    });

    let mut controller = Controller::new(repo, settings).with_confirm(TerminalConfirm::new(assume_yes));
    controller.rescan();
    report(&mut controller)?;
    Ok(controller)
}

/// Print log entries added since the last report; fail when any of them is an error
pub fn report(controller: &mut Controller) -> Result<()> {
    let entries = controller.log_mut().take_new();
    print_log_entries(&entries);
    let count = entries
        .iter()
        .filter(|entry| entry.level == crate::core::LogLevel::Error)
        .count();
    if count > 0 {
        return Err(StagehandError::GestureFailed { count });
    }
    Ok(())
}

/// Run `gesture` and report; tells the user when the gesture changed nothing
pub fn run_gesture<F>(controller: &mut Controller, gesture: F) -> Result<()>
where
    F: FnOnce(&mut Controller),
{
    let rescans = controller.rescan_count();
    let logged = controller.log().entries().len();
    gesture(controller);
    let quiet = controller.rescan_count() == rescans && controller.log().entries().len() == logged;
    report(controller)?;
    if quiet {
        println!("{}", "Nothing to do.".bright_black());
    }
    Ok(())
}

/// Handlers for argument-free gestures, built on first use
pub fn gestures() -> &'static GestureTable {
    static TABLE: OnceLock<GestureTable> = OnceLock::new();
    TABLE.get_or_init(GestureTable::new)
}

/// Run an argument-free gesture through the shared table and report
pub fn dispatch(controller: &mut Controller, gesture: Gesture) -> Result<()> {
    run_gesture(controller, |c| {
        if !gestures().dispatch(gesture, c) {
            log::warn!("No handler for {gesture:?}");
        }
    })
}
