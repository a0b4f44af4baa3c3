use crate::commands::session::{open_controller, report};
use crate::commands::status::print_status;
use crate::core::{error::Result, print_error, print_info, watcher};

/// Print status, then reprint it after every change until interrupted
pub fn execute_watch() -> Result<()> {
    let mut controller = open_controller(false)?;
    controller.startup();
    report(&mut controller)?;
    print_status(&controller);

    let (notifier, events) = watcher::channel();
    let workdir = controller.repo().workdir().to_path_buf();
    let git_dir = controller.repo().git_dir().to_path_buf();
    let _watcher = watcher::RepoWatcher::start(&workdir, &git_dir, notifier)?;
    let interrupted = interrupt_flag()?;
    print_info("Watching for changes (Ctrl-C to stop)");

    events.run_until(&mut controller, interrupted, |c| {
        if let Err(e) = report(c) {
            print_error(&e.to_string());
        }
        print_status(c);
    });

    log::debug!("Leaving watch; saving settings and cleaning up");
    controller.quit();
    report(&mut controller)
}

/// Returns true once SIGINT or SIGTERM has arrived. Registering replaces the
/// default handlers, so the loop can leave through `quit()`.
#[cfg(unix)]
fn interrupt_flag() -> Result<impl FnMut() -> bool> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(move || signals.pending().next().is_some())
}

#[cfg(not(unix))]
fn interrupt_flag() -> Result<impl FnMut() -> bool> {
    Ok(|| false)
}
