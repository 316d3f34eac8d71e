use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

extern "C" fn swallow(_: nix::libc::c_int) {}

/// Keep Ctrl+C from killing the shell.
///
/// A caught signal goes back to its default action across `exec`, so stages
/// spawned afterwards still die on SIGINT. `SIG_IGN` would be inherited.
pub fn ignore_interrupts() -> nix::Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(swallow),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    unsafe { sigaction(Signal::SIGINT, &action) }?;
    Ok(())
}
