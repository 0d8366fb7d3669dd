//! Process signal listener feeding the engine's [`Interrupt`].

use std::io;

use tokio::task::JoinHandle;
use tracing::debug;

use super::interrupt::Interrupt;

/// Install Ctrl+C (and, on unix, SIGTERM) handlers and spawn a task that
/// raises `interrupt` when one fires.
///
/// Handlers are registered before this returns, so a signal delivered while
/// the foreground loop has not yet yielded is still recorded. The task writes
/// the flag once and exits; the handlers stay installed for the life of the
/// process, so a second signal is absorbed rather than killing the process
/// mid-line. Must be called inside a tokio runtime.
#[cfg(unix)]
pub fn spawn_interrupt_listener(interrupt: Interrupt) -> io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
        if interrupt.raise() {
            debug!("termination signal received");
        }
    }))
}

#[cfg(windows)]
pub fn spawn_interrupt_listener(interrupt: Interrupt) -> io::Result<JoinHandle<()>> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c()?;

    Ok(tokio::spawn(async move {
        ctrl_c.recv().await;
        if interrupt.raise() {
            debug!("termination signal received");
        }
    }))
}
