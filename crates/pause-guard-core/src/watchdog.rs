//! External-window watchdog.
//!
//! Detects, without relying on provider callbacks, that the externally
//! opened secure window has been closed, and triggers a resume exactly once
//! per opened window. Two triggers race each other: a fixed-interval poll of
//! the window's closed flag, and a focus-return shortcut that fires when the
//! host window regains input focus. Taking the window handle out of its slot
//! under the controller lock is the shared cancellation token: the first
//! trigger to take it wins, and the other path sees the empty slot and
//! skips.

use crate::{controller::RecordingController, provider::RecordingProvider};

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Outcome of one look at the tracked window.
enum WindowObservation {
    /// Window present and still open; keep watching.
    StillOpen,
    /// Window was closed by the user while paused; the handle has been
    /// taken, resume now.
    ClosedResumeNeeded,
    /// Nothing left to watch: no window tracked, the other trigger already
    /// handled it, or the closure needs no resume.
    Finished,
}

/// Spawn the recurring closed-window poll for the currently tracked window.
pub(crate) fn spawn_window_poll<P: RecordingProvider>(
    controller: RecordingController<P>,
    poll_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(poll_interval).await;
            match observe(&controller).await {
                WindowObservation::StillOpen => {}
                WindowObservation::ClosedResumeNeeded => {
                    info!("Secure window closed, resuming recording");
                    if let Err(error) = controller.resume().await {
                        error!(error = %error, "Resume after window closure failed");
                    }
                    break;
                }
                WindowObservation::Finished => break,
            }
        }
    })
}

/// Focus-return shortcut: called when the host window regains input focus.
///
/// If the tracked window is already closed this short-circuits the poll and
/// resumes immediately, improving perceived latency over waiting for the
/// next tick.
pub(crate) async fn handle_focus_gained<P: RecordingProvider>(
    controller: &RecordingController<P>,
) {
    match observe(controller).await {
        WindowObservation::ClosedResumeNeeded => {
            info!("Focus returned with secure window closed, resuming recording");
            if let Err(error) = controller.resume().await {
                error!(error = %error, "Resume after focus return failed");
            }
        }
        WindowObservation::StillOpen | WindowObservation::Finished => {}
    }
}

/// One guarded look at the window slot. On first observed closure the handle
/// is taken out of the slot, which is what makes the two triggers mutually
/// exclusive.
async fn observe<P: RecordingProvider>(
    controller: &RecordingController<P>,
) -> WindowObservation {
    let mut inner = controller.inner.lock().await;

    let closed = match inner.window.as_ref() {
        Some(window) => window.is_closed(),
        None => return WindowObservation::Finished,
    };
    if !closed {
        return WindowObservation::StillOpen;
    }

    inner.window = None;
    if inner.session.is_paused() {
        WindowObservation::ClosedResumeNeeded
    } else {
        debug!("Secure window closed while not paused, nothing to resume");
        WindowObservation::Finished
    }
}
