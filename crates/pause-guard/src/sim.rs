//! Simulated provider and browser for driving the widget from a console.
//!
//! Stands in for the real call-control SDK and the embedding browser so the
//! whole pause/resume flow can be exercised interactively. Successful
//! pause/resume calls echo the matching confirmation event back through the
//! event channel, the way the real provider does.

use std::{
    future::Future,
    sync::{
        Arc, Mutex as StdMutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use pause_guard_core::{
    CallEvent, InteractionId, ProviderFailure, RecordingProvider, SecureWindow, WindowOpener,
};
use tokio::sync::mpsc;
use tracing::debug;

/// Simulated call-control provider.
///
/// Accepts every request unless a failure has been injected with
/// [`SimProvider::fail_next_resumes`] or [`SimProvider::fail_next_pauses`].
pub struct SimProvider {
    events: mpsc::Sender<CallEvent>,
    fail_pauses: AtomicUsize,
    fail_resumes: AtomicUsize,
}

impl SimProvider {
    /// Create a provider that echoes confirmation events into `events`.
    pub fn new(events: mpsc::Sender<CallEvent>) -> Self {
        Self {
            events,
            fail_pauses: AtomicUsize::new(0),
            fail_resumes: AtomicUsize::new(0),
        }
    }

    /// Make the next `count` pause requests fail.
    pub fn fail_next_pauses(&self, count: usize) {
        self.fail_pauses.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` resume requests fail.
    pub fn fail_next_resumes(&self, count: usize) {
        self.fail_resumes.store(count, Ordering::SeqCst);
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl RecordingProvider for SimProvider {
    fn pause_recording(
        &self,
        interaction_id: &InteractionId,
    ) -> impl Future<Output = Result<(), ProviderFailure>> + Send {
        let failed = Self::take_failure(&self.fail_pauses);
        let events = self.events.clone();
        let interaction_id = interaction_id.clone();
        async move {
            if failed {
                return Err(ProviderFailure::new("simulated pause failure"));
            }
            debug!(interaction_id = %interaction_id, "Simulated pause accepted");
            let _ = events.send(CallEvent::RecordingPaused).await;
            Ok(())
        }
    }

    fn resume_recording(
        &self,
        interaction_id: &InteractionId,
    ) -> impl Future<Output = Result<(), ProviderFailure>> + Send {
        let failed = Self::take_failure(&self.fail_resumes);
        let events = self.events.clone();
        let interaction_id = interaction_id.clone();
        async move {
            if failed {
                return Err(ProviderFailure::new("simulated resume failure"));
            }
            debug!(interaction_id = %interaction_id, "Simulated resume accepted");
            let _ = events.send(CallEvent::RecordingResumed).await;
            Ok(())
        }
    }

    fn active_interactions(
        &self,
    ) -> impl Future<Output = Result<Vec<InteractionId>, ProviderFailure>> + Send {
        async move { Ok(Vec::new()) }
    }
}

/// Simulated external window, closed by flipping a shared flag.
struct SimWindow {
    closed: Arc<AtomicBool>,
}

impl SecureWindow for SimWindow {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Simulated browser window opener.
///
/// Tracks the most recently opened window so a console command can close it
/// from the outside, and can simulate a popup blocker via
/// [`SimOpener::set_blocked`].
pub struct SimOpener {
    blocked: AtomicBool,
    last_window: StdMutex<Option<Arc<AtomicBool>>>,
}

impl SimOpener {
    /// Create an opener with the popup blocker disabled.
    pub fn new() -> Self {
        Self {
            blocked: AtomicBool::new(false),
            last_window: StdMutex::new(None),
        }
    }

    /// Toggle the simulated popup blocker.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Close the most recently opened window, as if the caller had finished
    /// with it. Returns whether a window was there to close.
    pub fn close_open_window(&self) -> bool {
        if let Ok(guard) = self.last_window.lock()
            && let Some(flag) = guard.as_ref()
        {
            flag.store(true, Ordering::SeqCst);
            return true;
        }
        false
    }
}

impl Default for SimOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowOpener for SimOpener {
    fn open(&self, url: &str) -> Option<Box<dyn SecureWindow>> {
        if self.blocked.load(Ordering::SeqCst) {
            debug!(url, "Simulated popup blocker refused window");
            return None;
        }

        let closed = Arc::new(AtomicBool::new(false));
        if let Ok(mut guard) = self.last_window.lock() {
            *guard = Some(Arc::clone(&closed));
        }
        debug!(url, "Simulated window opened");
        Some(Box::new(SimWindow { closed }))
    }
}
