//! Fakes and wiring shared by the controller and watchdog tests.

use crate::{
    ControllerTimings, InteractionId, ProviderFailure, RecordingController, RecordingProvider,
    SecureWindow, WindowOpener,
};

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

/// Counting provider fake with injectable failures.
#[derive(Default)]
pub(crate) struct FakeProvider {
    pub(crate) pause_calls: AtomicUsize,
    pub(crate) resume_calls: AtomicUsize,
    fail_pauses: AtomicUsize,
    fail_resumes: AtomicUsize,
    active: Vec<InteractionId>,
}

impl FakeProvider {
    /// Provider that reports the given interactions as already in progress.
    pub(crate) fn with_active(active: Vec<InteractionId>) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    /// Make the next `count` pause calls fail.
    pub(crate) fn fail_next_pauses(&self, count: usize) {
        self.fail_pauses.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` resume calls fail.
    pub(crate) fn fail_next_resumes(&self, count: usize) {
        self.fail_resumes.store(count, Ordering::SeqCst);
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl RecordingProvider for FakeProvider {
    fn pause_recording(
        &self,
        _interaction_id: &InteractionId,
    ) -> impl Future<Output = Result<(), ProviderFailure>> + Send {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        let fail = Self::take_failure(&self.fail_pauses);
        async move {
            // Suspension point, like the real network call.
            tokio::task::yield_now().await;
            if fail {
                Err(ProviderFailure::new("injected pause failure"))
            } else {
                Ok(())
            }
        }
    }

    fn resume_recording(
        &self,
        _interaction_id: &InteractionId,
    ) -> impl Future<Output = Result<(), ProviderFailure>> + Send {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        let fail = Self::take_failure(&self.fail_resumes);
        async move {
            tokio::task::yield_now().await;
            if fail {
                Err(ProviderFailure::new("injected resume failure"))
            } else {
                Ok(())
            }
        }
    }

    fn active_interactions(
        &self,
    ) -> impl Future<Output = Result<Vec<InteractionId>, ProviderFailure>> + Send {
        let active = self.active.clone();
        async move { Ok(active) }
    }
}

/// Window fake whose closed flag is shared with the opener that made it.
pub(crate) struct FakeWindow {
    closed: Arc<AtomicBool>,
    close_calls: Arc<AtomicUsize>,
}

impl SecureWindow for FakeWindow {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn close(&mut self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Opener fake sharing one closed flag with every window it opens, so tests
/// can close "the" window from outside, and optionally simulating a pop-up
/// blocker.
#[derive(Default)]
pub(crate) struct FakeOpener {
    pub(crate) blocked: AtomicBool,
    pub(crate) open_calls: AtomicUsize,
    pub(crate) close_calls: Arc<AtomicUsize>,
    closed_flag: Arc<AtomicBool>,
}

impl FakeOpener {
    /// Mark the shared window closed, as if the user closed it.
    pub(crate) fn close_window(&self) {
        self.closed_flag.store(true, Ordering::SeqCst);
    }
}

impl WindowOpener for FakeOpener {
    fn open(&self, _url: &str) -> Option<Box<dyn SecureWindow>> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        if self.blocked.load(Ordering::SeqCst) {
            return None;
        }
        Some(Box::new(FakeWindow {
            closed: Arc::clone(&self.closed_flag),
            close_calls: Arc::clone(&self.close_calls),
        }))
    }
}

/// Controller under test plus handles to its fakes.
pub(crate) struct Harness {
    pub(crate) provider: Arc<FakeProvider>,
    pub(crate) opener: Arc<FakeOpener>,
    pub(crate) controller: RecordingController<FakeProvider>,
}

pub(crate) fn harness() -> Harness {
    harness_with(FakeProvider::default())
}

pub(crate) fn harness_with(provider: FakeProvider) -> Harness {
    let provider = Arc::new(provider);
    let opener = Arc::new(FakeOpener::default());
    let controller = RecordingController::new(
        Arc::clone(&provider),
        Arc::clone(&opener) as Arc<dyn WindowOpener>,
        ControllerTimings::default(),
    );
    Harness {
        provider,
        opener,
        controller,
    }
}

impl Harness {
    pub(crate) async fn start_call(&self, id: &str) {
        self.controller
            .on_call_started(InteractionId::new(id))
            .await;
    }

    pub(crate) fn pause_calls(&self) -> usize {
        self.provider.pause_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn resume_calls(&self) -> usize {
        self.provider.resume_calls.load(Ordering::SeqCst)
    }
}
