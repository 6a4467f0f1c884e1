//! Recording state controller.
//!
//! Owns the paused/active state for the current interaction, serializes
//! pause/resume requests, and arbitrates between the concurrent resume
//! triggers: the manual action, watchdog closure detection, the focus-return
//! shortcut, the failsafe timer, and teardown. All of them funnel through
//! [`RecordingController::resume`], whose precondition makes every caller
//! after the first a no-op.

use crate::{
    ControlError, ControlResult, ControllerTimings, InteractionId, InteractionSession,
    SessionSnapshot,
    provider::RecordingProvider,
    watchdog,
    window::{SecureWindow, WindowOpener},
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info, instrument, warn};

/// Timers owned by the controller.
///
/// Both are canceled together whenever the paused state transitions to
/// resumed, the call ends, or the widget is torn down. The resume retry is
/// deliberately not tracked here; its callback re-validates state before
/// acting instead of relying on cancellation, which can race the final tick.
#[derive(Debug, Default)]
pub(crate) struct PendingTimers {
    /// Recurring closed-window poll (the watchdog task).
    pub(crate) window_poll: Option<JoinHandle<()>>,
    /// One-shot maximum-pause-duration backstop.
    pub(crate) failsafe: Option<JoinHandle<()>>,
}

impl PendingTimers {
    pub(crate) fn cancel_all(&mut self) {
        if let Some(handle) = self.window_poll.take() {
            handle.abort();
        }
        if let Some(handle) = self.failsafe.take() {
            handle.abort();
        }
    }
}

/// Controller state behind the single lock.
pub(crate) struct ControllerInner {
    pub(crate) session: InteractionSession,
    pub(crate) window: Option<Box<dyn SecureWindow>>,
    pub(crate) timers: PendingTimers,
}

/// Coordinates pausing and resuming call recording around an externally
/// opened secure window.
///
/// Cheap to clone; clones share the same session state. The state lock is
/// held across the provider pause/resume requests, so duplicate intent from
/// concurrent triggers parks on the lock and then fails the precondition
/// instead of double-issuing a request.
pub struct RecordingController<P: RecordingProvider> {
    provider: Arc<P>,
    opener: Arc<dyn WindowOpener>,
    timings: ControllerTimings,
    pub(crate) inner: Arc<Mutex<ControllerInner>>,
}

impl<P: RecordingProvider> Clone for RecordingController<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            opener: Arc::clone(&self.opener),
            timings: self.timings,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: RecordingProvider> RecordingController<P> {
    /// Create a controller over the given provider and window opener.
    pub fn new(provider: Arc<P>, opener: Arc<dyn WindowOpener>, timings: ControllerTimings) -> Self {
        Self {
            provider,
            opener,
            timings,
            inner: Arc::new(Mutex::new(ControllerInner {
                session: InteractionSession::default(),
                window: None,
                timers: PendingTimers::default(),
            })),
        }
    }

    /// Current read view of the tracked session.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.session.snapshot()
    }

    /// Record that a call has started, replacing any prior session.
    ///
    /// Timers from a previous session are not touched here; callers finalize
    /// the previous session via [`on_call_ended`](Self::on_call_ended) first.
    #[instrument(skip(self))]
    pub async fn on_call_started(&self, interaction_id: InteractionId) {
        let mut inner = self.inner.lock().await;
        info!(interaction_id = %interaction_id, "Call started");
        inner.session.begin(interaction_id);
    }

    /// Record that the call has ended.
    ///
    /// The single authoritative cleanup path: clears the session, closes the
    /// secure window if open, and cancels all pending timers. Safe to call
    /// with no active call.
    #[instrument(skip(self))]
    pub async fn on_call_ended(&self) {
        let mut inner = self.inner.lock().await;
        inner.timers.cancel_all();
        if let Some(mut window) = inner.window.take() {
            window.close();
            debug!("Secure window closed on call end");
        }
        inner.session.end();
        info!("Call ended, session cleared");
    }

    /// Provider confirmation that recording is paused.
    ///
    /// Applied idempotently whether or not a local pause initiated it; a
    /// provider-initiated pause is treated the same way. The guarded writer
    /// refuses a pause with no active call.
    #[instrument(skip(self))]
    pub async fn on_recording_paused_event(&self) {
        let mut inner = self.inner.lock().await;
        if inner.session.set_paused(true) {
            debug!("Recording-paused confirmation applied");
        } else if !inner.session.has_active_call() {
            warn!("Recording-paused confirmation ignored, no active call");
        } else {
            debug!("Recording-paused confirmation was already reflected");
        }
    }

    /// Provider confirmation that recording is resumed.
    ///
    /// Applied idempotently; on an actual paused-to-resumed transition the
    /// pending timers are canceled as well.
    #[instrument(skip(self))]
    pub async fn on_recording_resumed_event(&self) {
        let mut inner = self.inner.lock().await;
        if inner.session.set_paused(false) {
            inner.timers.cancel_all();
            debug!("Recording-resumed confirmation applied, timers canceled");
        } else {
            debug!("Recording-resumed confirmation was already reflected");
        }
    }

    /// Pause recording for the current interaction.
    ///
    /// Issues exactly one provider pause request. `is_paused` is set
    /// optimistically on success because the confirmation event may never
    /// arrive. No retry on failure.
    #[instrument(skip(self))]
    pub async fn pause(&self) -> ControlResult<()> {
        let mut inner = self.inner.lock().await;
        let interaction_id = match inner.session.interaction_id() {
            Some(id) => id.clone(),
            None => {
                return Err(ControlError::NoActiveCall {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };
        if inner.session.is_paused() {
            return Err(ControlError::AlreadyPaused {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(interaction_id = %interaction_id, "Requesting recording pause");

        // The lock stays held across the request: a duplicate pause arriving
        // while this one is in flight parks here, then fails the precondition.
        self.provider
            .pause_recording(&interaction_id)
            .await
            .map_err(|source| ControlError::Provider {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        inner.session.set_paused(true);
        info!(interaction_id = %interaction_id, "Recording paused");
        Ok(())
    }

    /// Resume recording for the current interaction.
    ///
    /// A deliberate delay precedes the provider request, to avoid racing a
    /// concurrent provider-side operation. The lock is held across delay and
    /// request, so resume triggers firing back-to-back cannot double-issue.
    ///
    /// On failure, exactly one retry is scheduled after a longer delay; the
    /// retry re-invokes the raw provider call, bypassing the precondition
    /// checks, and a second failure is terminal and only logged.
    #[instrument(skip(self))]
    pub async fn resume(&self) -> ControlResult<()> {
        let mut inner = self.inner.lock().await;
        let interaction_id = match inner.session.interaction_id() {
            Some(id) => id.clone(),
            None => {
                return Err(ControlError::NoActiveCall {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };
        if !inner.session.is_paused() {
            return Err(ControlError::NotPaused {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!(
            interaction_id = %interaction_id,
            delay_ms = self.timings.resume_delay.as_millis() as u64,
            "Delaying before resume request"
        );
        tokio::time::sleep(self.timings.resume_delay).await;

        match self.provider.resume_recording(&interaction_id).await {
            Ok(()) => {
                inner.session.set_paused(false);
                inner.timers.cancel_all();
                info!(interaction_id = %interaction_id, "Recording resumed");
                Ok(())
            }
            Err(source) => {
                warn!(
                    interaction_id = %interaction_id,
                    error = %source,
                    "Resume failed, scheduling one retry"
                );
                self.spawn_resume_retry(interaction_id);
                Err(ControlError::Provider {
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Composite secure-link flow: pause recording, open the external window,
    /// arm the watchdog and the failsafe timer.
    ///
    /// A pause failure does not stop the window from opening; an
    /// already-paused session still gets its window and triggers. A blocked
    /// window triggers a compensating resume, so the system never stays
    /// paused with no window to justify it.
    #[instrument(skip(self))]
    pub async fn open_secure_link_flow(&self, url: &str) -> ControlResult<()> {
        if url.trim().is_empty() {
            return Err(ControlError::EmptyLinkUrl {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        {
            let inner = self.inner.lock().await;
            if inner.session.interaction_id().is_none() {
                return Err(ControlError::NoActiveCall {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if let Err(error) = self.pause().await {
            warn!(error = %error, "Pause did not succeed before opening secure link");
        }

        let Some(window) = self.opener.open(url) else {
            warn!(url, "Secure window blocked, issuing compensating resume");
            if let Err(error) = self.resume().await {
                error!(error = %error, "Compensating resume after blocked window failed");
            }
            return Err(ControlError::WindowBlocked {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        {
            let mut inner = self.inner.lock().await;
            // The call can end between the precondition check and the window
            // opening; a window with no session behind it is closed again.
            if inner.session.interaction_id().is_none() {
                let mut window = window;
                window.close();
                warn!(url, "Call ended during secure link flow, window closed");
                return Err(ControlError::NoActiveCall {
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            // At most one watched window: a second flow replaces the first.
            inner.timers.cancel_all();
            if let Some(mut prior) = inner.window.take() {
                prior.close();
                debug!("Prior secure window closed, replaced by new flow");
            }

            inner.window = Some(window);
            inner.timers.window_poll = Some(watchdog::spawn_window_poll(
                self.clone(),
                self.timings.poll_interval,
            ));
            inner.timers.failsafe = Some(self.spawn_failsafe());
        }

        info!(url, "Secure link opened, watchdog and failsafe armed");
        Ok(())
    }

    /// Focus-return shortcut for the watchdog: if the tracked window is
    /// already closed when the host window regains input focus, resume
    /// without waiting for the next poll tick.
    #[instrument(skip(self))]
    pub async fn on_host_focus(&self) {
        watchdog::handle_focus_gained(self).await;
    }

    /// Resynchronize state when the widget mounts mid-call: adopt the first
    /// interaction the provider reports as already active.
    #[instrument(skip(self))]
    pub async fn resync_active_interactions(&self) -> ControlResult<Option<InteractionId>> {
        let interactions =
            self.provider
                .active_interactions()
                .await
                .map_err(|source| ControlError::Provider {
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })?;

        match interactions.into_iter().next() {
            Some(interaction_id) => {
                self.on_call_started(interaction_id.clone()).await;
                Ok(Some(interaction_id))
            }
            None => Ok(None),
        }
    }

    /// Widget teardown.
    ///
    /// Cancels all pending timers, closes the secure window, and fires one
    /// last best-effort resume if still paused. Teardown does not block on
    /// that resume; its outcome is only logged.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        let resume_target = {
            let mut inner = self.inner.lock().await;
            inner.timers.cancel_all();
            if let Some(mut window) = inner.window.take() {
                window.close();
                debug!("Secure window closed on teardown");
            }
            if inner.session.is_paused() {
                inner.session.interaction_id().cloned()
            } else {
                None
            }
        };

        if let Some(interaction_id) = resume_target {
            let provider = Arc::clone(&self.provider);
            let _ = tokio::spawn(async move {
                match provider.resume_recording(&interaction_id).await {
                    Ok(()) => {
                        info!(interaction_id = %interaction_id, "Resumed recording during teardown")
                    }
                    Err(error) => error!(
                        interaction_id = %interaction_id,
                        error = %error,
                        "Failed to resume recording during teardown"
                    ),
                }
            });
        }
    }

    /// One-shot retry for a failed resume. Bypasses the precondition checks
    /// but re-validates that the same interaction is still current before
    /// writing state, because the timer can race call end.
    fn spawn_resume_retry(&self, interaction_id: InteractionId) {
        let provider = Arc::clone(&self.provider);
        let inner = Arc::clone(&self.inner);
        let retry_delay = self.timings.retry_delay;

        let _ = tokio::spawn(async move {
            tokio::time::sleep(retry_delay).await;
            info!(interaction_id = %interaction_id, "Retrying resume after delay");

            match provider.resume_recording(&interaction_id).await {
                Ok(()) => {
                    let mut inner = inner.lock().await;
                    if inner.session.interaction_id() == Some(&interaction_id) {
                        inner.session.set_paused(false);
                        inner.timers.cancel_all();
                    }
                    info!(interaction_id = %interaction_id, "Resume retry succeeded");
                }
                Err(error) => {
                    error!(
                        interaction_id = %interaction_id,
                        error = %error,
                        "Resume retry failed, giving up"
                    );
                }
            }
        });
    }

    /// Backstop against an operator forgetting to close the secure window:
    /// once the maximum pause duration elapses, resume if still paused.
    fn spawn_failsafe(&self) -> JoinHandle<()> {
        let controller = self.clone();
        let max_pause = self.timings.max_pause;

        tokio::spawn(async move {
            tokio::time::sleep(max_pause).await;

            // Re-check under the lock, not just via cancellation: aborting
            // this task can race its final tick.
            let still_paused = controller.inner.lock().await.session.is_paused();
            if !still_paused {
                debug!("Failsafe fired after resume already happened, nothing to do");
                return;
            }

            info!("Maximum pause duration reached, forcing resume");
            if let Err(error) = controller.resume().await {
                error!(error = %error, "Failsafe resume failed");
            }
        })
    }
}
