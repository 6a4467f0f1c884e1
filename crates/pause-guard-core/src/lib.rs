//! Pause-Guard Core Library
//!
//! Coordinates pausing and resuming call recording around an externally
//! opened "secure" window (e.g. a payment portal), so sensitive data entered
//! there is never captured in a recorded interaction. The vendor SDK and the
//! window-opening primitive are trait seams; this crate owns the pause/resume
//! lifecycle: preconditions, the delayed-resume-with-one-retry policy, the
//! closed-window watchdog, and the maximum-pause failsafe.
//!
//! # Example
//!
//! ```no_run
//! use pause_guard_core::{
//!     ControllerTimings, InteractionId, ProviderFailure, RecordingController,
//!     RecordingProvider, SecureWindow, WindowOpener,
//! };
//!
//! use std::{future::Future, sync::Arc};
//!
//! struct DesktopSdk;
//!
//! impl RecordingProvider for DesktopSdk {
//!     fn pause_recording(
//!         &self,
//!         _interaction_id: &InteractionId,
//!     ) -> impl Future<Output = Result<(), ProviderFailure>> + Send {
//!         async { Ok(()) }
//!     }
//!
//!     fn resume_recording(
//!         &self,
//!         _interaction_id: &InteractionId,
//!     ) -> impl Future<Output = Result<(), ProviderFailure>> + Send {
//!         async { Ok(()) }
//!     }
//!
//!     fn active_interactions(
//!         &self,
//!     ) -> impl Future<Output = Result<Vec<InteractionId>, ProviderFailure>> + Send {
//!         async { Ok(Vec::new()) }
//!     }
//! }
//!
//! struct Browser;
//!
//! impl WindowOpener for Browser {
//!     fn open(&self, _url: &str) -> Option<Box<dyn SecureWindow>> {
//!         None
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = RecordingController::new(
//!         Arc::new(DesktopSdk),
//!         Arc::new(Browser),
//!         ControllerTimings::default(),
//!     );
//!
//!     controller
//!         .on_call_started(InteractionId::new("interaction-1"))
//!         .await;
//!     let _ = controller
//!         .open_secure_link_flow("https://pay.example.com")
//!         .await;
//! }
//! ```

mod controller;
mod error;
mod provider;
mod session;
mod timings;
mod watchdog;
mod window;

pub use {
    controller::RecordingController,
    error::{ControlError, Result as ControlResult},
    provider::{CallEvent, ProviderFailure, RecordingProvider},
    session::{InteractionId, InteractionSession, SessionSnapshot},
    timings::ControllerTimings,
    window::{SecureWindow, WindowOpener},
};

#[cfg(test)]
mod tests;
