//! Trait seam for the external call-control system.
//!
//! The concrete vendor SDK and its transport live outside this crate; the
//! controller only needs the two recording operations, the startup query for
//! interactions already in progress, and the lifecycle event vocabulary.

use crate::InteractionId;

use std::future::Future;

use thiserror::Error;

/// Failure reported by the provider for a pause/resume call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderFailure {
    /// Message carried by the provider's error response.
    pub message: String,
}

impl ProviderFailure {
    /// Build a failure from the provider's error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External call-control system exposing pause/resume recording operations.
pub trait RecordingProvider: Send + Sync + 'static {
    /// Request that recording be paused for the given interaction.
    fn pause_recording(
        &self,
        interaction_id: &InteractionId,
    ) -> impl Future<Output = Result<(), ProviderFailure>> + Send;

    /// Request that recording be resumed for the given interaction.
    fn resume_recording(
        &self,
        interaction_id: &InteractionId,
    ) -> impl Future<Output = Result<(), ProviderFailure>> + Send;

    /// Interactions already in progress, queried once at startup so a widget
    /// mounted mid-call can resynchronize.
    fn active_interactions(
        &self,
    ) -> impl Future<Output = Result<Vec<InteractionId>, ProviderFailure>> + Send;
}

/// Call-lifecycle events delivered by the provider event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    /// A contact was routed to the agent.
    ContactStarted {
        /// Identifier of the new interaction.
        interaction_id: InteractionId,
    },
    /// The current contact ended.
    ContactEnded,
    /// The provider confirmed (or initiated) a recording pause.
    RecordingPaused,
    /// The provider confirmed (or initiated) a recording resume.
    RecordingResumed,
}
