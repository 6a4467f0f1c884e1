use crate::provider::ProviderFailure;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recording-control errors with source location tracking.
#[derive(Error, Debug)]
pub enum ControlError {
    /// Operation requires an active call.
    #[error("No active call {location}")]
    NoActiveCall {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Pause requested while recording is already paused.
    #[error("Recording already paused {location}")]
    AlreadyPaused {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Resume requested while recording is not paused.
    #[error("Recording is not paused {location}")]
    NotPaused {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Secure link flow requested with an empty URL.
    #[error("No secure link configured {location}")]
    EmptyLinkUrl {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The provider pause/resume call itself failed.
    #[error("Provider call failed: {source} {location}")]
    Provider {
        /// Underlying failure reported by the provider.
        #[source]
        source: ProviderFailure,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The window-opening primitive returned no handle (e.g. pop-up blocked).
    #[error("Secure window blocked {location}")]
    WindowBlocked {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl ControlError {
    /// Whether this error is a precondition violation for the current state,
    /// as opposed to an external failure of the provider or the window
    /// primitive.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ControlError::NoActiveCall { .. }
                | ControlError::AlreadyPaused { .. }
                | ControlError::NotPaused { .. }
                | ControlError::EmptyLinkUrl { .. }
        )
    }
}

/// Result type alias using [`ControlError`].
pub type Result<T> = std::result::Result<T, ControlError>;
