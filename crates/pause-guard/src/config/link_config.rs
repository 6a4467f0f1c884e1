use serde::{Deserialize, Serialize};

/// Secure link fields pre-filled into the widget.
///
/// Both are free text; the only validation is that a non-empty URL gates the
/// open-link action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Default secure link URL (e.g. a payment portal).
    #[serde(default)]
    pub url: String,

    /// Human-readable description shown next to the link.
    #[serde(default)]
    pub description: String,
}
