use pause_guard_core::SessionSnapshot;

/// Persistent warning shown while recording is paused.
pub const PAUSED_WARNING: &str = "Recording paused - Remember to resume when finished";

/// Visible recording status of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetStatus {
    /// No active call.
    Inactive,
    /// Call active, recording running.
    Active,
    /// Call active, recording paused.
    Paused,
}

impl WidgetStatus {
    /// Derive the visible status from a session snapshot.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        if !snapshot.has_active_call {
            WidgetStatus::Inactive
        } else if snapshot.is_paused {
            WidgetStatus::Paused
        } else {
            WidgetStatus::Active
        }
    }

    /// Status line text, with the paused state surfaced as a persistent
    /// warning until resolved.
    pub fn status_text(self) -> &'static str {
        match self {
            WidgetStatus::Inactive => "Waiting for active call...",
            WidgetStatus::Active => "Recording active",
            WidgetStatus::Paused => PAUSED_WARNING,
        }
    }
}

/// Enabled/disabled state of the three widget actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStates {
    /// Open the secure link.
    pub open_link: bool,
    /// Manually pause recording.
    pub pause: bool,
    /// Manually resume recording.
    pub resume: bool,
}

impl ActionStates {
    /// Gate the actions on the current session and link URL.
    ///
    /// Open-link needs an active call and a non-empty URL; pause is only
    /// available while active and unpaused; resume only while paused.
    pub fn derive(snapshot: &SessionSnapshot, link_url: &str) -> Self {
        if !snapshot.has_active_call {
            return Self {
                open_link: false,
                pause: false,
                resume: false,
            };
        }

        Self {
            open_link: !link_url.trim().is_empty(),
            pause: !snapshot.is_paused,
            resume: snapshot.is_paused,
        }
    }
}
