use std::fmt;

/// Opaque identifier for an active call, assigned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionId(String);

impl InteractionId {
    /// Wrap a provider-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for InteractionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The currently tracked call.
///
/// Invariant: `is_paused` can only be true while a call is active and an
/// interaction id is set. All writes go through the transition methods; the
/// optimistic local updates and the provider confirmation events share the
/// same guarded writer, so whichever lands last wins without corrupting the
/// invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionSession {
    interaction_id: Option<InteractionId>,
    has_active_call: bool,
    is_paused: bool,
}

impl InteractionSession {
    /// Adopt a new active call, replacing any prior session.
    pub(crate) fn begin(&mut self, interaction_id: InteractionId) {
        self.interaction_id = Some(interaction_id);
        self.has_active_call = true;
        self.is_paused = false;
    }

    /// Clear the session when the call ends. Forces `is_paused` off.
    pub(crate) fn end(&mut self) {
        *self = Self::default();
    }

    /// Guarded paused-state writer shared by optimistic updates and
    /// confirmation events. Pausing is refused without an active call, which
    /// keeps `is_paused` from outliving the call. Returns whether the stored
    /// value actually changed.
    pub(crate) fn set_paused(&mut self, paused: bool) -> bool {
        if paused && !(self.has_active_call && self.interaction_id.is_some()) {
            return false;
        }
        if self.is_paused == paused {
            return false;
        }
        self.is_paused = paused;
        true
    }

    /// Identifier of the tracked call, if one is active.
    pub fn interaction_id(&self) -> Option<&InteractionId> {
        self.interaction_id.as_ref()
    }

    /// Whether a call is currently active.
    pub fn has_active_call(&self) -> bool {
        self.has_active_call
    }

    /// Whether recording is currently paused.
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Cloneable read view for the UI layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            interaction_id: self.interaction_id.clone(),
            has_active_call: self.has_active_call,
            is_paused: self.is_paused,
        }
    }
}

/// Point-in-time view of the tracked session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Identifier of the tracked call, if one is active.
    pub interaction_id: Option<InteractionId>,
    /// Whether a call is currently active.
    pub has_active_call: bool,
    /// Whether recording is currently paused.
    pub is_paused: bool,
}
