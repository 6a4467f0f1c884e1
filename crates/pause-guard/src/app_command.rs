/// Commands sent from the embedding surface into the widget loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    /// Open the configured secure link, pausing recording around it.
    OpenSecureLink,
    /// Manually pause recording for the current call.
    PauseRecording,
    /// Manually resume recording for the current call.
    ResumeRecording,
    /// Replace the secure link URL field.
    SetLinkUrl {
        /// New URL value.
        url: String,
    },
    /// Replace the link description field.
    SetLinkDescription {
        /// New description value.
        description: String,
    },
    /// The host window regained input focus.
    HostFocusGained,
    /// Render the current status and action states.
    RenderStatus,
    /// Render the tail of the activity log.
    RenderLog,
    /// Tear the widget down.
    Shutdown,
}
