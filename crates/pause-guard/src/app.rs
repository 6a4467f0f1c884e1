use crate::{
    ActionStates, ActivityLog, AppResult, LogLevel, WidgetCommand, WidgetStatus,
    widget_status::PAUSED_WARNING,
};

use std::sync::Arc;

use pause_guard_core::{CallEvent, RecordingController, RecordingProvider};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Main widget state.
///
/// Owns the recording controller and the operator-visible activity log, and
/// drives both from call events and widget commands on a single select loop.
pub struct App<P: RecordingProvider> {
    pub(crate) controller: RecordingController<P>,
    pub(crate) log: Arc<Mutex<ActivityLog>>,
    pub(crate) link_url: String,
    pub(crate) link_description: String,
    pub(crate) command_rx: mpsc::Receiver<WidgetCommand>,
    pub(crate) event_rx: mpsc::Receiver<CallEvent>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) widget_id: Uuid,
}

impl<P: RecordingProvider> App<P> {
    /// Run the main widget event loop.
    #[instrument(skip(self), fields(widget_id = %self.widget_id))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Pause-Guard widget starting");
        self.log_activity(LogLevel::Info, "Widget initialized. Waiting for active call...")
            .await;

        // A widget mounted mid-call adopts the interaction already in
        // progress before processing any live events.
        self.resync().await;

        loop {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_call_event(event).await;
                }

                Some(cmd) = self.command_rx.recv() => {
                    if cmd == WidgetCommand::Shutdown {
                        info!("Shutdown requested");
                        break;
                    }
                    self.handle_command(cmd).await;
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        self.controller.shutdown().await;

        let _ = self.shutdown_tx.send(true);
        info!("Pause-Guard widget shut down successfully");

        Ok(())
    }

    /// Query the provider for interactions already in progress.
    async fn resync(&self) {
        match self.controller.resync_active_interactions().await {
            Ok(Some(interaction_id)) => {
                self.log_activity(
                    LogLevel::Info,
                    format!("Resynchronized with active call - ID: {}", interaction_id),
                )
                .await;
            }
            Ok(None) => {}
            Err(e) => {
                self.log_activity(
                    LogLevel::Error,
                    format!("Error checking active interactions: {}", e),
                )
                .await;
            }
        }
    }

    /// Apply one call-lifecycle event from the provider.
    async fn handle_call_event(&self, event: CallEvent) {
        match event {
            CallEvent::ContactStarted { interaction_id } => {
                self.log_activity(
                    LogLevel::Info,
                    format!("Call started - ID: {}", interaction_id),
                )
                .await;
                self.controller.on_call_started(interaction_id).await;
            }
            CallEvent::ContactEnded => {
                self.log_activity(LogLevel::Info, "Call ended").await;
                self.controller.on_call_ended().await;
            }
            CallEvent::RecordingPaused => {
                self.controller.on_recording_paused_event().await;
                self.log_activity(LogLevel::Success, "Recording paused").await;
            }
            CallEvent::RecordingResumed => {
                self.controller.on_recording_resumed_event().await;
                self.log_activity(LogLevel::Success, "Recording resumed").await;
            }
        }
    }

    /// Apply one command from the embedding surface.
    async fn handle_command(&mut self, cmd: WidgetCommand) {
        match cmd {
            WidgetCommand::OpenSecureLink => self.open_secure_link().await,
            WidgetCommand::PauseRecording => self.pause_recording().await,
            WidgetCommand::ResumeRecording => self.resume_recording().await,
            WidgetCommand::SetLinkUrl { url } => {
                self.log_activity(LogLevel::Info, format!("Secure link URL set to: {}", url))
                    .await;
                self.link_url = url;
            }
            WidgetCommand::SetLinkDescription { description } => {
                self.link_description = description;
            }
            WidgetCommand::HostFocusGained => {
                self.controller.on_host_focus().await;
            }
            WidgetCommand::RenderStatus => self.render_status().await,
            WidgetCommand::RenderLog => self.render_log().await,
            WidgetCommand::Shutdown => {}
        }
    }

    /// Pause recording for the current call, logging the outcome.
    #[instrument(skip(self))]
    async fn pause_recording(&self) {
        self.log_activity(LogLevel::Info, "Attempting to pause recording...")
            .await;
        match self.controller.pause().await {
            Ok(()) => {
                self.log_activity(LogLevel::Success, "Recording paused successfully")
                    .await;
                self.log_activity(LogLevel::Info, PAUSED_WARNING).await;
            }
            Err(e) => {
                self.log_activity(LogLevel::Error, format!("Error pausing recording: {}", e))
                    .await;
            }
        }
    }

    /// Resume recording for the current call, logging the outcome.
    #[instrument(skip(self))]
    async fn resume_recording(&self) {
        self.log_activity(LogLevel::Info, "Attempting to resume recording...")
            .await;
        match self.controller.resume().await {
            Ok(()) => {
                self.log_activity(LogLevel::Success, "Recording resumed successfully")
                    .await;
            }
            Err(e) => {
                self.log_activity(LogLevel::Error, format!("Error resuming recording: {}", e))
                    .await;
            }
        }
    }

    /// Open the configured secure link, pausing recording around it.
    #[instrument(skip(self))]
    async fn open_secure_link(&self) {
        self.log_activity(
            LogLevel::Info,
            format!("Opening secure link: {}", self.link_url),
        )
        .await;
        match self.controller.open_secure_link_flow(&self.link_url).await {
            Ok(()) => {
                let label = if self.link_description.trim().is_empty() {
                    self.link_url.clone()
                } else {
                    self.link_description.clone()
                };
                self.log_activity(LogLevel::Success, format!("Opened secure link: {}", label))
                    .await;
                self.log_activity(LogLevel::Info, PAUSED_WARNING).await;
            }
            Err(e) => {
                warn!(error = ?e, "Secure link flow failed");
                self.log_activity(
                    LogLevel::Error,
                    format!("Error in secure link process: {}", e),
                )
                .await;
            }
        }
    }

    /// Print the current status line and action availability.
    async fn render_status(&self) {
        let snapshot = self.controller.snapshot().await;
        let status = WidgetStatus::from_snapshot(&snapshot);
        let actions = ActionStates::derive(&snapshot, &self.link_url);

        println!("status: {}", status.status_text());
        println!(
            "actions: open-link={} pause={} resume={}",
            actions.open_link, actions.pause, actions.resume
        );
    }

    /// Print the tail of the activity log.
    async fn render_log(&self) {
        let log = self.log.lock().await;
        if log.is_empty() {
            println!("(log empty)");
        } else {
            println!("{}", log.render_tail(20));
        }
    }

    async fn log_activity(&self, level: LogLevel, message: impl Into<String>) {
        self.log.lock().await.push(level, message);
    }
}
