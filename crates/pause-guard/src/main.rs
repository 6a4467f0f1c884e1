//! Pause-Guard: pause/resume call-recording coordinator with a secure-link
//! window watchdog, driven here from a console against a simulated provider.

mod activity_log;
mod app;
mod app_command;
mod config;
mod error;
mod sim;
#[cfg(test)]
mod tests;
mod widget_status;

pub(crate) use {
    activity_log::{ActivityLog, LogLevel},
    app::App,
    app_command::WidgetCommand,
    error::{AppError, Result as AppResult},
    sim::{SimOpener, SimProvider},
    widget_status::{ActionStates, WidgetStatus},
};

use crate::config::{Config, DEFAULT_LOG_CAPACITY};

use std::sync::Arc;

use pause_guard_core::{CallEvent, InteractionId, RecordingController};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{Mutex, mpsc, watch},
};
use tracing::{error, info};
use uuid::Uuid;

const CONSOLE_HELP: &str = "\
commands:
  call <id>        start a call with the given interaction id
  end              end the current call
  open [url]       open the secure link (optionally setting the URL first)
  pause            pause recording
  resume           resume recording
  close            close the external window
  focus            simulate the host window regaining focus
  block on|off     toggle the simulated popup blocker
  failpause <n>    make the next n pause requests fail
  failresume <n>   make the next n resume requests fail
  status           show widget status and action availability
  log              show the activity log tail
  quit             shut down";

/// Application entry point.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("pause_guard=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let (event_tx, event_rx) = mpsc::channel(32);
    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let provider = Arc::new(SimProvider::new(event_tx.clone()));
    let opener = Arc::new(SimOpener::new());

    let controller = RecordingController::new(
        Arc::clone(&provider),
        Arc::clone(&opener) as Arc<dyn pause_guard_core::WindowOpener>,
        config.timing.to_timings(),
    );

    let app = App {
        controller,
        log: Arc::new(Mutex::new(ActivityLog::new(DEFAULT_LOG_CAPACITY))),
        link_url: config.link.url.clone(),
        link_description: config.link.description.clone(),
        command_rx,
        event_rx,
        shutdown_tx,
        widget_id: Uuid::new_v4(),
    };

    println!("{}", CONSOLE_HELP);

    let console_handle = tokio::spawn(run_console(
        event_tx,
        command_tx,
        Arc::clone(&provider),
        Arc::clone(&opener),
        shutdown_rx,
    ));

    if let Err(e) = app.run().await {
        error!(error = ?e, "Widget error");
    }

    match tokio::time::timeout(std::time::Duration::from_secs(1), console_handle).await {
        Ok(Ok(())) => info!("Console reader stopped cleanly"),
        Ok(Err(e)) => error!(error = ?e, "Console reader task panicked"),
        Err(_) => info!("Console reader did not stop within timeout, will be cleaned up on exit"),
    }
}

/// Read console lines and translate them into events and commands until
/// shutdown is signalled or stdin closes.
async fn run_console(
    event_tx: mpsc::Sender<CallEvent>,
    command_tx: mpsc::Sender<WidgetCommand>,
    provider: Arc<SimProvider>,
    opener: Arc<SimOpener>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = shutdown_rx.changed() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => {
                    let _ = command_tx.send(WidgetCommand::Shutdown).await;
                    break;
                }
            },
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "call" if !rest.is_empty() => {
                let _ = event_tx
                    .send(CallEvent::ContactStarted {
                        interaction_id: InteractionId::new(rest),
                    })
                    .await;
            }
            "end" => {
                let _ = event_tx.send(CallEvent::ContactEnded).await;
            }
            "open" => {
                if !rest.is_empty() {
                    let _ = command_tx
                        .send(WidgetCommand::SetLinkUrl {
                            url: rest.to_string(),
                        })
                        .await;
                }
                let _ = command_tx.send(WidgetCommand::OpenSecureLink).await;
            }
            "pause" => {
                let _ = command_tx.send(WidgetCommand::PauseRecording).await;
            }
            "resume" => {
                let _ = command_tx.send(WidgetCommand::ResumeRecording).await;
            }
            "close" => {
                if opener.close_open_window() {
                    println!("window closed");
                } else {
                    println!("no window open");
                }
            }
            "focus" => {
                let _ = command_tx.send(WidgetCommand::HostFocusGained).await;
            }
            "block" => match rest {
                "on" => opener.set_blocked(true),
                "off" => opener.set_blocked(false),
                _ => println!("usage: block on|off"),
            },
            "failpause" => match rest.parse() {
                Ok(n) => provider.fail_next_pauses(n),
                Err(_) => println!("usage: failpause <n>"),
            },
            "failresume" => match rest.parse() {
                Ok(n) => provider.fail_next_resumes(n),
                Err(_) => println!("usage: failresume <n>"),
            },
            "status" => {
                let _ = command_tx.send(WidgetCommand::RenderStatus).await;
            }
            "log" => {
                let _ = command_tx.send(WidgetCommand::RenderLog).await;
            }
            "quit" | "exit" => {
                let _ = command_tx.send(WidgetCommand::Shutdown).await;
                break;
            }
            "help" => println!("{}", CONSOLE_HELP),
            _ => println!("unknown command (try: help)"),
        }
    }
}
