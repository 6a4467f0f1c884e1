use crate::config::{
    DEFAULT_MAX_PAUSE_SECS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RESUME_DELAY_MS,
    DEFAULT_RETRY_DELAY_MS,
};

use std::time::Duration;

use pause_guard_core::ControllerTimings;
use serde::{Deserialize, Serialize};

/// Controller timing knobs, all overridable in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before every resume request, in milliseconds.
    #[serde(default = "default_resume_delay_ms")]
    pub resume_delay_ms: u64,

    /// Delay before the single resume retry, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Closed-window poll interval, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum pause duration before the failsafe resumes, in seconds.
    #[serde(default = "default_max_pause_secs")]
    pub max_pause_secs: u64,
}

impl TimingConfig {
    /// Convert into the controller's timing record.
    pub fn to_timings(&self) -> ControllerTimings {
        ControllerTimings {
            resume_delay: Duration::from_millis(self.resume_delay_ms),
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_pause: Duration::from_secs(self.max_pause_secs),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resume_delay_ms: default_resume_delay_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            max_pause_secs: default_max_pause_secs(),
        }
    }
}

fn default_resume_delay_ms() -> u64 {
    DEFAULT_RESUME_DELAY_MS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_max_pause_secs() -> u64 {
    DEFAULT_MAX_PAUSE_SECS
}
