use std::time::Duration;

/// Timer and delay configuration for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerTimings {
    /// Delay inserted before every resume request, to avoid racing a
    /// concurrent provider-side operation.
    pub resume_delay: Duration,
    /// Delay before the single retry after a failed resume request.
    pub retry_delay: Duration,
    /// Interval at which the watchdog polls the opened window's closed flag.
    pub poll_interval: Duration,
    /// Maximum pause duration before the failsafe timer forces a resume.
    pub max_pause: Duration,
}

impl Default for ControllerTimings {
    fn default() -> Self {
        Self {
            resume_delay: Duration::from_millis(500),
            retry_delay: Duration::from_millis(2000),
            poll_interval: Duration::from_secs(1),
            max_pause: Duration::from_secs(10 * 60),
        }
    }
}
