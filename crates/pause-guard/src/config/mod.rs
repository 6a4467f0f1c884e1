#[allow(clippy::module_inception)]
mod config;
mod link_config;
mod timing_config;

pub(crate) use {config::Config, link_config::LinkConfig, timing_config::TimingConfig};

pub(crate) const DEFAULT_RESUME_DELAY_MS: u64 = 500;
pub(crate) const DEFAULT_RETRY_DELAY_MS: u64 = 2000;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_MAX_PAUSE_SECS: u64 = 600;
pub(crate) const DEFAULT_LOG_CAPACITY: usize = 200;
