use crate::config::{
    Config, DEFAULT_MAX_PAUSE_SECS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RESUME_DELAY_MS,
    DEFAULT_RETRY_DELAY_MS, TimingConfig,
};

use std::time::Duration;

/// WHAT: Default timings match the controller's stock delays
/// WHY: An absent config file must not change pause/resume behavior
#[test]
fn given_default_timing_config_when_converting_then_stock_durations() {
    let timings = TimingConfig::default().to_timings();

    assert_eq!(timings.resume_delay, Duration::from_millis(500));
    assert_eq!(timings.retry_delay, Duration::from_millis(2000));
    assert_eq!(timings.poll_interval, Duration::from_millis(1000));
    assert_eq!(timings.max_pause, Duration::from_secs(600));
}

/// WHAT: A partial config file fills missing fields with defaults
/// WHY: Users override one knob without restating the rest
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_toml_when_parsing_then_missing_fields_defaulted() {
    let config: Config = toml::from_str(
        r#"
        [link]
        url = "https://pay.example.com"

        [timing]
        max_pause_secs = 120
        "#,
    )
    .unwrap();

    assert_eq!(config.link.url, "https://pay.example.com");
    assert_eq!(config.link.description, "");
    assert_eq!(config.timing.max_pause_secs, 120);
    assert_eq!(config.timing.resume_delay_ms, DEFAULT_RESUME_DELAY_MS);
    assert_eq!(config.timing.retry_delay_ms, DEFAULT_RETRY_DELAY_MS);
    assert_eq!(config.timing.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
}

/// WHAT: An empty config file parses to the full default configuration
/// WHY: create_default writes defaults; re-reading them must round-trip
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_toml_when_parsing_then_defaults_used() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.link.url, "");
    assert_eq!(config.timing.max_pause_secs, DEFAULT_MAX_PAUSE_SECS);
}

/// WHAT: Custom timings convert field-for-field into controller durations
/// WHY: Millisecond and second units must not be mixed up in conversion
#[test]
fn given_custom_timing_config_when_converting_then_units_respected() {
    let timing = TimingConfig {
        resume_delay_ms: 250,
        retry_delay_ms: 1500,
        poll_interval_ms: 500,
        max_pause_secs: 60,
    };

    let timings = timing.to_timings();

    assert_eq!(timings.resume_delay, Duration::from_millis(250));
    assert_eq!(timings.retry_delay, Duration::from_millis(1500));
    assert_eq!(timings.poll_interval, Duration::from_millis(500));
    assert_eq!(timings.max_pause, Duration::from_secs(60));
}
