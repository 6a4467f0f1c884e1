mod support;
mod watchdog;
