//! Shared fixtures for integration tests
//!
//! A hub wired to a mock clock, scripted fake adapters, and an event
//! recorder, so tests can drive the scheduler cycle by cycle with full
//! control over time and adapter outcomes.

#![allow(dead_code)]

pub mod adapters;

use std::sync::{Arc, Mutex};

use sensorhub_core::{HubConfig, MockTimeSource, SensorEvent, SensorHub};

/// Scheduler settings for deterministic tests: reference thresholds, no
/// settle delay, quiet liveness logging.
pub fn test_config() -> HubConfig {
    HubConfig::default()
        .with_startup_delay(0)
        .with_poll_period(10)
}

/// Hub on a mock clock starting at t=0
pub fn hub_with_clock() -> (SensorHub, MockTimeSource) {
    let clock = MockTimeSource::new(0);
    let hub = SensorHub::with_time_source(test_config(), clock.clone());
    (hub, clock)
}

/// Everything the event callback saw, in order
pub type EventLog = Arc<Mutex<Vec<SensorEvent>>>;

/// Install a recording callback and return its log
pub fn attach_recorder(hub: &SensorHub) -> EventLog {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    hub.register_event_callback(move |event| {
        sink.lock().unwrap().push(*event);
    });
    log
}

/// Advance the clock by `step_ms` and sweep, `cycles` times
pub fn drive(hub: &SensorHub, clock: &MockTimeSource, cycles: usize, step_ms: u64) {
    for _ in 0..cycles {
        clock.advance(step_ms);
        hub.run_cycle();
    }
}
