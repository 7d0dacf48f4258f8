//! The polling scheduler: sweep, fault escalation and the runner thread
//!
//! One sweep visits every slot in registry order and drives its state
//! machine:
//!
//! ```text
//! Offline --enable--> Initializing --init ok--> Online
//!    ^                     ^  |                   |
//!    |        soft retry   |  |  init failures    | read failures
//!    |        (count == 5) |  v                   v
//!    +--disable--      (escalate) <---------------+
//!                           |
//!                           | count == 10
//!                           v
//!                         Error   (terminal until re-enabled)
//! ```
//!
//! Adapter calls happen with only the adapter table locked; results are
//! committed under the data mutex afterwards, and events fire once both
//! locks are released.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

use heapless::Vec;

use crate::events::SensorEvent;
use crate::hub::SensorHub;
use crate::types::{Reading, Sample, SensorKind, SensorStatus};

/// Most events one sweep step can emit: a fault plus the two status changes
/// of the hard-disable path, or a single data update.
type StepEvents = Vec<SensorEvent, 4>;

enum Action {
    Init,
    Read,
}

impl SensorHub {
    /// Start the polling thread
    ///
    /// The thread sleeps `startup_delay_ms`, then sweeps all sensors every
    /// `poll_period_ms`, compensating for sweep duration and never sleeping
    /// less than `min_sleep_ms`. Runs until [`stop`](Self::stop). At most
    /// one polling thread per hub.
    pub fn spawn(&self) -> std::io::Result<thread::JoinHandle<()>> {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "poll thread already running",
            ));
        }
        let hub = self.clone();
        thread::Builder::new()
            .name("sensorhub-poll".into())
            .spawn(move || hub.poll_loop())
    }

    /// Ask the polling thread to exit after its current cycle
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
    }

    /// Whether the polling thread is (or should be) running
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Perform one full sweep over all sensor slots
    ///
    /// Public so tests and host tools can drive the scheduler without a
    /// thread, typically against a mock time source.
    pub fn run_cycle(&self) {
        for kind in SensorKind::ALL {
            let events = self.step(kind);
            for event in &events {
                self.dispatch(event);
            }
        }
    }

    fn poll_loop(&self) {
        let config = self.shared.config;

        if config.startup_delay_ms > 0 {
            thread::sleep(Duration::from_millis(config.startup_delay_ms as u64));
        }

        log::info!("poll loop started, period {} ms", config.poll_period_ms);
        let mut cycle: u32 = 0;

        while self.shared.running.load(Ordering::SeqCst) {
            let sweep_start = Instant::now();
            self.run_cycle();

            cycle = cycle.wrapping_add(1);
            if config.liveness_log_every > 0 && cycle % config.liveness_log_every == 0 {
                log::info!(
                    "poll loop alive: uptime {} ms, {} active sensors",
                    self.now(),
                    self.active_sensor_count()
                );
            }

            let elapsed_ms = sweep_start.elapsed().as_millis() as u64;
            let sleep_ms = if elapsed_ms < config.poll_period_ms as u64 {
                config.poll_period_ms as u64 - elapsed_ms
            } else {
                config.min_sleep_ms as u64
            };
            thread::sleep(Duration::from_millis(sleep_ms));
        }

        log::info!("poll loop stopped");
    }

    /// Drive one sensor slot through its state machine
    fn step(&self, kind: SensorKind) -> StepEvents {
        let mut events = StepEvents::new();

        let action = {
            let registry = self.lock_blocking();
            match registry.slots[kind.index()].as_ref() {
                Some(instance) if instance.enabled => {
                    if instance.status == SensorStatus::Initializing {
                        Some(Action::Init)
                    } else if instance.due(self.now()) {
                        Some(Action::Read)
                    } else {
                        None
                    }
                }
                _ => None,
            }
        };

        match action {
            Some(Action::Init) => self.attempt_init(kind, &mut events),
            Some(Action::Read) => self.attempt_read(kind, &mut events),
            None => {}
        }

        events
    }

    fn attempt_init(&self, kind: SensorKind, events: &mut StepEvents) {
        let result = self.with_adapter(kind, |adapter| adapter.init());

        match result {
            Some(Ok(())) => {
                let now = self.now();
                let mut registry = self.lock_blocking();
                if let Some(instance) = registry.slots[kind.index()]
                    .as_mut()
                    .filter(|i| i.enabled)
                {
                    instance.status = SensorStatus::Online;
                    instance.last_update = now;
                    instance.error_count = 0;
                    log::info!("sensor '{}' initialized", instance.name);
                    let _ = events.push(SensorEvent::StatusChange {
                        kind,
                        status: SensorStatus::Online,
                    });
                }
            }
            Some(Err(e)) => {
                log::warn!("sensor {kind} init failed: {e}");
                self.escalate(kind, events);
            }
            None => {}
        }
    }

    fn attempt_read(&self, kind: SensorKind, events: &mut StepEvents) {
        let result = self.with_adapter(kind, |adapter| adapter.read());

        match result {
            Some(Ok(reading)) if reading.kind() == kind => {
                self.commit(kind, reading, events);
            }
            Some(Ok(reading)) => {
                log::warn!(
                    "sensor {kind} returned a {} reading, dropping it",
                    reading.kind()
                );
                self.escalate(kind, events);
            }
            Some(Err(e)) => {
                log::warn!("sensor {kind} read failed: {e}");
                self.escalate(kind, events);
            }
            None => {}
        }
    }

    /// Commit a successful reading: sample, history and statistics in one
    /// critical section
    fn commit(&self, kind: SensorKind, reading: Reading, events: &mut StepEvents) {
        let now = self.now();
        let mut guard = self.lock_blocking();
        let registry = &mut *guard;

        // The slot may have been disabled while the read was in flight
        let Some(instance) = registry.slots[kind.index()].as_mut().filter(|i| i.enabled) else {
            return;
        };

        let sample = Sample {
            reading,
            timestamp: now,
        };
        instance.sample = Some(sample);
        instance.last_update = now;
        instance.error_count = 0;

        instance.primary.record(reading.primary());
        if let Some(secondary) = reading.secondary() {
            instance.secondary.record(secondary);
        }
        drop(guard);

        log::debug!("sensor {kind} updated: {reading:?}");
        let _ = events.push(SensorEvent::DataUpdate { kind, sample });
    }

    /// Count a failure and walk the escalation ladder
    fn escalate(&self, kind: SensorKind, events: &mut StepEvents) {
        let config = self.shared.config;

        let hard_fault = {
            let mut registry = self.lock_blocking();
            let Some(instance) = registry.slots[kind.index()].as_mut().filter(|i| i.enabled)
            else {
                return;
            };

            instance.error_count += 1;
            let count = instance.error_count;
            log::warn!("sensor '{}' failure #{count}", instance.name);
            let _ = events.push(SensorEvent::Fault {
                kind,
                error_count: count,
            });

            if count == config.soft_retry_threshold {
                log::warn!("re-initializing sensor '{}'", instance.name);
                instance.status = SensorStatus::Initializing;
            }

            count == config.hard_fault_threshold
        };

        if hard_fault {
            let _ = self.with_adapter(kind, |adapter| {
                if let Err(e) = adapter.deinit() {
                    log::warn!("deinit failed for sensor {kind}: {e}");
                }
            });

            let mut guard = self.lock_blocking();
            let registry = &mut *guard;
            if let Some(instance) = registry.slots[kind.index()].as_mut() {
                if instance.enabled {
                    instance.enabled = false;
                    registry.active_count -= 1;
                    let _ = events.push(SensorEvent::StatusChange {
                        kind,
                        status: SensorStatus::Offline,
                    });
                }
                instance.status = SensorStatus::Error;
                log::warn!("sensor '{}' disabled after repeated failures", instance.name);
                let _ = events.push(SensorEvent::StatusChange {
                    kind,
                    status: SensorStatus::Error,
                });
            }
        }
    }
}
