//! The sensor hub: registration, lifecycle control and the query API
//!
//! `SensorHub` is an explicit handle owned by the application root — there is
//! no global registry. Clones share the same state, so one clone can live in
//! the polling thread while others serve GUI timers.
//!
//! Locking model: the instance table sits behind one data mutex with small
//! critical sections (plain copies in and out). Adapters live behind a
//! separate mutex that only init/read/deinit take, so a slow bus transaction
//! never extends the data lock. Readers acquire the data lock with a bounded
//! wait and report [`RegistryError::LockTimeout`] as "no data"; the
//! scheduler's commit path blocks until it gets the lock, so a measurement
//! read from hardware is never dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};

use heapless::Vec;

use crate::config::HubConfig;
use crate::errors::{RegistryError, RegistryResult};
use crate::events::{EventCallback, SensorEvent};
use crate::history::HISTORY_LEN;
use crate::instance::{RegistryState, SensorInstance};
use crate::stats::ChannelStats;
use crate::time::{MonotonicTime, TimeSource, Timestamp};
use crate::traits::SensorAdapter;
use crate::types::{Sample, SensorKind, SensorStatus};

pub(crate) type AdapterTable = [Option<Box<dyn SensorAdapter>>; SensorKind::COUNT];

pub(crate) struct Shared {
    pub registry: Mutex<RegistryState>,
    pub adapters: Mutex<AdapterTable>,
    pub callback: Mutex<Option<EventCallback>>,
    pub clock: Box<dyn TimeSource + Send + Sync>,
    pub config: HubConfig,
    pub running: AtomicBool,
}

/// Handle to the sensor registry, scheduler and query API
#[derive(Clone)]
pub struct SensorHub {
    pub(crate) shared: Arc<Shared>,
}

impl SensorHub {
    /// Create a hub on the host monotonic clock
    pub fn new(config: HubConfig) -> Self {
        Self::with_time_source(config, MonotonicTime::new())
    }

    /// Create a hub on a caller-supplied clock
    ///
    /// Tests pair this with
    /// [`MockTimeSource`](crate::time::MockTimeSource) and drive
    /// [`run_cycle`](Self::run_cycle) directly.
    pub fn with_time_source(
        config: HubConfig,
        clock: impl TimeSource + Send + Sync + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(RegistryState::new()),
                adapters: Mutex::new(core::array::from_fn(|_| None)),
                callback: Mutex::new(None),
                clock: Box::new(clock),
                config,
                running: AtomicBool::new(false),
            }),
        }
    }

    /// Scheduler and escalation settings this hub runs with
    pub fn config(&self) -> &HubConfig {
        &self.shared.config
    }

    /// Register a sensor and immediately enable it
    ///
    /// The display name is truncated to [`MAX_NAME_LEN`](crate::MAX_NAME_LEN)
    /// characters. Emits `StatusChange(Initializing)`; the first init attempt
    /// happens on the next scheduler cycle.
    pub fn register(
        &self,
        kind: SensorKind,
        name: &str,
        adapter: impl SensorAdapter + 'static,
        interval_ms: u32,
    ) -> RegistryResult<()> {
        {
            let mut registry = self.lock_blocking();
            if registry.slots[kind.index()].is_some() {
                return Err(RegistryError::AlreadyRegistered(kind));
            }
            registry.slots[kind.index()] = Some(SensorInstance::new(name, interval_ms));
        }
        {
            let mut adapters = lock_recovering(&self.shared.adapters);
            adapters[kind.index()] = Some(Box::new(adapter));
        }

        log::info!("registered sensor '{name}' as {kind}, interval {interval_ms} ms");
        self.enable(kind)
    }

    /// Enable a registered sensor; idempotent
    ///
    /// A previously disabled or hard-faulted sensor restarts with a cleared
    /// error counter at `Initializing`.
    pub fn enable(&self, kind: SensorKind) -> RegistryResult<()> {
        let event = {
            let mut registry = self.lock_blocking();
            registry.enable(kind)?
        };

        if let Some(event) = event {
            log::info!("enabled sensor {kind}");
            self.dispatch(&event);
        }
        Ok(())
    }

    /// Disable a registered sensor; idempotent
    ///
    /// Runs the adapter's `deinit` before the slot goes `Offline`. The
    /// instance stays registered and keeps its history.
    pub fn disable(&self, kind: SensorKind) -> RegistryResult<()> {
        {
            let registry = self.lock_blocking();
            if !registry.get(kind)?.enabled {
                return Ok(());
            }
        }

        // Deinit outside the data lock; an in-flight read finishes first
        // because both serialize on the adapter table.
        let _ = self.with_adapter(kind, |adapter| {
            if let Err(e) = adapter.deinit() {
                log::warn!("deinit failed for sensor {kind}: {e}");
            }
        });

        let event = {
            let mut registry = self.lock_blocking();
            registry.disable(kind)?
        };

        if let Some(event) = event {
            log::info!("disabled sensor {kind}");
            self.dispatch(&event);
        }
        Ok(())
    }

    /// Change the polling interval, effective from the next cycle
    pub fn set_update_interval(&self, kind: SensorKind, interval_ms: u32) -> RegistryResult<()> {
        let min_ms = self.shared.config.min_update_interval_ms;
        if interval_ms < min_ms {
            return Err(RegistryError::IntervalTooShort {
                requested_ms: interval_ms,
                min_ms,
            });
        }

        let mut registry = self.lock_blocking();
        registry.get_mut(kind)?.interval_ms = interval_ms;
        drop(registry);

        log::info!("sensor {kind} update interval set to {interval_ms} ms");
        Ok(())
    }

    /// Install the event callback; the last registration wins
    pub fn register_event_callback<F>(&self, callback: F)
    where
        F: Fn(&SensorEvent) + Send + Sync + 'static,
    {
        *lock_recovering(&self.shared.callback) = Some(Box::new(callback));
    }

    /// Latest committed sample for an enabled sensor
    pub fn sensor_data(&self, kind: SensorKind) -> RegistryResult<Sample> {
        let registry = self.lock_bounded()?;
        let instance = registry.get(kind)?;
        if !instance.enabled {
            return Err(RegistryError::NoData(kind));
        }
        instance.sample.ok_or(RegistryError::NoData(kind))
    }

    /// Current lifecycle status of a registered sensor
    pub fn sensor_status(&self, kind: SensorKind) -> RegistryResult<SensorStatus> {
        let registry = self.lock_bounded()?;
        Ok(registry.get(kind)?.status)
    }

    /// Primary-channel statistics; valid once at least one sample exists
    pub fn stats(&self, kind: SensorKind) -> RegistryResult<ChannelStats> {
        let registry = self.lock_bounded()?;
        let instance = registry.get(kind)?;
        if !instance.enabled || instance.primary.history.is_empty() {
            return Err(RegistryError::NoData(kind));
        }
        Ok(instance.primary.stats)
    }

    /// Secondary-channel statistics for dual-channel kinds
    pub fn secondary_stats(&self, kind: SensorKind) -> RegistryResult<ChannelStats> {
        if !kind.has_secondary() {
            return Err(RegistryError::NoSecondaryChannel(kind));
        }

        let registry = self.lock_bounded()?;
        let instance = registry.get(kind)?;
        if !instance.enabled || instance.secondary.history.is_empty() {
            return Err(RegistryError::NoData(kind));
        }
        Ok(instance.secondary.stats)
    }

    /// Chronological copy of the primary history, oldest first
    ///
    /// The returned buffer is owned by the caller; later scheduler commits
    /// do not touch it.
    pub fn primary_history(&self, kind: SensorKind) -> RegistryResult<Vec<f32, HISTORY_LEN>> {
        let registry = self.lock_bounded()?;
        let instance = registry.get(kind)?;
        if !instance.enabled || instance.primary.history.is_empty() {
            return Err(RegistryError::NoData(kind));
        }
        Ok(instance.primary.history.snapshot())
    }

    /// Chronological copy of the secondary history for dual-channel kinds
    pub fn secondary_history(&self, kind: SensorKind) -> RegistryResult<Vec<f32, HISTORY_LEN>> {
        if !kind.has_secondary() {
            return Err(RegistryError::NoSecondaryChannel(kind));
        }

        let registry = self.lock_bounded()?;
        let instance = registry.get(kind)?;
        if !instance.enabled || instance.secondary.history.is_empty() {
            return Err(RegistryError::NoData(kind));
        }
        Ok(instance.secondary.history.snapshot())
    }

    /// Display unit reported by the adapter registered for `kind`
    pub fn sensor_unit(&self, kind: SensorKind) -> RegistryResult<&'static str> {
        self.with_adapter(kind, |adapter| adapter.unit())
            .ok_or(RegistryError::NotRegistered(kind))
    }

    /// Number of currently enabled sensors
    pub fn active_sensor_count(&self) -> usize {
        self.lock_blocking().active_count as usize
    }

    /// Current hub timestamp, from the configured time source
    pub fn now(&self) -> Timestamp {
        self.shared.clock.now()
    }

    /// Blocking data-lock acquisition for the write path
    pub(crate) fn lock_blocking(&self) -> MutexGuard<'_, RegistryState> {
        lock_recovering(&self.shared.registry)
    }

    /// Bounded data-lock acquisition for the read path
    ///
    /// The bound is wall-clock real time, independent of the hub's own
    /// (possibly mocked) time source.
    pub(crate) fn lock_bounded(&self) -> RegistryResult<MutexGuard<'_, RegistryState>> {
        let deadline =
            Instant::now() + Duration::from_millis(self.shared.config.read_lock_timeout_ms as u64);

        loop {
            match self.shared.registry.try_lock() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::Poisoned(poisoned)) => return Ok(poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(RegistryError::LockTimeout);
                    }
                    std::thread::yield_now();
                }
            }
        }
    }

    /// Run `f` on the adapter registered for `kind`, serialized on the
    /// adapter table
    pub(crate) fn with_adapter<R>(
        &self,
        kind: SensorKind,
        f: impl FnOnce(&mut dyn SensorAdapter) -> R,
    ) -> Option<R> {
        let mut adapters = lock_recovering(&self.shared.adapters);
        match adapters[kind.index()].as_mut() {
            Some(adapter) => Some(f(&mut **adapter)),
            None => None,
        }
    }

    /// Invoke the registered event callback, if any
    pub(crate) fn dispatch(&self, event: &SensorEvent) {
        let callback = lock_recovering(&self.shared.callback);
        if let Some(callback) = callback.as_ref() {
            callback(event);
        }
    }
}

/// Acquire a mutex, recovering the guard if a panicking thread poisoned it;
/// registry state is updated field-by-field and stays structurally sound.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
