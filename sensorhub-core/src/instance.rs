//! Sensor instance and registry state
//!
//! One pre-shaped slot per [`SensorKind`]; slots are populated by
//! registration and mutated only under the hub's data mutex. Instances are
//! never destroyed, only disabled.

use crate::errors::{RegistryError, RegistryResult};
use crate::events::SensorEvent;
use crate::history::{HistoryBuffer, HISTORY_LEN};
use crate::stats::ChannelStats;
use crate::time::Timestamp;
use crate::types::{Sample, SensorKind, SensorStatus};
use heapless::String;

/// Maximum stored length of a sensor display name; longer names truncate
pub const MAX_NAME_LEN: usize = 32;

/// One measurement channel: rolling history plus running statistics
#[derive(Debug, Clone)]
pub(crate) struct Channel {
    pub history: HistoryBuffer<HISTORY_LEN>,
    pub stats: ChannelStats,
}

impl Channel {
    pub const fn new() -> Self {
        Self {
            history: HistoryBuffer::new(),
            stats: ChannelStats::new(),
        }
    }

    /// Push a value and fold it into the statistics
    pub fn record(&mut self, value: f32) {
        self.history.push(value);
        self.stats.record(value, &self.history);
    }
}

/// Live state of one registered sensor slot
#[derive(Debug)]
pub(crate) struct SensorInstance {
    pub name: String<MAX_NAME_LEN>,
    pub status: SensorStatus,
    pub enabled: bool,
    pub sample: Option<Sample>,
    pub interval_ms: u32,
    pub last_update: Timestamp,
    pub error_count: u32,
    pub primary: Channel,
    /// Populated only for kinds with a secondary channel
    pub secondary: Channel,
}

impl SensorInstance {
    pub fn new(name: &str, interval_ms: u32) -> Self {
        let mut stored = String::new();
        for ch in name.chars() {
            if stored.push(ch).is_err() {
                break;
            }
        }

        Self {
            name: stored,
            status: SensorStatus::Offline,
            enabled: false,
            sample: None,
            interval_ms,
            last_update: 0,
            error_count: 0,
            primary: Channel::new(),
            secondary: Channel::new(),
        }
    }

    /// Whether a read is due at time `now`
    pub fn due(&self, now: Timestamp) -> bool {
        now.saturating_sub(self.last_update) >= self.interval_ms as u64
    }
}

/// The instance table plus the active-sensor tally
pub(crate) struct RegistryState {
    pub slots: [Option<SensorInstance>; SensorKind::COUNT],
    pub active_count: u32,
}

impl RegistryState {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            active_count: 0,
        }
    }

    pub fn get(&self, kind: SensorKind) -> RegistryResult<&SensorInstance> {
        self.slots[kind.index()]
            .as_ref()
            .ok_or(RegistryError::NotRegistered(kind))
    }

    pub fn get_mut(&mut self, kind: SensorKind) -> RegistryResult<&mut SensorInstance> {
        self.slots[kind.index()]
            .as_mut()
            .ok_or(RegistryError::NotRegistered(kind))
    }

    /// Flip a slot to enabled; `None` when it already was
    pub fn enable(&mut self, kind: SensorKind) -> RegistryResult<Option<SensorEvent>> {
        let instance = self.slots[kind.index()]
            .as_mut()
            .ok_or(RegistryError::NotRegistered(kind))?;

        if instance.enabled {
            return Ok(None);
        }

        instance.enabled = true;
        instance.status = SensorStatus::Initializing;
        instance.error_count = 0;
        self.active_count += 1;

        Ok(Some(SensorEvent::StatusChange {
            kind,
            status: SensorStatus::Initializing,
        }))
    }

    /// Flip a slot to disabled and `Offline`; `None` when it already was
    pub fn disable(&mut self, kind: SensorKind) -> RegistryResult<Option<SensorEvent>> {
        let instance = self.slots[kind.index()]
            .as_mut()
            .ok_or(RegistryError::NotRegistered(kind))?;

        if !instance.enabled {
            return Ok(None);
        }

        instance.enabled = false;
        instance.status = SensorStatus::Offline;
        self.active_count -= 1;

        Ok(Some(SensorEvent::StatusChange {
            kind,
            status: SensorStatus::Offline,
        }))
    }
}
