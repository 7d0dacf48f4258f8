//! Event notification from the scheduler to the application
//!
//! One callback, registered last-wins, invoked synchronously from the
//! scheduler task with no data lock held. The callback must not block and
//! must not call back into registry mutators; the event value is transient
//! and should be copied out if it needs to outlive the call.

use crate::types::{Sample, SensorKind, SensorStatus};
use core::fmt;

/// Event published by the scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    /// A successful read committed a fresh sample
    DataUpdate {
        /// Sensor that produced the sample
        kind: SensorKind,
        /// The committed sample
        sample: Sample,
    },

    /// A sensor moved to a new lifecycle status
    StatusChange {
        /// Sensor whose status changed
        kind: SensorKind,
        /// The status it moved to
        status: SensorStatus,
    },

    /// An init or read attempt failed
    Fault {
        /// Sensor that failed
        kind: SensorKind,
        /// Consecutive failures so far, including this one
        error_count: u32,
    },
}

impl SensorEvent {
    /// Sensor this event concerns
    pub const fn sensor(&self) -> SensorKind {
        match self {
            SensorEvent::DataUpdate { kind, .. } => *kind,
            SensorEvent::StatusChange { kind, .. } => *kind,
            SensorEvent::Fault { kind, .. } => *kind,
        }
    }

    /// Tag identifying the event variant
    pub const fn kind(&self) -> SensorEventKind {
        match self {
            SensorEvent::DataUpdate { .. } => SensorEventKind::DataUpdate,
            SensorEvent::StatusChange { .. } => SensorEventKind::StatusChange,
            SensorEvent::Fault { .. } => SensorEventKind::Fault,
        }
    }
}

/// Discriminant of [`SensorEvent`], for dispatch and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEventKind {
    /// Fresh sample committed
    DataUpdate,
    /// Lifecycle status transition
    StatusChange,
    /// Failed init or read
    Fault,
}

impl SensorEventKind {
    /// Get human-readable event name
    pub const fn as_str(&self) -> &'static str {
        match self {
            SensorEventKind::DataUpdate => "DATA_UPDATE",
            SensorEventKind::StatusChange => "STATUS_CHANGE",
            SensorEventKind::Fault => "FAULT",
        }
    }
}

impl fmt::Display for SensorEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application callback receiving scheduler events
#[cfg(feature = "std")]
pub type EventCallback = Box<dyn Fn(&SensorEvent) + Send + Sync + 'static>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reading;

    #[test]
    fn event_accessors() {
        let event = SensorEvent::DataUpdate {
            kind: SensorKind::Light,
            sample: Sample {
                reading: Reading::Light { lux: 55.0 },
                timestamp: 10,
            },
        };
        assert_eq!(event.sensor(), SensorKind::Light);
        assert_eq!(event.kind(), SensorEventKind::DataUpdate);

        let event = SensorEvent::Fault {
            kind: SensorKind::Smoke,
            error_count: 3,
        };
        assert_eq!(event.kind().as_str(), "FAULT");
    }
}
