//! Error types for adapters and the registry
//!
//! Kept small and `Copy`: errors travel through the scheduler hot path and
//! into log lines, so they carry only inline context (`&'static str`, kinds,
//! counts) and no heap data.

use crate::types::SensorKind;
use thiserror_no_std::Error;

/// Result type for registry and query operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failure reported by a sensor adapter's init/read/deinit operations
///
/// The scheduler never propagates these beyond the fault ladder; they are
/// counted, logged and converted into status transitions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterError {
    /// Bus transaction failed (NACK, arbitration loss, CRC mismatch)
    #[error("bus transaction failed")]
    Bus,

    /// Device did not answer within the adapter's own deadline
    #[error("device timed out")]
    Timeout,

    /// Device is present but not ready for the requested operation
    #[error("device not ready")]
    NotReady,

    /// Raw data failed the adapter's plausibility checks
    #[error("invalid raw data")]
    InvalidData,

    /// Unrecoverable hardware condition
    #[error("hardware fault: {0}")]
    Hardware(&'static str),
}

/// Failure of a registry or query operation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The slot already holds a registered sensor
    #[error("sensor '{0}' is already registered")]
    AlreadyRegistered(SensorKind),

    /// No sensor has been registered for this kind
    #[error("sensor '{0}' is not registered")]
    NotRegistered(SensorKind),

    /// Sensor is disabled or has not produced a valid sample yet
    #[error("no data available for sensor '{0}'")]
    NoData(SensorKind),

    /// Secondary-channel query on a single-channel kind
    #[error("sensor '{0}' has no secondary channel")]
    NoSecondaryChannel(SensorKind),

    /// Requested polling interval is below the supported minimum
    #[error("interval {requested_ms} ms is below the minimum {min_ms} ms")]
    IntervalTooShort {
        /// Interval the caller asked for
        requested_ms: u32,
        /// Configured lower bound
        min_ms: u32,
    },

    /// Bounded wait for the data lock expired; treat as "no data this tick"
    #[error("timed out waiting for the data lock")]
    LockTimeout,
}

#[cfg(feature = "defmt")]
impl defmt::Format for AdapterError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Bus => defmt::write!(fmt, "bus transaction failed"),
            Self::Timeout => defmt::write!(fmt, "device timed out"),
            Self::NotReady => defmt::write!(fmt, "device not ready"),
            Self::InvalidData => defmt::write!(fmt, "invalid raw data"),
            Self::Hardware(reason) => defmt::write!(fmt, "hardware fault: {}", reason),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegistryError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::AlreadyRegistered(kind) => {
                defmt::write!(fmt, "sensor '{}' already registered", kind.name())
            }
            Self::NotRegistered(kind) => {
                defmt::write!(fmt, "sensor '{}' not registered", kind.name())
            }
            Self::NoData(kind) => defmt::write!(fmt, "no data for sensor '{}'", kind.name()),
            Self::NoSecondaryChannel(kind) => {
                defmt::write!(fmt, "sensor '{}' has no secondary channel", kind.name())
            }
            Self::IntervalTooShort { requested_ms, min_ms } => {
                defmt::write!(fmt, "interval {} ms below minimum {} ms", requested_ms, min_ms)
            }
            Self::LockTimeout => defmt::write!(fmt, "data lock timeout"),
        }
    }
}
