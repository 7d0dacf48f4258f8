//! Sensor identity and measurement vocabulary
//!
//! `SensorKind` is the closed set of sensor slots the hub manages; it doubles
//! as the registry index, so the cardinality is fixed at compile time.
//! `Reading` carries the per-kind measurement payload as a tagged enum, and
//! `Sample` stamps a reading with its capture time.

use crate::time::Timestamp;
use core::fmt;

/// Identity of a sensor slot
///
/// One registry slot exists per kind; the discriminant is the slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SensorKind {
    /// Ambient light level
    Light = 0,
    /// Combined temperature / relative-humidity probe
    Climate = 1,
    /// Smoke / combustible-gas concentration
    Smoke = 2,
}

impl SensorKind {
    /// Number of sensor slots
    pub const COUNT: usize = 3;

    /// All kinds in registry (slot) order
    pub const ALL: [SensorKind; Self::COUNT] =
        [SensorKind::Light, SensorKind::Climate, SensorKind::Smoke];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            SensorKind::Light => "light",
            SensorKind::Climate => "climate",
            SensorKind::Smoke => "smoke",
        }
    }

    /// Get display unit for the primary channel
    pub const fn unit(&self) -> &'static str {
        match self {
            SensorKind::Light => "lx",
            SensorKind::Climate => "°C",
            SensorKind::Smoke => "ppm",
        }
    }

    /// Whether this kind produces a secondary measurement channel
    pub const fn has_secondary(&self) -> bool {
        matches!(self, SensorKind::Climate)
    }

    /// Registry slot index
    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle status of a sensor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SensorStatus {
    /// Not enabled; the rest state before registration or after disable
    Offline = 0,
    /// Enabled, waiting for a successful hardware bring-up
    Initializing = 1,
    /// Last read succeeded
    Online = 2,
    /// Hard fault threshold reached; stays here until re-enabled
    Error = 3,
}

impl SensorStatus {
    /// Get human-readable status string
    pub const fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Offline => "OFFLINE",
            SensorStatus::Initializing => "INITIALIZING",
            SensorStatus::Online => "ONLINE",
            SensorStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement payload, tagged by sensor kind
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reading {
    /// Illuminance from the light sensor
    Light {
        /// Illuminance in lux
        lux: f32,
    },
    /// Paired temperature / humidity measurement
    Climate {
        /// Temperature in °C
        temperature: f32,
        /// Relative humidity in %RH
        humidity: f32,
    },
    /// Smoke concentration
    Smoke {
        /// Concentration in ppm
        ppm: f32,
    },
}

impl Reading {
    /// Kind this payload belongs to
    pub const fn kind(&self) -> SensorKind {
        match self {
            Reading::Light { .. } => SensorKind::Light,
            Reading::Climate { .. } => SensorKind::Climate,
            Reading::Smoke { .. } => SensorKind::Smoke,
        }
    }

    /// Primary scalar channel (lux, temperature or ppm)
    pub const fn primary(&self) -> f32 {
        match self {
            Reading::Light { lux } => *lux,
            Reading::Climate { temperature, .. } => *temperature,
            Reading::Smoke { ppm } => *ppm,
        }
    }

    /// Secondary scalar channel, if the kind has one (humidity)
    pub const fn secondary(&self) -> Option<f32> {
        match self {
            Reading::Climate { humidity, .. } => Some(*humidity),
            _ => None,
        }
    }
}

/// A reading stamped with its capture time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// The measurement payload
    pub reading: Reading,
    /// Capture timestamp in milliseconds
    pub timestamp: Timestamp,
}

impl Sample {
    /// Age of this sample relative to `now`, in milliseconds
    pub fn age_ms(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    /// Whether the sample is younger than `max_age_ms` at time `now`
    pub fn is_fresh(&self, now: Timestamp, max_age_ms: u32) -> bool {
        self.age_ms(now) <= max_age_ms as u64
    }
}
