//! Core polling engine for SensorHub
//!
//! Drives a fixed set of heterogeneous sensors from one scheduler task,
//! keeping per-sensor rolling history, running statistics and a supervised
//! fault-recovery state machine.
//!
//! Key constraints:
//! - Fixed sensor set known at compile time, no allocation in the data path
//! - One data mutex, small critical sections, bounded reader waits
//! - A failing sensor never stops the others from being polled
//!
//! ```no_run
//! use sensorhub_core::{HubConfig, SensorHub, SensorKind};
//! # use sensorhub_core::{AdapterError, Reading, SensorAdapter};
//! # struct Probe;
//! # impl SensorAdapter for Probe {
//! #     fn init(&mut self) -> Result<(), AdapterError> { Ok(()) }
//! #     fn read(&mut self) -> Result<Reading, AdapterError> {
//! #         Ok(Reading::Light { lux: 120.0 })
//! #     }
//! # }
//!
//! let hub = SensorHub::new(HubConfig::default());
//! hub.register(SensorKind::Light, "GY-30", Probe, 2000)?;
//!
//! let handle = hub.spawn()?;
//! // ... GUI or other consumers call hub.sensor_data(..) concurrently
//! hub.stop();
//! handle.join().unwrap();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod errors;
pub mod events;
pub mod history;
pub mod stats;
pub mod time;
pub mod traits;
pub mod types;

#[cfg(feature = "std")]
mod hub;
#[cfg(feature = "std")]
mod instance;
#[cfg(feature = "std")]
mod scheduler;

// Public API
pub use config::HubConfig;
pub use errors::{AdapterError, RegistryError, RegistryResult};
pub use events::{SensorEvent, SensorEventKind};
pub use history::{HistoryBuffer, HISTORY_LEN};
pub use stats::ChannelStats;
pub use time::{TimeSource, Timestamp};
pub use traits::SensorAdapter;
pub use types::{Reading, Sample, SensorKind, SensorStatus};

#[cfg(feature = "std")]
pub use hub::SensorHub;
#[cfg(feature = "std")]
pub use instance::MAX_NAME_LEN;
#[cfg(feature = "std")]
pub use time::{MockTimeSource, MonotonicTime};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
