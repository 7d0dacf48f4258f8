//! Adapter capability set bound to each registered sensor
//!
//! An adapter wraps one physical device and owns its private state (bus
//! handles, calibration, warm-up flags). The hub owns the boxed adapter and
//! calls it only from the scheduler task, so implementations get `&mut self`
//! and never need their own locking — bus-level mutual exclusion, where
//! required, belongs inside the adapter around its wire transactions.

use crate::errors::AdapterError;
use crate::types::Reading;

/// Operations the scheduler drives on every registered sensor
pub trait SensorAdapter: Send {
    /// Perform hardware bring-up
    ///
    /// Called when the sensor enters `Initializing`, and again on every
    /// recovery attempt; must be safe to retry.
    fn init(&mut self) -> Result<(), AdapterError>;

    /// Perform one measurement cycle
    ///
    /// May block the scheduler task for bus I/O. The returned payload must
    /// match the kind the adapter was registered under; a mismatch is
    /// treated as a failed read.
    fn read(&mut self) -> Result<Reading, AdapterError>;

    /// Power down or release the device
    ///
    /// Called when the sensor is disabled, including the hard-fault path.
    fn deinit(&mut self) -> Result<(), AdapterError> {
        Ok(())
    }

    /// Display unit string for the primary channel
    fn unit(&self) -> &'static str {
        ""
    }
}
