//! Time management for the polling scheduler
//!
//! Provides a clock abstraction so the scheduler can run against a hardware
//! tick counter, the host monotonic clock, or a test-controlled source.

/// Timestamp in milliseconds since the time source's origin
pub type Timestamp = u64;

/// Source of time for the scheduler and query API
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Monotonic time anchored at creation
///
/// Starts at 0, always increases; immune to wall-clock adjustments.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Create a source whose timestamp 0 is "now"
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_millis() as Timestamp
    }
}

/// Manually advanced time source for testing
///
/// Clones share the same underlying counter, so a test can hold one handle
/// and advance time while the hub reads through another.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MockTimeSource {
    ticks: std::sync::Arc<core::sync::atomic::AtomicU64>,
}

#[cfg(feature = "std")]
impl MockTimeSource {
    /// Create a mock clock at the given timestamp
    pub fn new(start: Timestamp) -> Self {
        Self {
            ticks: std::sync::Arc::new(core::sync::atomic::AtomicU64::new(start)),
        }
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, timestamp: Timestamp) {
        self.ticks
            .store(timestamp, core::sync::atomic::Ordering::Relaxed);
    }

    /// Advance the clock by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.ticks
            .fetch_add(ms, core::sync::atomic::Ordering::Relaxed);
    }
}

#[cfg(feature = "std")]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.ticks.load(core::sync::atomic::Ordering::Relaxed)
    }
}
