//! Tunables for the polling scheduler and fault escalation
//!
//! Defaults reproduce the reference firmware: a 100 ms nominal cycle with a
//! 10 ms sleep floor, a 1 s settle delay before the first sweep, soft
//! re-init after 5 consecutive failures, hard disable after 10, and a 100 ms
//! bounded wait on the read side of the data lock.

/// Scheduler and escalation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    /// Nominal poll loop period in milliseconds
    pub poll_period_ms: u32,
    /// Minimum sleep when a sweep overruns the period; never busy-spin
    pub min_sleep_ms: u32,
    /// Delay before the first sweep, letting buses settle after power-up
    pub startup_delay_ms: u32,
    /// Consecutive failures that trigger a re-init attempt
    pub soft_retry_threshold: u32,
    /// Consecutive failures that disable the sensor with `Error` status
    pub hard_fault_threshold: u32,
    /// Lower bound accepted by `set_update_interval`
    pub min_update_interval_ms: u32,
    /// Bounded wait for read-side data lock acquisition
    pub read_lock_timeout_ms: u32,
    /// Emit a liveness log line every this many cycles (0 disables)
    pub liveness_log_every: u32,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            poll_period_ms: 100,
            min_sleep_ms: 10,
            startup_delay_ms: 1000,
            soft_retry_threshold: 5,
            hard_fault_threshold: 10,
            min_update_interval_ms: 100,
            read_lock_timeout_ms: 100,
            liveness_log_every: 100,
        }
    }
}

impl HubConfig {
    /// Override the escalation thresholds
    pub fn with_thresholds(mut self, soft: u32, hard: u32) -> Self {
        self.soft_retry_threshold = soft;
        self.hard_fault_threshold = hard;
        self
    }

    /// Override the nominal poll period
    pub fn with_poll_period(mut self, ms: u32) -> Self {
        self.poll_period_ms = ms;
        self
    }

    /// Override the settle delay before the first sweep
    pub fn with_startup_delay(mut self, ms: u32) -> Self {
        self.startup_delay_ms = ms;
        self
    }

    /// Override the read-side lock wait bound
    pub fn with_read_lock_timeout(mut self, ms: u32) -> Self {
        self.read_lock_timeout_ms = ms;
        self
    }

    /// Settings suited to tests: no settle delay, tight loop, quiet logs
    pub fn fast() -> Self {
        Self {
            poll_period_ms: 10,
            min_sleep_ms: 1,
            startup_delay_ms: 0,
            liveness_log_every: 0,
            ..Self::default()
        }
    }
}
