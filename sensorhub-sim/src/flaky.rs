//! Deterministic fault injection around any adapter

use sensorhub_core::{AdapterError, Reading, SensorAdapter};

/// Wrapper that makes an adapter fail on a fixed schedule
///
/// Fails the first `fail_first_inits` init attempts with `NotReady`, and
/// every `fail_read_every`-th read with `Bus`. Deinit and unit pass through.
/// Useful for walking the hub's soft-retry / hard-disable ladder in demos
/// and tests.
pub struct Flaky<A> {
    inner: A,
    fail_first_inits: u32,
    fail_read_every: u32,
    init_attempts: u32,
    read_attempts: u32,
}

impl<A> Flaky<A> {
    /// Wrap `inner` with no faults scheduled
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            fail_first_inits: 0,
            fail_read_every: 0,
            init_attempts: 0,
            read_attempts: 0,
        }
    }

    /// Fail the first `count` init attempts
    pub fn failing_first_inits(mut self, count: u32) -> Self {
        self.fail_first_inits = count;
        self
    }

    /// Fail every `n`-th read (0 disables read faults)
    pub fn failing_every_nth_read(mut self, n: u32) -> Self {
        self.fail_read_every = n;
        self
    }
}

impl<A: SensorAdapter> SensorAdapter for Flaky<A> {
    fn init(&mut self) -> Result<(), AdapterError> {
        self.init_attempts += 1;
        if self.init_attempts <= self.fail_first_inits {
            log::debug!("injecting init failure #{}", self.init_attempts);
            return Err(AdapterError::NotReady);
        }
        self.inner.init()
    }

    fn read(&mut self) -> Result<Reading, AdapterError> {
        self.read_attempts += 1;
        if self.fail_read_every > 0 && self.read_attempts % self.fail_read_every == 0 {
            log::debug!("injecting read failure on attempt {}", self.read_attempts);
            return Err(AdapterError::Bus);
        }
        self.inner.read()
    }

    fn deinit(&mut self) -> Result<(), AdapterError> {
        self.inner.deinit()
    }

    fn unit(&self) -> &'static str {
        self.inner.unit()
    }
}
