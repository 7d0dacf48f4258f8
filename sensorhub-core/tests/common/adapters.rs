//! Scripted fake adapters
//!
//! Replay fixed sequences of init/read outcomes so tests can steer the
//! scheduler's state machine exactly. Exhausted scripts fall back to
//! `Ok(())` for init and `Err(NotReady)` for read, so a test that runs one
//! cycle too many fails loudly instead of inventing data.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use sensorhub_core::{AdapterError, Reading, SensorAdapter};

/// Adapter that replays scripted init and read outcomes
pub struct ScriptedAdapter {
    inits: VecDeque<Result<(), AdapterError>>,
    reads: VecDeque<Result<Reading, AdapterError>>,
    deinit_calls: Arc<AtomicU32>,
    unit: &'static str,
}

impl ScriptedAdapter {
    pub fn new() -> Self {
        Self {
            inits: VecDeque::new(),
            reads: VecDeque::new(),
            deinit_calls: Arc::new(AtomicU32::new(0)),
            unit: "",
        }
    }

    /// Queue init outcomes; once exhausted, init succeeds
    pub fn with_inits(mut self, outcomes: impl IntoIterator<Item = Result<(), AdapterError>>) -> Self {
        self.inits.extend(outcomes);
        self
    }

    /// Queue read outcomes; once exhausted, reads fail with `NotReady`
    pub fn with_reads(
        mut self,
        outcomes: impl IntoIterator<Item = Result<Reading, AdapterError>>,
    ) -> Self {
        self.reads.extend(outcomes);
        self
    }

    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Shared counter of deinit invocations
    pub fn deinit_probe(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.deinit_calls)
    }
}

impl SensorAdapter for ScriptedAdapter {
    fn init(&mut self) -> Result<(), AdapterError> {
        self.inits.pop_front().unwrap_or(Ok(()))
    }

    fn read(&mut self) -> Result<Reading, AdapterError> {
        self.reads.pop_front().unwrap_or(Err(AdapterError::NotReady))
    }

    fn deinit(&mut self) -> Result<(), AdapterError> {
        self.deinit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn unit(&self) -> &'static str {
        self.unit
    }
}

/// Light adapter producing the given lux values in order
pub fn light_series(values: &[f32]) -> ScriptedAdapter {
    ScriptedAdapter::new()
        .with_reads(values.iter().map(|&lux| Ok(Reading::Light { lux })))
        .with_unit("lx")
}

/// Climate adapter producing the given (temperature, humidity) pairs
pub fn climate_series(pairs: &[(f32, f32)]) -> ScriptedAdapter {
    ScriptedAdapter::new()
        .with_reads(pairs.iter().map(|&(temperature, humidity)| {
            Ok(Reading::Climate {
                temperature,
                humidity,
            })
        }))
        .with_unit("°C")
}

/// Smoke adapter producing the given ppm values in order
pub fn smoke_series(values: &[f32]) -> ScriptedAdapter {
    ScriptedAdapter::new()
        .with_reads(values.iter().map(|&ppm| Ok(Reading::Smoke { ppm })))
        .with_unit("ppm")
}
