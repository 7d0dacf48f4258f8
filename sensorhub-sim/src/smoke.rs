//! Simulated smoke sensor

use sensorhub_core::{AdapterError, Reading, SensorAdapter};

use crate::noise::Lcg;

/// Smoke concentration source: a quiet baseline with an optional spike
///
/// The spike ramps up and decays over a configured window of readings,
/// useful for demonstrating alarm thresholds downstream.
pub struct SimSmoke {
    lcg: Lcg,
    step: u32,
    baseline_ppm: f32,
    spike: Option<Spike>,
    initialized: bool,
}

struct Spike {
    start: u32,
    length: u32,
    peak_ppm: f32,
}

impl SimSmoke {
    /// Create a smoke simulator with an 8 ppm clean-air baseline
    pub fn new(seed: u32) -> Self {
        Self {
            lcg: Lcg::new(seed),
            step: 0,
            baseline_ppm: 8.0,
            spike: None,
            initialized: false,
        }
    }

    /// Inject a smoke event peaking at `peak_ppm`, starting at reading
    /// `start` and lasting `length` readings
    pub fn with_spike(mut self, start: u32, length: u32, peak_ppm: f32) -> Self {
        self.spike = Some(Spike {
            start,
            length,
            peak_ppm,
        });
        self
    }

    fn spike_contribution(&self, step: u32) -> f32 {
        let Some(spike) = &self.spike else {
            return 0.0;
        };
        if step < spike.start || step >= spike.start + spike.length {
            return 0.0;
        }

        // Triangular rise and decay across the window
        let offset = (step - spike.start) as f32 / spike.length as f32;
        let shape = if offset < 0.5 {
            offset * 2.0
        } else {
            2.0 - offset * 2.0
        };
        spike.peak_ppm * shape
    }
}

impl SensorAdapter for SimSmoke {
    fn init(&mut self) -> Result<(), AdapterError> {
        self.initialized = true;
        Ok(())
    }

    fn read(&mut self) -> Result<Reading, AdapterError> {
        if !self.initialized {
            return Err(AdapterError::NotReady);
        }

        let step = self.step;
        self.step = self.step.wrapping_add(1);

        let ppm = self.baseline_ppm + self.spike_contribution(step) + self.lcg.jitter(0.5);
        Ok(Reading::Smoke {
            ppm: ppm.max(0.0),
        })
    }

    fn deinit(&mut self) -> Result<(), AdapterError> {
        self.initialized = false;
        Ok(())
    }

    fn unit(&self) -> &'static str {
        "ppm"
    }
}
