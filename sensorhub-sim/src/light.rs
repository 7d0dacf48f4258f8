//! Simulated ambient light sensor

use sensorhub_core::{AdapterError, Reading, SensorAdapter};

use crate::noise::{triangle, Lcg};

/// Pseudo-diurnal light source
///
/// Produces a triangle curve between `floor_lux` and `floor_lux + swing_lux`
/// over `period` readings, with a little jitter on top.
pub struct SimLight {
    lcg: Lcg,
    step: u32,
    period: u32,
    floor_lux: f32,
    swing_lux: f32,
    initialized: bool,
}

impl SimLight {
    /// Create a light simulator with the default indoor profile
    pub fn new(seed: u32) -> Self {
        Self {
            lcg: Lcg::new(seed),
            step: 0,
            period: 120,
            floor_lux: 40.0,
            swing_lux: 360.0,
            initialized: false,
        }
    }

    /// Override the lux range swept by the curve
    pub fn with_range(mut self, floor_lux: f32, swing_lux: f32) -> Self {
        self.floor_lux = floor_lux;
        self.swing_lux = swing_lux;
        self
    }
}

impl SensorAdapter for SimLight {
    fn init(&mut self) -> Result<(), AdapterError> {
        self.initialized = true;
        Ok(())
    }

    fn read(&mut self) -> Result<Reading, AdapterError> {
        if !self.initialized {
            return Err(AdapterError::NotReady);
        }

        let wave = triangle(self.step, self.period);
        self.step = self.step.wrapping_add(1);

        let lux = self.floor_lux + self.swing_lux * wave + self.lcg.jitter(2.0);
        Ok(Reading::Light {
            lux: lux.max(0.0),
        })
    }

    fn deinit(&mut self) -> Result<(), AdapterError> {
        self.initialized = false;
        Ok(())
    }

    fn unit(&self) -> &'static str {
        "lx"
    }
}
