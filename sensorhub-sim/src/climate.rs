//! Simulated temperature/humidity probe

use sensorhub_core::{AdapterError, Reading, SensorAdapter};

use crate::noise::{triangle, Lcg};

/// Correlated temperature/humidity source
///
/// Temperature wanders around a setpoint; relative humidity moves against it
/// (warmer air, lower RH), the way a real room behaves.
pub struct SimClimate {
    lcg: Lcg,
    step: u32,
    base_temperature: f32,
    base_humidity: f32,
    initialized: bool,
}

impl SimClimate {
    /// Create a climate simulator around 22 °C / 55 %RH
    pub fn new(seed: u32) -> Self {
        Self {
            lcg: Lcg::new(seed),
            step: 0,
            base_temperature: 22.0,
            base_humidity: 55.0,
            initialized: false,
        }
    }

    /// Override the setpoints the simulation wanders around
    pub fn with_setpoints(mut self, temperature: f32, humidity: f32) -> Self {
        self.base_temperature = temperature;
        self.base_humidity = humidity;
        self
    }
}

impl SensorAdapter for SimClimate {
    fn init(&mut self) -> Result<(), AdapterError> {
        self.initialized = true;
        Ok(())
    }

    fn read(&mut self) -> Result<Reading, AdapterError> {
        if !self.initialized {
            return Err(AdapterError::NotReady);
        }

        // Slow ±1.5 °C sweep plus measurement noise
        let sweep = (triangle(self.step, 180) - 0.5) * 3.0;
        self.step = self.step.wrapping_add(1);

        let temperature = self.base_temperature + sweep + self.lcg.jitter(0.15);
        let humidity = (self.base_humidity - sweep * 2.5 + self.lcg.jitter(0.8))
            .clamp(0.0, 100.0);

        Ok(Reading::Climate {
            temperature,
            humidity,
        })
    }

    fn deinit(&mut self) -> Result<(), AdapterError> {
        self.initialized = false;
        Ok(())
    }

    fn unit(&self) -> &'static str {
        "°C"
    }
}
