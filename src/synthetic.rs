//! Pseudo-random telemetry for exercising the meters without a device.
//!
//! Selected once at start-up (mutually exclusive with the real link), this
//! source fabricates fully-available readings over each sensor's nominal
//! range and bypasses the telegram decoder entirely.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::telegram::{Reading, Sample};

/// Generator of plausible five-field readings.
#[derive(Debug)]
pub struct SyntheticTelemetry {
    rng: ThreadRng,
}

impl SyntheticTelemetry {
    /// Creates a generator seeded from the thread RNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }

    /// Produces one fully-available reading: potentiometer over the raw
    /// input range, temperatures over the sensors' rated span, humidities
    /// over 0–100 %.
    pub fn next_reading(&mut self) -> Reading {
        Reading {
            potentiometer: Sample::Value(self.rng.random_range(0..1023)),
            temp_a: Sample::Value(self.rng.random_range(-10.0..70.0)),
            humidity_a: Sample::Value(self.rng.random_range(0.0..100.0)),
            temp_b: Sample::Value(self.rng.random_range(-10.0..70.0)),
            humidity_b: Sample::Value(self.rng.random_range(0.0..100.0)),
        }
    }
}

impl Default for SyntheticTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_are_always_fully_available() {
        let mut source = SyntheticTelemetry::new();
        for _ in 0..100 {
            let reading = source.next_reading();
            assert!(reading.potentiometer.is_available());
            assert!(reading.temp_a.is_available());
            assert!(reading.humidity_a.is_available());
            assert!(reading.temp_b.is_available());
            assert!(reading.humidity_b.is_available());
        }
    }

    #[test]
    fn readings_stay_in_nominal_ranges() {
        let mut source = SyntheticTelemetry::new();
        for _ in 0..100 {
            let reading = source.next_reading();
            let pot = reading.potentiometer.value().unwrap();
            assert!((0..1023).contains(&pot));

            let temp = reading.temp_a.value().unwrap();
            assert!((-10.0..70.0).contains(&temp));

            let hum = reading.humidity_b.value().unwrap();
            assert!((0.0..100.0).contains(&hum));
        }
    }
}
