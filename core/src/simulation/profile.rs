//! Per-mode and per-species parameter tables.

use crate::record::{MovementMode, Species};

/// Standard deviation of the per-axis accelerometer noise, m/s².
pub const ACCEL_NOISE_STD: f64 = 0.05;
/// Standard deviation of the per-axis gyroscope noise, deg/s.
pub const GYRO_NOISE_STD: f64 = 0.1;
/// Standard deviation of the body temperature noise, °C.
pub const TEMPERATURE_NOISE_STD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Distance covered per step, metres.
    pub step_m: f64,
    /// Base acceleration per axis, m/s².
    pub accel_base: f64,
    /// Base angular velocity per axis, deg/s.
    pub gyro_base: f64,
}

impl MotionProfile {
    const REST: MotionProfile = MotionProfile {
        step_m: 0.1,
        accel_base: 0.01,
        gyro_base: 0.01,
    };
    const WALK: MotionProfile = MotionProfile {
        step_m: 1.0,
        accel_base: 0.2,
        gyro_base: 1.0,
    };
    const RUN: MotionProfile = MotionProfile {
        step_m: 5.0,
        accel_base: 1.0,
        gyro_base: 5.0,
    };
    const FLY: MotionProfile = MotionProfile {
        step_m: 10.0,
        accel_base: 2.0,
        gyro_base: 10.0,
    };

    /// Unrecognized modes move like walking.
    pub fn for_mode(mode: &MovementMode) -> Self {
        match mode {
            MovementMode::Rest => Self::REST,
            MovementMode::Walk => Self::WALK,
            MovementMode::Run => Self::RUN,
            MovementMode::Fly => Self::FLY,
            MovementMode::Other(_) => Self::WALK,
        }
    }
}

/// Core body temperature baseline, °C. Unknown species use the deer value.
pub fn baseline_temperature(species: &Species) -> f64 {
    match species {
        Species::Deer => 38.5,
        Species::Wolf => 39.0,
        Species::Eagle => 41.0,
        Species::Other(_) => 38.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_falls_back_to_walk() {
        assert_eq!(
            MotionProfile::for_mode(&MovementMode::Other("swim".into())),
            MotionProfile::for_mode(&MovementMode::Walk)
        );
        assert_eq!(MotionProfile::for_mode(&MovementMode::Fly).step_m, 10.0);
    }

    #[test]
    fn unknown_species_falls_back_to_default_baseline() {
        assert_eq!(baseline_temperature(&Species::Other("lynx".into())), 38.5);
        assert_eq!(baseline_temperature(&Species::Eagle), 41.0);
    }
}
