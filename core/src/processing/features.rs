//! Derived kinematic and physiological features.
//!
//! Speed is computed from the raw geospatial columns, which the earlier
//! stages never modify. Acceleration magnitude and temperature trend read the
//! sensor columns as they arrive here, i.e. normalized and smoothed when run
//! inside the full pipeline.

use crate::math::geo::haversine_m;
use crate::math::poly::local_polynomial_smooth;
use crate::prelude::{ProcessingStage, StageConfig, StageOutput, StageResult};
use crate::record::{columns, Column, Frame};

#[derive(Debug, Clone)]
pub struct FeatureStage {
    trend_window: usize,
    trend_order: usize,
    min_elapsed_s: f64,
}

impl FeatureStage {
    pub fn new(config: &StageConfig) -> Self {
        Self {
            trend_window: config.trend_window,
            trend_order: config.trend_order,
            min_elapsed_s: config.min_elapsed_s,
        }
    }
}

impl Default for FeatureStage {
    fn default() -> Self {
        Self::new(&StageConfig::default())
    }
}

/// Ground speed in m/s between consecutive fixes. The first row is measured
/// against itself and therefore reads zero.
pub fn ground_speed(
    timestamps: &[Option<f64>],
    latitudes: &[Option<f64>],
    longitudes: &[Option<f64>],
    min_elapsed_s: f64,
) -> Vec<Option<f64>> {
    (0..timestamps.len())
        .map(|i| {
            let prev = i.saturating_sub(1);
            let distance = haversine_m(
                latitudes[prev]?,
                longitudes[prev]?,
                latitudes[i]?,
                longitudes[i]?,
            );
            let mut elapsed = timestamps[i]? - timestamps[prev]?;
            if elapsed.is_nan() || elapsed <= 0.0 {
                elapsed = min_elapsed_s;
            }
            Some(distance / elapsed)
        })
        .collect()
}

/// Euclidean norm of three per-row components.
pub fn vector_magnitude(
    x: &[Option<f64>],
    y: &[Option<f64>],
    z: &[Option<f64>],
) -> Vec<Option<f64>> {
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((x, y), z)| {
            let (x, y, z) = ((*x)?, (*y)?, (*z)?);
            Some((x * x + y * y + z * z).sqrt())
        })
        .collect()
}

impl ProcessingStage for FeatureStage {
    fn name(&self) -> &'static str {
        "features"
    }

    fn execute(&self, input: &Frame) -> StageResult<StageOutput> {
        let mut frame = input.clone();
        let mut derived = Vec::new();

        if let (Some(ts), Some(lat), Some(lon)) = (
            input.numeric(columns::TIMESTAMP),
            input.numeric(columns::LATITUDE),
            input.numeric(columns::LONGITUDE),
        ) {
            let speed = ground_speed(ts, lat, lon, self.min_elapsed_s);
            frame.set_column(Column::numeric(columns::SPEED, speed))?;
            derived.push(columns::SPEED);
        }

        if let Some(compass) = input.numeric(columns::COMPASS) {
            frame.set_column(Column::numeric(columns::HEADING, compass.to_vec()))?;
            derived.push(columns::HEADING);
        }

        if let (Some(x), Some(y), Some(z)) = (
            input.numeric(columns::ACCEL_X),
            input.numeric(columns::ACCEL_Y),
            input.numeric(columns::ACCEL_Z),
        ) {
            let magnitude = vector_magnitude(x, y, z);
            frame.set_column(Column::numeric(columns::ACCEL_MAG, magnitude))?;
            derived.push(columns::ACCEL_MAG);
        }

        if let Some(temperature) = input.numeric(columns::TEMPERATURE) {
            // The trend needs a gap-free series; gaps are filled upstream.
            let trend = match temperature.iter().copied().collect::<Option<Vec<f64>>>() {
                Some(dense) => {
                    local_polynomial_smooth(&dense, self.trend_window, self.trend_order)
                        .into_iter()
                        .map(Some)
                        .collect()
                }
                None => vec![None; temperature.len()],
            };
            frame.set_column(Column::numeric(columns::TEMP_TREND, trend))?;
            derived.push(columns::TEMP_TREND);
        }

        Ok(StageOutput::new(frame).with_note(format!("derived {:?}", derived)))
    }
}
