use crate::math::stats::StatsHelper;
use crate::prelude::{ProcessingStage, StageOutput, StageResult};
use crate::record::{columns, Column, Frame};

/// Spread within this many ulps of the mean is rounding residue from earlier
/// averaging, not signal.
const ZERO_VARIANCE_ULPS: f64 = 16.0;

/// Z-score normalizes each sensor column that is present and varies.
///
/// Values are overwritten: the output carries no raw physical units for these
/// columns. Latitude and longitude are never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeStage;

impl NormalizeStage {
    pub fn new() -> Self {
        Self
    }
}

/// Returns the z-scored column, or `None` when its standard deviation is
/// zero or undefined.
pub fn zscore(values: &[Option<f64>]) -> Option<Vec<Option<f64>>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let mean = StatsHelper::mean(&present)?;
    let std = StatsHelper::sample_std(&present)?;
    if std <= 0.0 || std <= ZERO_VARIANCE_ULPS * f64::EPSILON * mean.abs() {
        return None;
    }
    Some(values.iter().map(|v| v.map(|x| (x - mean) / std)).collect())
}

impl ProcessingStage for NormalizeStage {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn execute(&self, input: &Frame) -> StageResult<StageOutput> {
        let mut frame = input.clone();
        let mut normalized = Vec::new();

        for name in columns::SENSOR {
            let Some(values) = input.numeric(name) else {
                continue;
            };
            if let Some(scaled) = zscore(values) {
                frame.set_column(Column::numeric(name, scaled))?;
                normalized.push(name);
            }
        }

        Ok(StageOutput::new(frame).with_note(format!("normalized {:?}", normalized)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::from_columns(vec![
            Column::dense("latitude", [45.0, 45.0001, 45.0002, 45.0003]),
            Column::dense("accel_x", [0.1, 0.2, 0.1, 0.2]),
            Column::dense("gyro_x", [0.01; 4]),
            Column::dense("temperature", [38.0, 38.1, 38.2, 38.3]),
        ])
        .unwrap()
    }

    #[test]
    fn varying_columns_get_zero_mean_unit_std() {
        let out = NormalizeStage::new().execute(&frame()).unwrap().frame;
        for name in ["accel_x", "temperature"] {
            let values: Vec<f64> = out
                .numeric(name)
                .unwrap()
                .iter()
                .flatten()
                .copied()
                .collect();
            let mean = StatsHelper::mean(&values).unwrap();
            let std = StatsHelper::sample_std(&values).unwrap();
            assert!(mean.abs() < 1e-9, "{} mean {}", name, mean);
            assert!((std - 1.0).abs() < 1e-9, "{} std {}", name, std);
        }
    }

    #[test]
    fn constant_and_geospatial_columns_are_untouched() {
        let input = frame();
        let out = NormalizeStage::new().execute(&input).unwrap().frame;
        assert_eq!(out.numeric("gyro_x"), input.numeric("gyro_x"));
        assert_eq!(out.numeric("latitude"), input.numeric("latitude"));
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let once = NormalizeStage::new().execute(&frame()).unwrap().frame;
        let twice = NormalizeStage::new().execute(&once).unwrap().frame;
        let a = once.numeric("temperature").unwrap();
        let b = twice.numeric("temperature").unwrap();
        for (x, y) in a.iter().zip(b) {
            assert!((x.unwrap() - y.unwrap()).abs() < 1e-9);
        }
        assert_eq!(twice.numeric("gyro_x"), once.numeric("gyro_x"));
    }

    #[test]
    fn rounding_residue_counts_as_zero_variance() {
        let values = [Some(0.01), Some(0.010000000000000002), Some(0.01)];
        assert_eq!(zscore(&values), None);
    }

    #[test]
    fn tiny_spread_on_a_large_offset_is_still_normalized() {
        let values = [Some(1e6), Some(1e6 + 1e-7), Some(1e6 + 2e-7), Some(1e6 + 3e-7)];
        let scaled = zscore(&values).unwrap();
        assert!(scaled[0].unwrap() < 0.0);
        assert!(scaled[3].unwrap() > 0.0);
    }

    #[test]
    fn single_row_is_left_alone() {
        assert_eq!(zscore(&[Some(3.0)]), None);
    }
}
