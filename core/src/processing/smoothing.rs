use crate::prelude::{ProcessingStage, StageOutput, StageResult};
use crate::record::{columns, Column, Frame};

/// Centered moving average over the sensor columns. Windows shrink at the
/// edges instead of padding, and a single present value is enough.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverageStage {
    window: usize,
}

impl MovingAverageStage {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }
}

pub fn centered_moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let before = window / 2;
    let after = window - 1 - before;
    let n = values.len();

    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(before);
            let hi = (i + after).min(n.saturating_sub(1));
            let (sum, count) = values[lo..=hi]
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

impl ProcessingStage for MovingAverageStage {
    fn name(&self) -> &'static str {
        "moving-average"
    }

    fn execute(&self, input: &Frame) -> StageResult<StageOutput> {
        let mut frame = input.clone();
        let mut smoothed = 0usize;

        for name in columns::SENSOR {
            if let Some(values) = input.numeric(name) {
                let averaged = centered_moving_average(values, self.window);
                frame.set_column(Column::numeric(name, averaged))?;
                smoothed += 1;
            }
        }

        Ok(StageOutput::new(frame).with_note(format!(
            "smoothed {} columns (window {})",
            smoothed, self.window
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_windows_shrink() {
        let values: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
            .iter()
            .map(|&v| Some(v))
            .collect();
        let out = centered_moving_average(&values, 5);
        assert_eq!(
            out,
            vec![Some(2.0), Some(2.5), Some(3.0), Some(4.0), Some(4.5), Some(5.0)]
        );
    }

    #[test]
    fn gaps_are_skipped_within_a_window() {
        let out = centered_moving_average(&[Some(1.0), None, Some(3.0)], 3);
        assert_eq!(out, vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(centered_moving_average(&[None], 5), vec![None]);
    }

    #[test]
    fn empty_column_stays_empty() {
        assert!(centered_moving_average(&[], 5).is_empty());
    }

    #[test]
    fn stage_smooths_only_sensor_columns() {
        let frame = Frame::from_columns(vec![
            Column::dense("compass", [0.0, 90.0, 180.0]),
            Column::dense("accel_y", [0.0, 3.0, 0.0]),
        ])
        .unwrap();
        let out = MovingAverageStage::new(5).execute(&frame).unwrap().frame;
        assert_eq!(out.numeric("compass"), frame.numeric("compass"));
        assert_eq!(out.numeric("accel_y").unwrap(), &[Some(1.0); 3]);
    }
}
