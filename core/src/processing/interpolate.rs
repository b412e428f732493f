use crate::math::stats::StatsHelper;
use crate::prelude::{ProcessingStage, StageOutput, StageResult};
use crate::record::{Column, Frame};
use crate::telemetry::log::LogManager;

/// Fills gaps in every numeric column.
///
/// Interior gaps are linearly interpolated by row position, trailing gaps hold
/// the last observation, and whatever is still missing takes the column mean.
/// A column with no observation at all is dropped.
#[derive(Debug, Clone, Copy)]
pub struct GapFillStage {
    logger: LogManager,
}

impl GapFillStage {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("wildcore::gap_fill"),
        }
    }
}

impl Default for GapFillStage {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `None` when the column has nothing to interpolate from.
pub fn fill_gaps(values: &[Option<f64>]) -> Option<Vec<f64>> {
    let mut filled: Vec<Option<f64>> = values
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();

    let mut last: Option<(usize, f64)> = None;
    for i in 0..filled.len() {
        let Some(current) = filled[i] else {
            continue;
        };
        if let Some((j, previous)) = last {
            let span = (i - j) as f64;
            for (k, slot) in filled.iter_mut().enumerate().take(i).skip(j + 1) {
                *slot = Some(previous + (current - previous) * (k - j) as f64 / span);
            }
        }
        last = Some((i, current));
    }

    let (tail_start, tail_value) = last?;
    for slot in filled.iter_mut().skip(tail_start + 1) {
        *slot = Some(tail_value);
    }

    let mean = StatsHelper::mean_present(&filled)?;
    Some(filled.into_iter().map(|v| v.unwrap_or(mean)).collect())
}

impl ProcessingStage for GapFillStage {
    fn name(&self) -> &'static str {
        "gap-fill"
    }

    fn execute(&self, input: &Frame) -> StageResult<StageOutput> {
        let mut frame = input.clone();
        let mut filled_cells = 0usize;
        let mut dropped = Vec::new();

        for name in input.numeric_names() {
            let Some(values) = input.numeric(&name) else {
                continue;
            };
            let gaps = values.iter().filter(|v| v.map_or(true, f64::is_nan)).count();
            if gaps == 0 {
                continue;
            }
            match fill_gaps(values) {
                Some(dense) => {
                    filled_cells += gaps;
                    frame.set_column(Column::dense(name.as_str(), dense))?;
                }
                None => {
                    self.logger
                        .warn(&format!("column `{}` has no observations, dropping it", name));
                    frame = frame.without(&name);
                    dropped.push(name);
                }
            }
        }

        let mut output = StageOutput::new(frame).with_note(format!("filled {} cells", filled_cells));
        if !dropped.is_empty() {
            output = output.with_note(format!("dropped empty columns {:?}", dropped));
        }
        Ok(output)
    }
}
