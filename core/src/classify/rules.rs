use crate::classify::{BehaviorClassifier, ClassifyError};
use crate::record::{columns, BehaviorLabel, Frame};
use serde::{Deserialize, Serialize};

/// Thresholds of the rule-based classifier, applied to the speed column and
/// the normalized temperature column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// Speeds at or above this are walking.
    pub walking_speed: f64,
    /// Speeds at or above this are running.
    pub running_speed: f64,
    /// Resting also requires a normalized temperature strictly above this.
    pub resting_temperature: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            walking_speed: 0.2,
            running_speed: 1.0,
            resting_temperature: 0.5,
        }
    }
}

/// Stateless threshold classifier.
///
/// Slow rows whose temperature does not clear the resting gate fall through
/// to `Unknown`; they are not reclassified as walking.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedClassifier {
    thresholds: RuleThresholds,
}

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn label(&self, speed: Option<f64>, temperature: Option<f64>) -> BehaviorLabel {
        let t = &self.thresholds;
        let warm = temperature.map_or(false, |temp| temp > t.resting_temperature);
        match speed {
            Some(s) if s < t.walking_speed && warm => BehaviorLabel::Resting,
            Some(s) if s >= t.walking_speed && s < t.running_speed => BehaviorLabel::Walking,
            Some(s) if s >= t.running_speed => BehaviorLabel::Running,
            _ => BehaviorLabel::Unknown,
        }
    }
}

impl BehaviorClassifier for RuleBasedClassifier {
    fn predict(&self, features: &Frame) -> Result<Vec<BehaviorLabel>, ClassifyError> {
        let speed = features
            .numeric(columns::SPEED)
            .ok_or(ClassifyError::MissingColumn(columns::SPEED))?;
        let temperature = features
            .numeric(columns::TEMPERATURE)
            .ok_or(ClassifyError::MissingColumn(columns::TEMPERATURE))?;

        Ok(speed
            .iter()
            .zip(temperature)
            .map(|(&s, &t)| self.label(s, t))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Column;

    fn features(speed: &[f64], temperature: &[f64]) -> Frame {
        Frame::from_columns(vec![
            Column::dense("speed", speed.iter().copied()),
            Column::dense("temperature", temperature.iter().copied()),
        ])
        .unwrap()
    }

    #[test]
    fn labels_resting_walking_running() {
        let frame = features(&[0.1, 0.5, 1.5], &[1.0, 0.0, 0.0]);
        let labels = RuleBasedClassifier::new().predict(&frame).unwrap();
        assert_eq!(
            labels,
            vec![
                BehaviorLabel::Resting,
                BehaviorLabel::Walking,
                BehaviorLabel::Running
            ]
        );
    }

    #[test]
    fn slow_and_cool_rows_are_unknown() {
        let clf = RuleBasedClassifier::new();
        assert_eq!(clf.label(Some(0.1), Some(0.5)), BehaviorLabel::Unknown);
        assert_eq!(clf.label(Some(0.1), Some(-2.0)), BehaviorLabel::Unknown);
        assert_eq!(clf.label(Some(0.1), None), BehaviorLabel::Unknown);
    }

    #[test]
    fn boundaries_belong_to_the_faster_label() {
        let clf = RuleBasedClassifier::new();
        assert_eq!(clf.label(Some(0.2), Some(9.0)), BehaviorLabel::Walking);
        assert_eq!(clf.label(Some(1.0), Some(9.0)), BehaviorLabel::Running);
        assert_eq!(clf.label(None, Some(9.0)), BehaviorLabel::Unknown);
    }

    #[test]
    fn identical_inputs_give_identical_labels() {
        let frame = features(&[0.05, 0.3, 7.0, 0.19], &[0.7, -1.0, 0.2, 0.4]);
        let clf = RuleBasedClassifier::new();
        assert_eq!(clf.predict(&frame).unwrap(), clf.predict(&frame).unwrap());
    }

    #[test]
    fn missing_speed_column_is_reported() {
        let frame = Frame::from_columns(vec![Column::dense("temperature", [1.0])]).unwrap();
        assert!(matches!(
            RuleBasedClassifier::new().predict(&frame),
            Err(ClassifyError::MissingColumn("speed"))
        ));
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let clf = RuleBasedClassifier::with_thresholds(RuleThresholds {
            walking_speed: 1.0,
            running_speed: 3.0,
            resting_temperature: 0.0,
        });
        assert_eq!(clf.label(Some(0.5), Some(0.1)), BehaviorLabel::Resting);
        assert_eq!(clf.label(Some(2.0), None), BehaviorLabel::Walking);
    }
}
