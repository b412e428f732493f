//! Behavior classification over feature rows.
//!
//! [`classify_behaviors`] is the single entry point used by outer layers. The
//! rule-based method is built in; a trained model is accepted as any other
//! [`BehaviorClassifier`] and must honour the same row-for-row contract.

pub mod rules;

pub use rules::{RuleBasedClassifier, RuleThresholds};

use crate::record::{columns, BehaviorLabel, Frame, LabeledRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("feature column `{0}` is required")]
    MissingColumn(&'static str),
    #[error("unknown classification method `{0}`: choose `rule` or `model`")]
    UnknownMethod(String),
    #[error("model classification requested but no model is loaded")]
    ModelUnavailable,
    #[error("classifier returned {found} labels for {expected} rows")]
    LabelCountMismatch { expected: usize, found: usize },
}

/// Assigns one behavior label per feature row.
pub trait BehaviorClassifier {
    fn predict(&self, features: &Frame) -> Result<Vec<BehaviorLabel>, ClassifyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    #[default]
    Rule,
    Model,
}

impl FromStr for ClassificationMethod {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rule" => Ok(ClassificationMethod::Rule),
            "model" | "ml" => Ok(ClassificationMethod::Model),
            other => Err(ClassifyError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for ClassificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationMethod::Rule => f.write_str("rule"),
            ClassificationMethod::Model => f.write_str("model"),
        }
    }
}

/// Labels every feature row and pairs the label with the row's timestamp.
pub fn classify_behaviors(
    features: &Frame,
    method: ClassificationMethod,
    model: Option<&dyn BehaviorClassifier>,
) -> Result<Vec<LabeledRow>, ClassifyError> {
    if features.is_empty() {
        return Ok(Vec::new());
    }
    let timestamps = features
        .numeric(columns::TIMESTAMP)
        .ok_or(ClassifyError::MissingColumn(columns::TIMESTAMP))?;

    let labels = match method {
        ClassificationMethod::Rule => RuleBasedClassifier::new().predict(features)?,
        ClassificationMethod::Model => model
            .ok_or(ClassifyError::ModelUnavailable)?
            .predict(features)?,
    };
    if labels.len() != timestamps.len() {
        return Err(ClassifyError::LabelCountMismatch {
            expected: timestamps.len(),
            found: labels.len(),
        });
    }

    Ok(timestamps
        .iter()
        .zip(labels)
        .map(|(&ts, behavior)| LabeledRow::new(ts, behavior))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::preprocess;
    use crate::record::{Column, MovementMode};
    use crate::simulation::{GeneratorConfig, SimulatedClock, TelemetryGenerator};

    struct ConstantModel(BehaviorLabel);

    impl BehaviorClassifier for ConstantModel {
        fn predict(&self, features: &Frame) -> Result<Vec<BehaviorLabel>, ClassifyError> {
            Ok(vec![self.0; features.len()])
        }
    }

    struct ShortModel;

    impl BehaviorClassifier for ShortModel {
        fn predict(&self, _features: &Frame) -> Result<Vec<BehaviorLabel>, ClassifyError> {
            Ok(Vec::new())
        }
    }

    fn features() -> Frame {
        Frame::from_columns(vec![
            Column::dense("timestamp", [10.0, 11.0, 12.0]),
            Column::dense("speed", [0.1, 0.5, 1.5]),
            Column::dense("temperature", [1.0, 0.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn method_selector_parses() {
        assert_eq!(
            "rule".parse::<ClassificationMethod>(),
            Ok(ClassificationMethod::Rule)
        );
        assert_eq!(
            "ml".parse::<ClassificationMethod>(),
            Ok(ClassificationMethod::Model)
        );
        assert_eq!(
            "forest".parse::<ClassificationMethod>(),
            Err(ClassifyError::UnknownMethod("forest".into()))
        );
    }

    #[test]
    fn rule_method_pairs_timestamps_with_labels() {
        let rows = classify_behaviors(&features(), ClassificationMethod::Rule, None).unwrap();
        assert_eq!(
            rows,
            vec![
                LabeledRow::new(Some(10.0), BehaviorLabel::Resting),
                LabeledRow::new(Some(11.0), BehaviorLabel::Walking),
                LabeledRow::new(Some(12.0), BehaviorLabel::Running),
            ]
        );
    }

    #[test]
    fn model_method_requires_a_model() {
        assert_eq!(
            classify_behaviors(&features(), ClassificationMethod::Model, None),
            Err(ClassifyError::ModelUnavailable)
        );
        let model = ConstantModel(BehaviorLabel::Walking);
        let rows =
            classify_behaviors(&features(), ClassificationMethod::Model, Some(&model)).unwrap();
        assert!(rows.iter().all(|r| r.behavior == BehaviorLabel::Walking));
    }

    #[test]
    fn model_must_label_every_row() {
        assert_eq!(
            classify_behaviors(&features(), ClassificationMethod::Model, Some(&ShortModel)),
            Err(ClassifyError::LabelCountMismatch {
                expected: 3,
                found: 0
            })
        );
    }

    #[test]
    fn timestamp_column_is_required() {
        let frame = features().without("timestamp");
        assert_eq!(
            classify_behaviors(&frame, ClassificationMethod::Rule, None),
            Err(ClassifyError::MissingColumn("timestamp"))
        );
    }

    #[test]
    fn empty_batch_yields_no_labels() {
        let features = preprocess(&Frame::from_samples(&[])).unwrap();
        assert_eq!(
            classify_behaviors(&features, ClassificationMethod::Rule, None),
            Ok(Vec::new())
        );
    }

    #[test]
    fn running_animal_is_labelled_running() {
        let config = GeneratorConfig {
            movement_mode: MovementMode::Run,
            sampling_rate_hz: 1.0,
            duration_seconds: 8.0,
            seed: Some(21),
            ..Default::default()
        };
        let mut gen =
            TelemetryGenerator::with_clock(config, SimulatedClock::starting_at(0.0)).unwrap();
        let features = preprocess(&gen.collect_frame()).unwrap();
        let rows = classify_behaviors(&features, ClassificationMethod::Rule, None).unwrap();
        assert_eq!(rows.len(), 8);
        // The first row is measured against itself and has zero speed.
        assert!(rows[1..].iter().all(|r| r.behavior == BehaviorLabel::Running));
    }
}
