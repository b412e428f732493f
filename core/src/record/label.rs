use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred activity state of the animal for one feature row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorLabel {
    Resting,
    Walking,
    Running,
    Unknown,
}

impl BehaviorLabel {
    pub const ALL: [BehaviorLabel; 4] = [
        BehaviorLabel::Resting,
        BehaviorLabel::Walking,
        BehaviorLabel::Running,
        BehaviorLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorLabel::Resting => "resting",
            BehaviorLabel::Walking => "walking",
            BehaviorLabel::Running => "running",
            BehaviorLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BehaviorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification output row: the timestamp of a feature row and its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub timestamp: Option<f64>,
    pub behavior: BehaviorLabel,
}

impl LabeledRow {
    pub fn new(timestamp: Option<f64>, behavior: BehaviorLabel) -> Self {
        Self {
            timestamp,
            behavior,
        }
    }
}
