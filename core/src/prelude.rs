use crate::record::{Frame, FrameError};
use serde::{Deserialize, Serialize};

/// Shared configuration for the signal-processing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Centered moving-average window for the sensor columns.
    pub smoothing_window: usize,
    /// Window of the local polynomial temperature trend.
    pub trend_window: usize,
    /// Polynomial order of the temperature trend.
    pub trend_order: usize,
    /// Floor applied to non-positive elapsed time between fixes, seconds.
    pub min_elapsed_s: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            trend_window: 5,
            trend_order: 2,
            min_elapsed_s: 1e-6,
        }
    }
}

impl StageConfig {
    pub fn validate(&self) -> StageResult<()> {
        if self.smoothing_window == 0 {
            return Err(StageError::InvalidInput(
                "smoothing window must be at least 1".into(),
            ));
        }
        if self.trend_window == 0 {
            return Err(StageError::InvalidInput(
                "trend window must be at least 1".into(),
            ));
        }
        if !(self.min_elapsed_s.is_finite() && self.min_elapsed_s > 0.0) {
            return Err(StageError::InvalidInput(
                "elapsed-time floor must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Output produced by each stage: a new frame plus notes for telemetry.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub frame: Frame,
    pub metadata: StageMetadata,
}

impl StageOutput {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            metadata: StageMetadata::default(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.metadata.notes.push(note.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// A pure transformation from one frame to the next.
///
/// Stages never mutate their input; ordering between stages is expressed by
/// the pipeline that chains them.
pub trait ProcessingStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn execute(&self, input: &Frame) -> StageResult<StageOutput>;
}
