use crate::prelude::{ProcessingStage, StageConfig, StageResult};
use crate::processing::features::FeatureStage;
use crate::processing::interpolate::GapFillStage;
use crate::processing::normalize::NormalizeStage;
use crate::processing::smoothing::MovingAverageStage;
use crate::record::Frame;
use crate::telemetry::log::LogManager;

/// Runs gap filling, normalization, smoothing and feature extraction, in
/// that order, over a timestamp-ordered batch.
///
/// Each stage receives the previous stage's output; the caller's frame is
/// never modified. The processor holds no per-batch state, so a shared
/// instance can serve independent batches concurrently.
pub struct SignalProcessor {
    stages: Vec<Box<dyn ProcessingStage>>,
    logger: LogManager,
}

impl SignalProcessor {
    pub fn new(config: StageConfig) -> StageResult<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &StageConfig) -> Self {
        let stages: Vec<Box<dyn ProcessingStage>> = vec![
            Box::new(GapFillStage::new()),
            Box::new(NormalizeStage::new()),
            Box::new(MovingAverageStage::new(config.smoothing_window)),
            Box::new(FeatureStage::new(config)),
        ];
        Self {
            stages,
            logger: LogManager::new("wildcore::processing"),
        }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Transforms samples into feature rows: same row count and order, with
    /// derived columns appended. An empty batch is returned untouched.
    pub fn process(&self, input: &Frame) -> StageResult<Frame> {
        if input.is_empty() {
            self.logger.detail("empty batch, nothing to process");
            return Ok(input.clone());
        }

        let mut current: Option<Frame> = None;
        for stage in &self.stages {
            let output = stage.execute(current.as_ref().unwrap_or(input))?;
            for note in &output.metadata.notes {
                self.logger.detail(&format!("{}: {}", stage.name(), note));
            }
            current = Some(output.frame);
        }

        let frame = current.unwrap_or_else(|| input.clone());
        self.logger
            .record(&format!("processed {} rows through {} stages", frame.len(), self.stages.len()));
        Ok(frame)
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::build(&StageConfig::default())
    }
}

/// Full preprocessing with the default stage configuration.
pub fn preprocess(input: &Frame) -> StageResult<Frame> {
    SignalProcessor::default().process(input)
}
