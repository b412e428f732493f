use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use std::sync::Arc;
use wildcore::classify::{classify_behaviors, BehaviorClassifier};
use wildcore::record::{Frame, LabeledRow};
use wildcore::simulation::{Clock, SimulatedClock, SystemClock, TelemetryGenerator};
use wildcore::telemetry::PipelineMetrics;
use wildcore::SignalProcessor;

pub struct WorkflowResult {
    pub raw: Frame,
    pub features: Frame,
    pub labels: Vec<LabeledRow>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<PipelineMetrics>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Produces one full run of samples. Real-time runs block for the whole
    /// duration; simulated runs stamp samples from the current wall-clock
    /// instant onward without waiting.
    pub fn generate(&self) -> anyhow::Result<Frame> {
        let generator = self.config.generator.clone();
        let frame = if self.config.realtime {
            TelemetryGenerator::new(generator)
                .context("configuring real-time generator")?
                .collect_frame()
        } else {
            let clock = SimulatedClock::starting_at(SystemClock.now());
            TelemetryGenerator::with_clock(generator, clock)
                .context("configuring simulated generator")?
                .collect_frame()
        };
        self.metrics.record_generated(frame.len());
        info!(
            "generated {} samples ({} {})",
            frame.len(),
            self.config.generator.species,
            self.config.generator.movement_mode
        );
        Ok(frame)
    }

    /// Runs the signal processor and the configured classifier over a batch.
    pub fn analyze(
        &self,
        raw: &Frame,
        model: Option<&dyn BehaviorClassifier>,
    ) -> anyhow::Result<(Frame, Vec<LabeledRow>)> {
        let result = self.analyze_inner(raw, model);
        if result.is_err() {
            self.metrics.record_error();
        }
        result
    }

    fn analyze_inner(
        &self,
        raw: &Frame,
        model: Option<&dyn BehaviorClassifier>,
    ) -> anyhow::Result<(Frame, Vec<LabeledRow>)> {
        let processor = SignalProcessor::new(self.config.stages.clone())
            .context("configuring signal processor")?;
        let features = processor
            .process(raw)
            .context("processing telemetry batch")?;
        self.metrics.record_processed(features.len());

        let labels = classify_behaviors(&features, self.config.classification, model)
            .with_context(|| format!("classifying with method `{}`", self.config.classification))?;
        self.metrics
            .record_labels(labels.iter().map(|row| &row.behavior));
        Ok((features, labels))
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let raw = self.generate()?;
        let (features, labels) = self.analyze(&raw, None)?;
        Ok(WorkflowResult {
            raw,
            features,
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildcore::classify::{ClassificationMethod, ClassifyError};
    use wildcore::simulation::GeneratorConfig;
    use wildcore::{BehaviorLabel, MovementMode};

    fn config(mode: MovementMode) -> WorkflowConfig {
        WorkflowConfig::from_generator(GeneratorConfig {
            movement_mode: mode,
            sampling_rate_hz: 2.0,
            duration_seconds: 4.0,
            seed: Some(3),
            ..Default::default()
        })
    }

    #[test]
    fn runner_executes_workflow() {
        let runner = Runner::new(config(MovementMode::Run));
        let result = runner.execute().unwrap();
        assert_eq!(result.raw.len(), 8);
        assert_eq!(result.features.len(), 8);
        assert_eq!(result.labels.len(), 8);
        assert!(result.features.contains("temp_trend"));

        let snap = runner.metrics().snapshot();
        assert_eq!(snap.samples_generated, 8);
        assert_eq!(snap.rows_processed, 8);
        assert_eq!(snap.labels.values().sum::<usize>(), 8);
        assert!(snap.labels[&BehaviorLabel::Running] >= 7);
    }

    #[test]
    fn model_method_without_model_is_an_error() {
        let mut cfg = config(MovementMode::Walk);
        cfg.classification = ClassificationMethod::Model;
        let runner = Runner::new(cfg);
        let raw = runner.generate().unwrap();
        let err = runner.analyze(&raw, None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ClassifyError>(),
            Some(&ClassifyError::ModelUnavailable)
        );
        assert_eq!(runner.metrics().snapshot().errors, 1);
    }

    #[test]
    fn time_range_with_no_rows_labels_nothing() {
        let runner = Runner::new(config(MovementMode::Walk));
        let raw = runner.generate().unwrap();
        let window = raw.between(Some(f64::MAX), None).unwrap();
        assert!(window.is_empty());
        let (features, labels) = runner.analyze(&window, None).unwrap();
        assert!(features.is_empty());
        assert!(labels.is_empty());
        assert_eq!(runner.metrics().snapshot().errors, 0);
    }
}
