use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wildcore::classify::ClassificationMethod;
use wildcore::prelude::StageConfig;
use wildcore::simulation::GeneratorConfig;

/// Everything one end-to-end run needs: what to simulate, how to process it
/// and how to label it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub generator: GeneratorConfig,
    pub stages: StageConfig,
    pub classification: ClassificationMethod,
    /// Pace generation with the wall clock instead of a simulated clock.
    pub realtime: bool,
    pub output: Option<PathBuf>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: WorkflowConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_generator(generator: GeneratorConfig) -> Self {
        Self {
            generator,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.generator
            .validate()
            .context("invalid generator configuration")?;
        self.stages
            .validate()
            .context("invalid stage configuration")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wildcore::{MovementMode, Species};

    #[test]
    fn config_from_generator_uses_default_stages() {
        let cfg = WorkflowConfig::from_generator(GeneratorConfig::default());
        assert_eq!(cfg.stages.smoothing_window, 5);
        assert_eq!(cfg.classification, ClassificationMethod::Rule);
        assert!(!cfg.realtime);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"generator:\n  species: wolf\n  movement_mode: run\n  sampling_rate_hz: 2\n  duration_seconds: 3\nclassification: rule\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.generator.species, Species::Wolf);
        assert_eq!(cfg.generator.movement_mode, MovementMode::Run);
        assert_eq!(cfg.generator.sample_count(), 6);
        assert_eq!(cfg.generator.start_latitude, 45.0);
    }

    #[test]
    fn bundled_workflow_parses() {
        let cfg = WorkflowConfig::parse(include_str!("../../workflows/eagle_flight.yaml")).unwrap();
        assert_eq!(cfg.generator.species, Species::Eagle);
        assert_eq!(cfg.generator.seed, Some(7));
    }

    #[test]
    fn invalid_rate_fails_to_load() {
        let err = WorkflowConfig::parse("generator:\n  sampling_rate_hz: 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("sampling rate"));
    }
}
