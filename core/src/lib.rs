//! Core of the wildlife movement profiler.
//!
//! Synthesizes biologging telemetry for a simulated animal, turns the raw
//! sample stream into analysis-ready features and labels behavior from those
//! features. The pipeline runs generator → sample stream → signal processor
//! → classifier; persistence and presentation live outside this crate.

pub mod classify;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod record;
pub mod simulation;
pub mod telemetry;

pub use classify::{classify_behaviors, BehaviorClassifier, ClassificationMethod, ClassifyError};
pub use prelude::{ProcessingStage, StageConfig, StageError, StageOutput};
pub use processing::{preprocess, SignalProcessor};
pub use record::{BehaviorLabel, Frame, LabeledRow, MovementMode, Sample, Species};
pub use simulation::{GeneratorConfig, TelemetryGenerator};
