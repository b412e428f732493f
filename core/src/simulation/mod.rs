//! Stochastic motion and sensor synthesis.

pub mod clock;
pub mod config;
pub mod generator;
pub mod profile;
pub mod stream;

pub use clock::{Clock, SimulatedClock, SystemClock};
pub use config::{ConfigError, GeneratorConfig};
pub use generator::{SimulationState, TelemetryGenerator};
pub use profile::MotionProfile;
pub use stream::SampleStream;
