pub mod features;
pub mod interpolate;
pub mod normalize;
pub mod pipeline;
pub mod smoothing;

pub use features::FeatureStage;
pub use interpolate::GapFillStage;
pub use normalize::NormalizeStage;
pub use pipeline::{preprocess, SignalProcessor};
pub use smoothing::MovingAverageStage;
