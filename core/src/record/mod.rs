pub mod frame;
pub mod label;
pub mod sample;

pub use frame::{columns, Column, ColumnData, Frame, FrameError};
pub use label::{BehaviorLabel, LabeledRow};
pub use sample::{MovementMode, Sample, Species};
