pub mod geo;
pub mod matrix;
pub mod poly;
pub mod stats;

pub use geo::{flat_earth_offset, haversine_m};
pub use matrix::MatrixHelper;
pub use poly::local_polynomial_smooth;
pub use stats::StatsHelper;
