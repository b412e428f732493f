use serde::{Deserialize, Serialize};
use std::fmt;

/// Species label selecting the body-temperature baseline.
///
/// The set is open: any label outside the known species is carried through
/// verbatim as `Other` and resolves to the default baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Species {
    #[default]
    Deer,
    Wolf,
    Eagle,
    Other(String),
}

impl Species {
    pub fn as_str(&self) -> &str {
        match self {
            Species::Deer => "deer",
            Species::Wolf => "wolf",
            Species::Eagle => "eagle",
            Species::Other(label) => label,
        }
    }
}

impl From<&str> for Species {
    fn from(label: &str) -> Self {
        match label {
            "deer" => Species::Deer,
            "wolf" => Species::Wolf,
            "eagle" => Species::Eagle,
            other => Species::Other(other.to_string()),
        }
    }
}

impl From<String> for Species {
    fn from(label: String) -> Self {
        Species::from(label.as_str())
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.as_str().to_string()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinematic intensity of the simulated animal.
///
/// Unrecognized modes are kept as `Other` and use the walking parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovementMode {
    Rest,
    #[default]
    Walk,
    Run,
    Fly,
    Other(String),
}

impl MovementMode {
    pub fn as_str(&self) -> &str {
        match self {
            MovementMode::Rest => "rest",
            MovementMode::Walk => "walk",
            MovementMode::Run => "run",
            MovementMode::Fly => "fly",
            MovementMode::Other(label) => label,
        }
    }
}

impl From<&str> for MovementMode {
    fn from(label: &str) -> Self {
        match label {
            "rest" => MovementMode::Rest,
            "walk" => MovementMode::Walk,
            "run" => MovementMode::Run,
            "fly" => MovementMode::Fly,
            other => MovementMode::Other(other.to_string()),
        }
    }
}

impl From<String> for MovementMode {
    fn from(label: String) -> Self {
        MovementMode::from(label.as_str())
    }
}

impl From<MovementMode> for String {
    fn from(mode: MovementMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for MovementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One multi-sensor reading emitted by the generator.
///
/// Field order is the persisted column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: f64,
    pub species: Species,
    pub movement_mode: MovementMode,
    pub latitude: f64,
    pub longitude: f64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub compass: f64,
    pub temperature: f64,
}

impl Sample {
    pub fn accel(&self) -> [f64; 3] {
        [self.accel_x, self.accel_y, self.accel_z]
    }

    pub fn gyro(&self) -> [f64; 3] {
        [self.gyro_x, self.gyro_y, self.gyro_z]
    }
}
