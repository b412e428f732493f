//! Columnar telemetry table shared by the generator, the signal processor and
//! the classifiers.
//!
//! A [`Frame`] is an ordered list of equally long named columns. Numeric
//! columns hold `Option<f64>` so that gaps in a persisted recording survive
//! until the interpolation stage fills them. Column order is part of the
//! contract with the persistence layer and is never reshuffled: replacing a
//! column keeps its slot, new columns are appended.

use crate::record::sample::Sample;
use serde::{Deserialize, Serialize};

pub mod columns {
    pub const TIMESTAMP: &str = "timestamp";
    pub const SPECIES: &str = "species";
    pub const MOVEMENT_MODE: &str = "movement_mode";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const ACCEL_X: &str = "accel_x";
    pub const ACCEL_Y: &str = "accel_y";
    pub const ACCEL_Z: &str = "accel_z";
    pub const GYRO_X: &str = "gyro_x";
    pub const GYRO_Y: &str = "gyro_y";
    pub const GYRO_Z: &str = "gyro_z";
    pub const COMPASS: &str = "compass";
    pub const TEMPERATURE: &str = "temperature";

    pub const SPEED: &str = "speed";
    pub const HEADING: &str = "heading";
    pub const ACCEL_MAG: &str = "accel_mag";
    pub const TEMP_TREND: &str = "temp_trend";

    /// Columns that are normalized and smoothed. Geospatial columns are
    /// deliberately absent.
    pub const SENSOR: [&str; 7] = [
        ACCEL_X,
        ACCEL_Y,
        ACCEL_Z,
        GYRO_X,
        GYRO_Y,
        GYRO_Z,
        TEMPERATURE,
    ];
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("column `{column}` has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),
    #[error("missing column `{0}`")]
    MissingColumn(String),
    #[error("column `{0}` is not numeric")]
    NotNumeric(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(&self, keep: &[bool]) -> ColumnData {
        match self {
            ColumnData::Numeric(values) => ColumnData::Numeric(
                values
                    .iter()
                    .zip(keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| *v)
                    .collect(),
            ),
            ColumnData::Categorical(values) => ColumnData::Categorical(
                values
                    .iter()
                    .zip(keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| v.clone())
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Builds a numeric column with every value present.
    pub fn dense(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::numeric(name, values.into_iter().map(Some).collect())
    }

    pub fn categorical(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(values),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct FrameParts {
    columns: Vec<Column>,
}

/// Ordered, rectangular table of telemetry columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameParts", into = "FrameParts")]
pub struct Frame {
    columns: Vec<Column>,
    rows: usize,
}

impl TryFrom<FrameParts> for Frame {
    type Error = FrameError;

    fn try_from(parts: FrameParts) -> Result<Self, Self::Error> {
        Frame::from_columns(parts.columns)
    }
}

impl From<Frame> for FrameParts {
    fn from(frame: Frame) -> Self {
        FrameParts {
            columns: frame.columns,
        }
    }
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self, FrameError> {
        let mut frame = Frame::new();
        for column in columns {
            frame.push_column(column)?;
        }
        Ok(frame)
    }

    /// Lays samples out in persisted column order.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let dense = |name: &str, get: fn(&Sample) -> f64| {
            Column::dense(name, samples.iter().map(get))
        };
        let columns = vec![
            dense(columns::TIMESTAMP, |s| s.timestamp),
            Column::categorical(
                columns::SPECIES,
                samples.iter().map(|s| s.species.to_string()).collect(),
            ),
            Column::categorical(
                columns::MOVEMENT_MODE,
                samples.iter().map(|s| s.movement_mode.to_string()).collect(),
            ),
            dense(columns::LATITUDE, |s| s.latitude),
            dense(columns::LONGITUDE, |s| s.longitude),
            dense(columns::ACCEL_X, |s| s.accel_x),
            dense(columns::ACCEL_Y, |s| s.accel_y),
            dense(columns::ACCEL_Z, |s| s.accel_z),
            dense(columns::GYRO_X, |s| s.gyro_x),
            dense(columns::GYRO_Y, |s| s.gyro_y),
            dense(columns::GYRO_Z, |s| s.gyro_z),
            dense(columns::COMPASS, |s| s.compass),
            dense(columns::TEMPERATURE, |s| s.temperature),
        ];
        Frame {
            columns,
            rows: samples.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.iter().find(|c| c.name == name).and_then(|c| match &c.data {
            ColumnData::Numeric(values) => Some(values.as_slice()),
            ColumnData::Categorical(_) => None,
        })
    }

    pub fn categorical(&self, name: &str) -> Option<&[String]> {
        self.columns.iter().find(|c| c.name == name).and_then(|c| match &c.data {
            ColumnData::Categorical(values) => Some(values.as_slice()),
            ColumnData::Numeric(_) => None,
        })
    }

    /// Names of the numeric columns, in table order.
    pub fn numeric_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| matches!(c.data, ColumnData::Numeric(_)))
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn push_column(&mut self, column: Column) -> Result<(), FrameError> {
        if self.contains(&column.name) {
            return Err(FrameError::DuplicateColumn(column.name));
        }
        self.check_length(&column)?;
        if self.columns.is_empty() {
            self.rows = column.data.len();
        }
        self.columns.push(column);
        Ok(())
    }

    /// Replaces the column in its current slot, or appends it if absent.
    pub fn set_column(&mut self, column: Column) -> Result<(), FrameError> {
        self.check_length(&column)?;
        match self.position(&column.name) {
            Some(idx) => {
                self.columns[idx] = column;
                if self.columns.len() == 1 {
                    self.rows = self.columns[0].data.len();
                }
            }
            None => {
                if self.columns.is_empty() {
                    self.rows = column.data.len();
                }
                self.columns.push(column);
            }
        }
        Ok(())
    }

    pub fn with_numeric(
        mut self,
        name: &str,
        values: Vec<Option<f64>>,
    ) -> Result<Self, FrameError> {
        self.set_column(Column::numeric(name, values))?;
        Ok(self)
    }

    pub fn without(mut self, name: &str) -> Self {
        self.columns.retain(|c| c.name != name);
        if self.columns.is_empty() {
            self.rows = 0;
        }
        self
    }

    /// Keeps rows whose timestamp lies within the inclusive bounds.
    ///
    /// Rows without a timestamp are dropped whenever a bound is given.
    pub fn between(&self, start: Option<f64>, end: Option<f64>) -> Result<Self, FrameError> {
        if start.is_none() && end.is_none() {
            return Ok(self.clone());
        }
        let timestamps = self
            .numeric(columns::TIMESTAMP)
            .ok_or_else(|| FrameError::MissingColumn(columns::TIMESTAMP.into()))?;
        let keep: Vec<bool> = timestamps
            .iter()
            .map(|ts| match ts {
                Some(t) => start.map_or(true, |s| *t >= s) && end.map_or(true, |e| *t <= e),
                None => false,
            })
            .collect();
        let rows = keep.iter().filter(|&&k| k).count();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                data: c.data.select(&keep),
            })
            .collect();
        Ok(Frame { columns, rows })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn check_length(&self, column: &Column) -> Result<(), FrameError> {
        let only_this = self.columns.len() == 1 && self.columns[0].name == column.name;
        if self.columns.is_empty() || only_this || column.data.len() == self.rows {
            Ok(())
        } else {
            Err(FrameError::LengthMismatch {
                column: column.name.clone(),
                expected: self.rows,
                found: column.data.len(),
            })
        }
    }
}
