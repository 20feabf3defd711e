use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::classifier::Orientation;
use crate::error::Error;
use crate::geometry::LineSegment;
use crate::trajectory::DEFAULT_TRAJECTORY_LEN;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LineConfig {
    /// `[x1, y1, x2, y2]`
    pub coordinates: Vec<f32>,
    #[serde(alias = "direction")]
    pub orientation: Orientation,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            coordinates: vec![0.0, 500.0, 1280.0, 500.0],
            orientation: Orientation::Vertical,
        }
    }
}

impl LineConfig {
    pub fn new(coordinates: [f32; 4], orientation: Orientation) -> Self {
        Self {
            coordinates: coordinates.to_vec(),
            orientation,
        }
    }

    pub fn segment(&self) -> Result<LineSegment, Error> {
        LineSegment::from_coordinates(&self.coordinates)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrajectoryConfig {
    pub max_len: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_TRAJECTORY_LEN,
        }
    }
}

/// Counting configuration. Sections not listed here (model, video, ...) are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub line: LineConfig,
    pub trajectory: TrajectoryConfig,
}

impl AppConfig {
    /// Loads a YAML config; a missing file falls back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(contents)?)
    }
}
