// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run configuration loaded from a JSON file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sitegauge_core::AnalysisConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Building facade the photographs were taken from; selects the planned
/// dataset to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewDirection {
    East,
    West,
    North,
    South,
}

impl ViewDirection {
    pub const ALL: [ViewDirection; 4] = [
        ViewDirection::East,
        ViewDirection::West,
        ViewDirection::North,
        ViewDirection::South,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewDirection::East => "east",
            ViewDirection::West => "west",
            ViewDirection::North => "north",
            ViewDirection::South => "south",
        }
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "east" => Ok(ViewDirection::East),
            "west" => Ok(ViewDirection::West),
            "north" => Ok(ViewDirection::North),
            "south" => Ok(ViewDirection::South),
            other => Err(Error::UnknownView(other.to_string())),
        }
    }
}

/// Paths to the per-facade planned column tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedTables {
    pub east: PathBuf,
    pub west: PathBuf,
    pub north: PathBuf,
    pub south: PathBuf,
}

impl PlannedTables {
    pub fn for_view(&self, view: ViewDirection) -> &Path {
        match view {
            ViewDirection::East => &self.east,
            ViewDirection::West => &self.west,
            ViewDirection::North => &self.north,
            ViewDirection::South => &self.south,
        }
    }
}

/// Full configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Facade the photographs were taken from
    pub view_direction: ViewDirection,
    /// Planned column tables per facade
    pub planned_tables: PlannedTables,
    /// Directory holding per-image detection files (`<image>.txt`)
    pub detections_dir: PathBuf,
    /// Directory receiving floor tables and progress reports
    pub output_dir: PathBuf,
    /// Height in pixels of the detector's image frame, used for the
    /// top-left → bottom-left conversion
    pub image_height: f64,
    /// Analysis constants; the defaults are the calibrated values
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl RunConfig {
    /// Load a run configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_view_direction_parsing() {
        assert_eq!(" East ".parse::<ViewDirection>().unwrap(), ViewDirection::East);
        assert_eq!("south".parse::<ViewDirection>().unwrap(), ViewDirection::South);
        assert!(matches!(
            "up".parse::<ViewDirection>(),
            Err(Error::UnknownView(_))
        ));
    }

    #[test]
    fn test_view_direction_serde_is_lowercase() {
        for view in ViewDirection::ALL {
            let json = serde_json::to_string(&view).unwrap();
            assert_eq!(json, format!("\"{}\"", view.as_str()));
            let back: ViewDirection = serde_json::from_str(&json).unwrap();
            assert_eq!(back, view);
        }
    }

    #[test]
    fn test_config_defaults_analysis_constants() {
        let json = r#"{
            "view_direction": "east",
            "planned_tables": {
                "east": "planned/east.txt",
                "west": "planned/west.txt",
                "north": "planned/north.txt",
                "south": "planned/south.txt"
            },
            "detections_dir": "detections",
            "output_dir": "out",
            "image_height": 1080.0
        }"#;

        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.view_direction, ViewDirection::East);
        assert_relative_eq!(config.analysis.distance_threshold, 0.31);
        assert_relative_eq!(config.analysis.floor_gap_tolerance, 1.93);
        assert_relative_eq!(config.analysis.eps_multiplier, 1.2);
        assert_eq!(
            config.planned_tables.for_view(ViewDirection::West),
            Path::new("planned/west.txt")
        );
    }

    #[test]
    fn test_analysis_constants_can_be_overridden() {
        let json = r#"{
            "view_direction": "north",
            "planned_tables": {
                "east": "e.txt", "west": "w.txt", "north": "n.txt", "south": "s.txt"
            },
            "detections_dir": "d",
            "output_dir": "o",
            "image_height": 720.0,
            "analysis": {
                "eps_multiplier": 1.5,
                "distance_threshold": 0.4,
                "floor_gap_tolerance": 1.8
            }
        }"#;

        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_relative_eq!(config.analysis.floor_gap_tolerance, 1.8);
    }
}
