// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for column detection analysis

use nalgebra::Point2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A 2D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A detected structural column footprint.
///
/// Coordinates live in a bottom-left-origin frame, so `y_top > y_bottom`
/// for a valid column. Detector output uses a top-left origin; use
/// [`Column::from_image_frame`] to flip it on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub x_top: f64,
    pub y_top: f64,
    pub x_bottom: f64,
    pub y_bottom: f64,
}

impl Column {
    pub fn new(x_top: f64, y_top: f64, x_bottom: f64, y_bottom: f64) -> Self {
        Self {
            x_top,
            y_top,
            x_bottom,
            y_bottom,
        }
    }

    /// Convert detector endpoints (top-left origin) into the bottom-left frame.
    pub fn from_image_frame(
        x_top: f64,
        y_top: f64,
        x_bottom: f64,
        y_bottom: f64,
        image_height: f64,
    ) -> Self {
        Self {
            x_top,
            y_top: image_height - y_top,
            x_bottom,
            y_bottom: image_height - y_bottom,
        }
    }

    /// Vertical extent of the column; positive for valid detections.
    pub fn height(&self) -> f64 {
        self.y_top - self.y_bottom
    }

    pub fn top(&self) -> Point2D {
        Point2D::new(self.x_top, self.y_top)
    }

    pub fn bottom(&self) -> Point2D {
        Point2D::new(self.x_bottom, self.y_bottom)
    }
}

/// Bay identifier assigned during clustering; stable only within one run.
pub type BayId = u32;

/// Bay → columns mapping produced by clustering.
pub type BayMap = FxHashMap<BayId, Vec<Column>>;

/// A column annotated with its inferred floor number (≥ 1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloorAssignment {
    pub column: Column,
    pub floor: u32,
}

/// Tunable constants for clustering, calibration and floor assignment.
///
/// The defaults are empirically calibrated against the reference dataset.
/// They are plain configuration values, threaded explicitly through the
/// analysis; override them from the run configuration when recalibrating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Multiplier on the mean horizontal gap when deriving the clustering radius
    pub eps_multiplier: f64,
    /// Scaled-distance cutoff between a ground-floor and a first-floor bay start
    pub distance_threshold: f64,
    /// Headroom multiplier on the mean column height in the floor-gap rule
    pub floor_gap_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            eps_multiplier: 1.2,
            distance_threshold: 0.31,
            floor_gap_tolerance: 1.93,
        }
    }
}
