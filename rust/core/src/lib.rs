// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor recognition and construction progress estimation from detected
//! building columns
//!
//! This crate provides the analysis pipeline that turns per-image column
//! detections into floor-level progress figures:
//! 1. Clustering column bottom points into vertical bays (1-D density
//!    clustering on the horizontal axis)
//! 2. Calibrating each bay's starting floor against the cross-bay average
//!    ground line
//! 3. Assigning floor numbers within each bay, inferring skipped floors
//!    from vertical gaps
//! 4. Comparing as-built floor populations against the plan with a
//!    bottom-up completion rule
//!
//! # Usage
//!
//! ```rust,ignore
//! use sitegauge_core::{analyze_columns, AnalysisConfig, Column};
//!
//! // Columns in a bottom-left-origin frame (see Column::from_image_frame)
//! let columns = vec![
//!     Column::new(120.0, 100.0, 120.0, 0.0),
//!     Column::new(120.0, 205.0, 120.0, 105.0),
//!     Column::new(480.0, 102.0, 480.0, 2.0),
//! ];
//!
//! let assignments = analyze_columns(&columns, &AnalysisConfig::default())?;
//! ```

pub mod calibration;
pub mod clustering;
pub mod error;
pub mod floors;
pub mod progress;
pub mod types;

// Re-export commonly used types and functions
pub use calibration::{calibrate_bays, BayCalibration};
pub use clustering::{cluster_bays, clustering_radius};
pub use error::{Error, Result};
pub use floors::{assign_floors, mean_column_height};
pub use progress::{compare_progress, FloorPopulation, FloorProgress, ProgressReport};
pub use types::{AnalysisConfig, BayId, BayMap, Column, FloorAssignment, Point2D};

/// Run the full per-image analysis: clustering, calibration, floor
/// assignment.
///
/// Returns one assignment per input column. Bays are processed in
/// ascending id order (left to right across the image), so the output is
/// deterministic for a fixed input.
pub fn analyze_columns(columns: &[Column], config: &AnalysisConfig) -> Result<Vec<FloorAssignment>> {
    let avg_height = mean_column_height(columns)?;
    let bays = cluster_bays(columns, config.eps_multiplier)?;
    let calibrations = calibrate_bays(&bays)?;

    let mut bay_ids: Vec<BayId> = bays.keys().copied().collect();
    bay_ids.sort_unstable();

    let mut assignments = Vec::with_capacity(columns.len());
    for id in bay_ids {
        let calibration = &calibrations[&id];
        assignments.extend(assign_floors(
            &bays[&id],
            avg_height,
            calibration.scaled_distance,
            config,
        )?);
    }

    Ok(assignments)
}
