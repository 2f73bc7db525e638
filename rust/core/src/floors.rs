// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor-number assignment within one bay
//!
//! Column height is a reliable local proxy for inter-floor spacing in a
//! given image. Vertical gaps between consecutive detected columns are
//! measured in multiples of the image-wide mean height, with enough
//! headroom to tell "next floor" from "a skipped floor" from "two
//! skipped floors", since occlusion and detection misses are common.

use crate::error::{Error, Result};
use crate::types::{AnalysisConfig, Column, FloorAssignment};

/// Mean column height across an image's detections.
///
/// Every column must have positive height; the mean anchors the floor-gap
/// rule, so a zero or negative height would poison every assignment.
pub fn mean_column_height(columns: &[Column]) -> Result<f64> {
    if columns.is_empty() {
        return Err(Error::DegenerateInput("no columns to average".into()));
    }

    let mut sum = 0.0;
    for col in columns {
        let height = col.height();
        if height <= 0.0 {
            return Err(Error::InvalidColumn {
                x: col.x_bottom,
                y: col.y_bottom,
                height,
            });
        }
        sum += height;
    }
    Ok(sum / columns.len() as f64)
}

/// Assign floor numbers to one bay's columns, inferring skipped floors
/// from vertical gaps.
///
/// Columns are walked from the physically lowest upward. The lowest
/// column takes the bay's calibrated starting floor (1, or 2 when
/// `scaled_distance` exceeds the threshold); each following gap advances
/// the floor by 1, by 2 when the gap clears `avg_height × tolerance`, or
/// by 3 when it clears twice that. The output keeps the highest column
/// first, mirroring the descending traversal order.
pub fn assign_floors(
    columns: &[Column],
    avg_height: f64,
    scaled_distance: f64,
    config: &AnalysisConfig,
) -> Result<Vec<FloorAssignment>> {
    if columns.is_empty() {
        return Err(Error::DegenerateInput("bay with zero columns".into()));
    }

    let mut sorted: Vec<Column> = columns.to_vec();
    sorted.sort_by(|a, b| b.y_bottom.total_cmp(&a.y_bottom));

    let mut floor: u32 = if scaled_distance <= config.distance_threshold {
        1
    } else {
        2
    };
    let gap_unit = avg_height * config.floor_gap_tolerance;

    let mut assigned = Vec::with_capacity(sorted.len());
    let mut prev_y = sorted[sorted.len() - 1].y_bottom;

    for (idx, col) in sorted.iter().rev().enumerate() {
        if idx > 0 {
            let vertical_distance = col.y_bottom - prev_y;
            floor += if vertical_distance > 2.0 * gap_unit {
                3
            } else if vertical_distance > gap_unit {
                2
            } else {
                1
            };
        }
        assigned.push(FloorAssignment {
            column: *col,
            floor,
        });
        prev_y = col.y_bottom;
    }

    assigned.reverse();
    Ok(assigned)
}
