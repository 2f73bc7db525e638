// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-bay calibration of starting floors
//!
//! A bay whose lowest detected column sits well above the building's
//! average ground line most likely has its ground-floor column occluded
//! or undetected. The offset is normalized by the bay's own column height
//! so the decision is scale-invariant across image resolutions.

use crate::error::{Error, Result};
use crate::types::{BayId, BayMap, Column};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Vertical placement of one bay relative to the building's ground line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BayCalibration {
    /// The bay's ground-most point
    pub lowest_y: f64,
    /// Offset from the cross-bay average ground line, in units of the
    /// lowest column's own height
    pub scaled_distance: f64,
}

impl BayCalibration {
    /// Floor number the bay's lowest visible column should receive.
    pub fn starting_floor(&self, distance_threshold: f64) -> u32 {
        if self.scaled_distance <= distance_threshold {
            1
        } else {
            2
        }
    }
}

/// First column with the minimum `y_bottom`; ties keep input order.
fn lowest_column(columns: &[Column]) -> Result<&Column> {
    let mut best = columns
        .first()
        .ok_or_else(|| Error::DegenerateInput("bay with zero columns".into()))?;
    for col in &columns[1..] {
        if col.y_bottom < best.y_bottom {
            best = col;
        }
    }
    Ok(best)
}

/// Calibrate every bay against the cross-bay average ground line.
pub fn calibrate_bays(bays: &BayMap) -> Result<FxHashMap<BayId, BayCalibration>> {
    if bays.is_empty() {
        return Err(Error::DegenerateInput("no bays to calibrate".into()));
    }

    let mut lowest_ys = Vec::with_capacity(bays.len());
    for columns in bays.values() {
        lowest_ys.push(lowest_column(columns)?.y_bottom);
    }
    let avg_lowest_y = lowest_ys.iter().sum::<f64>() / lowest_ys.len() as f64;

    let mut calibrations = FxHashMap::default();
    for (&id, columns) in bays {
        let low = lowest_column(columns)?;
        let column_height = low.height();
        if column_height <= 0.0 {
            return Err(Error::InvalidColumn {
                x: low.x_bottom,
                y: low.y_bottom,
                height: column_height,
            });
        }

        calibrations.insert(
            id,
            BayCalibration {
                lowest_y: low.y_bottom,
                scaled_distance: (low.y_bottom - avg_lowest_y) / column_height,
            },
        );
    }

    Ok(calibrations)
}
