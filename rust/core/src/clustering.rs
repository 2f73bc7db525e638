// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bay clustering over column bottom points
//!
//! Buildings space their column bays regularly along the horizontal axis,
//! and floor-to-floor sway is small relative to the bay spacing, so
//! clustering only the `x_bottom` coordinate is enough to recover the bays.

use crate::error::{Error, Result};
use crate::types::{BayMap, Column};
use rustc_hash::FxHashMap;

/// Derive the clustering radius from the horizontal spread of the columns.
///
/// The radius is the mean gap between the distinct sorted `x_bottom`
/// values, widened by `eps_multiplier`. Fails when fewer than two distinct
/// values exist, since no gap statistic can be formed.
pub fn clustering_radius(columns: &[Column], eps_multiplier: f64) -> Result<f64> {
    let mut xs: Vec<f64> = columns.iter().map(|c| c.x_bottom).collect();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.dedup();

    if xs.len() < 2 {
        return Err(Error::DegenerateInput(format!(
            "need at least 2 distinct x positions for clustering, got {}",
            xs.len()
        )));
    }

    let gap_sum: f64 = xs.windows(2).map(|w| w[1] - w[0]).sum();
    let avg_gap = gap_sum / (xs.len() - 1) as f64;
    Ok(avg_gap * eps_multiplier)
}

/// Partition columns into bays by 1-D density clustering on `x_bottom`.
///
/// Equivalent to DBSCAN with `min_samples = 1` on the x axis: sorted
/// neighbors closer than the radius share a bay, and with a minimum bay
/// size of one no column is ever discarded as noise. Bay ids are
/// run-local integers, assigned left to right.
pub fn cluster_bays(columns: &[Column], eps_multiplier: f64) -> Result<BayMap> {
    let eps = clustering_radius(columns, eps_multiplier)?;

    let mut order: Vec<usize> = (0..columns.len()).collect();
    order.sort_by(|&a, &b| columns[a].x_bottom.total_cmp(&columns[b].x_bottom));

    let mut bays: BayMap = FxHashMap::default();
    let mut bay_id = 0;
    let mut prev_x = columns[order[0]].x_bottom;

    for &idx in &order {
        let x = columns[idx].x_bottom;
        if x - prev_x > eps {
            bay_id += 1;
        }
        bays.entry(bay_id).or_default().push(columns[idx]);
        prev_x = x;
    }

    Ok(bays)
}
