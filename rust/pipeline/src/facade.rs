// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planned facade selection per view direction
//!
//! A camera stationed on one side of the building only sees the outermost
//! column line of that facade, so the planned dataset for a view is the
//! set of columns at the extreme coordinate in that direction.

use crate::config::ViewDirection;
use crate::dataset::PlannedColumn;

/// Tolerance on the extreme coordinate, absorbing rounding in the model
/// export (planned coordinates are exported to two decimals).
pub const FACADE_TOLERANCE: f64 = 0.01;

/// Select the outermost planned column line visible from a facade.
pub fn select_facade_columns(
    columns: &[PlannedColumn],
    view: ViewDirection,
    tolerance: f64,
) -> Vec<PlannedColumn> {
    let key = |c: &PlannedColumn| match view {
        ViewDirection::East => c.x,
        ViewDirection::West => -c.x,
        ViewDirection::North => c.y,
        ViewDirection::South => -c.y,
    };

    let mut extreme = f64::NEG_INFINITY;
    for col in columns {
        extreme = extreme.max(key(col));
    }
    if !extreme.is_finite() {
        return Vec::new();
    }

    columns
        .iter()
        .filter(|c| extreme - key(c) <= tolerance)
        .copied()
        .collect()
}
