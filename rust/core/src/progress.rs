// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! As-planned vs. as-built progress comparison
//!
//! Raw per-floor percentages understate progress when an upper floor is
//! structurally complete but a lower floor's columns were occluded in the
//! photograph. Construction is bottom-up, so a built column on floor n
//! implies every planned floor below n is complete; the sequence
//! adjustment encodes that rule before percentages are computed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Column counts per floor; index = floor number, zero-padded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FloorPopulation {
    counts: Vec<u32>,
}

impl FloorPopulation {
    /// Histogram a stream of floor numbers.
    pub fn from_floors<I: IntoIterator<Item = u32>>(floors: I) -> Self {
        let mut counts = Vec::new();
        for floor in floors {
            let idx = floor as usize;
            if idx >= counts.len() {
                counts.resize(idx + 1, 0);
            }
            counts[idx] += 1;
        }
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, floor: u32) -> u32 {
        self.counts.get(floor as usize).copied().unwrap_or(0)
    }

    fn padded(&self, len: usize) -> Vec<u32> {
        let mut counts = self.counts.clone();
        if counts.len() < len {
            counts.resize(len, 0);
        }
        counts
    }
}

/// Progress on one floor after sequence adjustment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloorProgress {
    pub floor: u32,
    pub planned: u32,
    pub built: u32,
    pub adjusted_built: u32,
    /// Constructed share of the planned columns, in percent. `None` when
    /// the plan has no columns on this floor (undefined, not zero).
    pub percentage: Option<f64>,
}

/// Full comparison between an as-planned and an as-built population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressReport {
    pub floors: Vec<FloorProgress>,
    /// Mean of the defined per-floor percentages, over floors with
    /// planned columns; 0 when the plan is empty.
    pub overall_progress: f64,
}

impl ProgressReport {
    /// Percentage for one floor, failing where the plan is silent.
    pub fn percentage_for(&self, floor: u32) -> Result<f64> {
        self.floors
            .iter()
            .find(|f| f.floor == floor)
            .and_then(|f| f.percentage)
            .ok_or(Error::MissingPlannedFloor(floor))
    }
}

/// Compare an as-built population against the plan.
///
/// Scanning floors from the top down, any floor with built columns forces
/// every strictly-lower floor that has planned columns to its full
/// planned count. Floors absent from the plan are skipped by the
/// adjustment and reported with an undefined percentage.
pub fn compare_progress(planned: &FloorPopulation, built: &FloorPopulation) -> ProgressReport {
    let max_floor = planned.len().max(built.len());
    let planned_counts = planned.padded(max_floor);
    let built_counts = built.padded(max_floor);

    let mut adjusted = built_counts.clone();
    for floor in (1..max_floor).rev() {
        if adjusted[floor] > 0 {
            for lower in 1..floor {
                if planned_counts[lower] > 0 {
                    adjusted[lower] = planned_counts[lower];
                }
            }
        }
    }

    let mut floors = Vec::with_capacity(max_floor.saturating_sub(1));
    let mut progress_sum = 0.0;
    let mut planned_floor_count = 0u32;

    for floor in 1..max_floor {
        let percentage = if planned_counts[floor] > 0 {
            let pct = adjusted[floor] as f64 / planned_counts[floor] as f64 * 100.0;
            progress_sum += pct / 100.0;
            planned_floor_count += 1;
            Some(pct)
        } else {
            None
        };

        floors.push(FloorProgress {
            floor: floor as u32,
            planned: planned_counts[floor],
            built: built_counts[floor],
            adjusted_built: adjusted[floor],
            percentage,
        });
    }

    let overall_progress = if planned_floor_count > 0 {
        progress_sum / planned_floor_count as f64 * 100.0
    } else {
        0.0
    };

    ProgressReport {
        floors,
        overall_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_topmost_built_floor_completes_the_lower_ones() {
        let planned = FloorPopulation::from_floors([1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
        let built = FloorPopulation::from_floors([3, 3, 3, 3]);

        let report = compare_progress(&planned, &built);

        for floor in &report.floors {
            assert_eq!(floor.adjusted_built, 4);
            assert_relative_eq!(floor.percentage.unwrap(), 100.0);
        }
        assert_relative_eq!(report.overall_progress, 100.0);
    }

    #[test]
    fn test_adjusted_counts_never_shrink() {
        let planned = FloorPopulation::from_floors([1, 1, 2, 2, 3, 3, 4, 4]);
        let built = FloorPopulation::from_floors([1, 3]);

        let report = compare_progress(&planned, &built);

        for floor in &report.floors {
            assert!(floor.adjusted_built >= floor.built);
        }
        // Floor 3 is partially built, so floors 1 and 2 are complete
        assert_eq!(report.floors[0].adjusted_built, 2);
        assert_eq!(report.floors[1].adjusted_built, 2);
        assert_eq!(report.floors[2].adjusted_built, 1);
        assert_eq!(report.floors[3].adjusted_built, 0);
    }

    #[test]
    fn test_planned_gap_is_undefined_and_skipped() {
        // No planned columns on floor 2; built columns above it
        let planned = FloorPopulation::from_floors([1, 1, 1, 1, 3, 3, 3, 3]);
        let built = FloorPopulation::from_floors([2, 2, 3]);

        let report = compare_progress(&planned, &built);

        assert_relative_eq!(report.percentage_for(1).unwrap(), 100.0);
        assert!(matches!(
            report.percentage_for(2),
            Err(Error::MissingPlannedFloor(2))
        ));
        assert_relative_eq!(report.percentage_for(3).unwrap(), 25.0);
        // Overall averages only the two planned floors
        assert_relative_eq!(report.overall_progress, 62.5);
    }

    #[test]
    fn test_no_built_columns() {
        let planned = FloorPopulation::from_floors([1, 1, 2]);
        let built = FloorPopulation::default();

        let report = compare_progress(&planned, &built);

        assert_relative_eq!(report.overall_progress, 0.0);
        assert_relative_eq!(report.percentage_for(1).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_plan_has_zero_progress() {
        let planned = FloorPopulation::default();
        let built = FloorPopulation::from_floors([1, 2]);

        let report = compare_progress(&planned, &built);

        assert_relative_eq!(report.overall_progress, 0.0);
        assert!(report.floors.iter().all(|f| f.percentage.is_none()));
    }

    #[test]
    fn test_comparison_is_idempotent() {
        let planned = FloorPopulation::from_floors([1, 1, 2, 2, 3, 3]);
        let built = FloorPopulation::from_floors([1, 2, 3]);

        let first = compare_progress(&planned, &built);
        let second = compare_progress(&planned, &built);
        assert_eq!(first, second);
    }

    #[test]
    fn test_population_counts() {
        let population = FloorPopulation::from_floors([1, 1, 3]);
        assert_eq!(population.count(0), 0);
        assert_eq!(population.count(1), 2);
        assert_eq!(population.count(2), 0);
        assert_eq!(population.count(3), 1);
        assert_eq!(population.count(9), 0);
        assert_eq!(population.len(), 4);
    }
}
