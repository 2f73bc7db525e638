// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Progress report rendering
//!
//! Floors without planned columns are rendered as "No planned columns",
//! never as 0%; an undefined percentage must stay distinguishable from a
//! measured zero.

use crate::error::Result;
use sitegauge_core::ProgressReport;
use std::path::Path;

/// Header of the per-image progress report.
pub const REPORT_HEADER: &str = "Floor, Constructed Percentage, Constructed Columns, Planned Columns";

/// Render a progress report in the reference text format.
pub fn render_progress_report(report: &ProgressReport) -> String {
    let mut out = String::new();
    out.push_str(REPORT_HEADER);
    out.push('\n');

    for floor in &report.floors {
        match floor.percentage {
            Some(pct) => out.push_str(&format!(
                "{}, {:.2}%, {}, {}\n",
                floor.floor, pct, floor.adjusted_built, floor.planned
            )),
            None => out.push_str(&format!("{}, No planned columns\n", floor.floor)),
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "Overall Project Progress: {:.2}%\n",
        report.overall_progress
    ));
    out
}

/// Write a progress report next to the floor tables.
pub fn write_progress_report(path: &Path, report: &ProgressReport) -> Result<()> {
    std::fs::write(path, render_progress_report(report))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegauge_core::{compare_progress, FloorPopulation};

    #[test]
    fn test_report_format() {
        let planned = FloorPopulation::from_floors([1, 1, 1, 1, 3, 3, 3, 3]);
        let built = FloorPopulation::from_floors([1, 1, 3]);

        let rendered = render_progress_report(&compare_progress(&planned, &built));

        let expected = "\
Floor, Constructed Percentage, Constructed Columns, Planned Columns
1, 100.00%, 4, 4
2, No planned columns
3, 25.00%, 1, 4

Overall Project Progress: 62.50%
";
        assert_eq!(rendered, expected);
    }
}
