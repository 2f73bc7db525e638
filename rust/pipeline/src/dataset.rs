// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text dataset contracts: detections, planned columns, floor tables
//!
//! All datasets are comma-separated text. Detected columns arrive in the
//! detector's top-left image frame and are flipped to the bottom-left
//! frame on the way in; planned columns come from the building model and
//! carry authoritative floor numbers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sitegauge_core::{Column, FloorAssignment, Point2D};
use std::path::Path;
use tracing::debug;

/// Header of the per-image floor table.
pub const FLOOR_TABLE_HEADER: &str = "Xtop, Ytop, Xbot, Ybot, Floor";

/// A planned column footprint from the building model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlannedColumn {
    pub x: f64,
    pub y: f64,
    pub z_top: f64,
    pub z_bottom: f64,
    /// Authoritative floor number from the planning source
    pub floor: u32,
}

impl PlannedColumn {
    /// Horizontal footprint in model coordinates.
    pub fn footprint(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

fn shape_error(path: &Path, line: usize, reason: String) -> Error {
    Error::DatasetShape {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

/// Split one row into `expected` finite numbers.
fn parse_fields(path: &Path, line_no: usize, line: &str, expected: usize) -> Result<Vec<f64>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != expected {
        return Err(shape_error(
            path,
            line_no,
            format!("expected {} fields, got {}", expected, fields.len()),
        ));
    }

    let mut values = Vec::with_capacity(expected);
    for field in fields {
        let value: f64 = field
            .parse()
            .map_err(|_| shape_error(path, line_no, format!("non-numeric field '{}'", field)))?;
        if !value.is_finite() {
            return Err(shape_error(
                path,
                line_no,
                format!("non-finite field '{}'", field),
            ));
        }
        values.push(value);
    }
    Ok(values)
}

fn parse_floor_number(path: &Path, line_no: usize, value: f64) -> Result<u32> {
    if value < 1.0 || value.fract() != 0.0 {
        return Err(shape_error(
            path,
            line_no,
            format!("floor number {} is not a positive integer", value),
        ));
    }
    Ok(value as u32)
}

fn parse_detected_text(path: &Path, text: &str, image_height: f64) -> Result<Vec<Column>> {
    let mut columns = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let f = parse_fields(path, idx + 1, line, 4)?;
        columns.push(Column::from_image_frame(f[0], f[1], f[2], f[3], image_height));
    }
    Ok(columns)
}

fn parse_planned_text(path: &Path, text: &str) -> Result<Vec<PlannedColumn>> {
    let mut columns = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let f = parse_fields(path, idx + 1, line, 5)?;
        columns.push(PlannedColumn {
            x: f[0],
            y: f[1],
            z_top: f[2],
            z_bottom: f[3],
            floor: parse_floor_number(path, idx + 1, f[4])?,
        });
    }
    Ok(columns)
}

fn parse_floor_table_text(path: &Path, text: &str) -> Result<Vec<FloorAssignment>> {
    let mut assignments = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        // First line is the header
        if idx == 0 || line.trim().is_empty() {
            continue;
        }
        let f = parse_fields(path, idx + 1, line, 5)?;
        assignments.push(FloorAssignment {
            column: Column::new(f[0], f[1], f[2], f[3]),
            floor: parse_floor_number(path, idx + 1, f[4])?,
        });
    }
    Ok(assignments)
}

/// Read detector endpoint rows (`x_top, y_top, x_bottom, y_bottom`,
/// top-left origin) and convert them into the bottom-left frame.
pub fn read_detected_columns(path: &Path, image_height: f64) -> Result<Vec<Column>> {
    let text = std::fs::read_to_string(path)?;
    let columns = parse_detected_text(path, &text, image_height)?;
    debug!(path = %path.display(), count = columns.len(), "loaded detected columns");
    Ok(columns)
}

/// Read a planned column table (`x, y, z_top, z_bottom, floor`).
pub fn read_planned_columns(path: &Path) -> Result<Vec<PlannedColumn>> {
    let text = std::fs::read_to_string(path)?;
    let columns = parse_planned_text(path, &text)?;
    debug!(path = %path.display(), count = columns.len(), "loaded planned columns");
    Ok(columns)
}

/// Convert normalized detector bounding boxes into columns.
///
/// Boxes are `(x_center, y_center, width, height)` in [0, 1] relative to
/// the image; the column's top and bottom endpoints are the midpoints of
/// the box's horizontal edges.
pub fn columns_from_bboxes(bboxes: &[[f64; 4]], image_width: f64, image_height: f64) -> Vec<Column> {
    bboxes
        .iter()
        .map(|&[x, y, _w, h]| {
            let cx = x * image_width;
            let y_top = (y - h / 2.0) * image_height;
            let y_bottom = (y + h / 2.0) * image_height;
            Column::from_image_frame(cx, y_top, cx, y_bottom, image_height)
        })
        .collect()
}

/// Write the per-image floor table.
pub fn write_floor_table(path: &Path, assignments: &[FloorAssignment]) -> Result<()> {
    let mut out = String::new();
    out.push_str(FLOOR_TABLE_HEADER);
    out.push('\n');
    for assignment in assignments {
        let c = &assignment.column;
        out.push_str(&format!(
            "{:.1}, {:.1}, {:.1}, {:.1}, {}\n",
            c.x_top, c.y_top, c.x_bottom, c.y_bottom, assignment.floor
        ));
    }
    std::fs::write(path, out)?;
    Ok(())
}

/// Read a floor table back; the header line is skipped.
pub fn read_floor_table(path: &Path) -> Result<Vec<FloorAssignment>> {
    let text = std::fs::read_to_string(path)?;
    parse_floor_table_text(path, &text)
}
