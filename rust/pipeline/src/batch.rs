// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch orchestration over per-image detection files
//!
//! Each image runs the clustering → calibration → floor assignment
//! pipeline independently and touches no shared state, so the batch fans
//! out with rayon. A malformed image is logged and skipped; the rest of
//! the batch continues. The only aggregation point is the final
//! cross-image reduction into a [`BatchSummary`].

use crate::config::RunConfig;
use crate::dataset::{
    read_detected_columns, read_floor_table, read_planned_columns, write_floor_table,
};
use crate::error::{Error, Result};
use crate::facade::{select_facade_columns, FACADE_TOLERANCE};
use crate::report::write_progress_report;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use sitegauge_core::{analyze_columns, compare_progress, FloorPopulation, ProgressReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of one image's floor analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ImageResult {
    /// Image stem the detections came from
    pub image: String,
    /// Persisted floor table for this image
    pub floor_table: PathBuf,
    pub column_count: usize,
}

/// Cross-image aggregation of the progress comparisons.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Per-image overall progress percentage, keyed by image stem
    pub per_image: FxHashMap<String, f64>,
    /// Mean of the per-image overall percentages
    pub mean_overall: f64,
}

fn image_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("detection path has no file stem: {}", path.display()),
            ))
        })
}

/// List the detection files for a run: every `.txt` in the detections
/// directory, in name order.
pub fn detection_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Analyze one image's detections and persist its floor table.
pub fn process_image(config: &RunConfig, detections: &Path) -> Result<ImageResult> {
    let stem = image_stem(detections)?;
    let columns = read_detected_columns(detections, config.image_height)?;
    let assignments = analyze_columns(&columns, &config.analysis)?;

    let floor_table = config.output_dir.join(format!(
        "{}_{}_floor_info.txt",
        config.view_direction, stem
    ));
    write_floor_table(&floor_table, &assignments)?;

    info!(image = %stem, columns = assignments.len(), "assigned floors");
    Ok(ImageResult {
        image: stem,
        floor_table,
        column_count: assignments.len(),
    })
}

/// Run floor assignment for every image in the detections directory.
pub fn assign_floors_batch(config: &RunConfig) -> Result<Vec<ImageResult>> {
    let files = detection_files(&config.detections_dir)?;
    info!(
        count = files.len(),
        dir = %config.detections_dir.display(),
        "processing detection files"
    );

    let results: Vec<ImageResult> = files
        .par_iter()
        .filter_map(|path| match process_image(config, path) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping image");
                None
            }
        })
        .collect();

    Ok(results)
}

/// Recover per-image results from floor tables already in the output
/// directory, matching the `<view>_<image>_floor_info.txt` naming used by
/// [`process_image`]. Lets a progress-only run reuse earlier tables.
pub fn existing_results(config: &RunConfig) -> Result<Vec<ImageResult>> {
    let prefix = format!("{}_", config.view_direction);
    let suffix = "_floor_info.txt";

    let mut results = Vec::new();
    for entry in std::fs::read_dir(&config.output_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stem) = name
            .strip_prefix(&prefix)
            .and_then(|s| s.strip_suffix(suffix))
        else {
            continue;
        };

        match read_floor_table(&path) {
            Ok(assignments) => results.push(ImageResult {
                image: stem.to_string(),
                floor_table: path.clone(),
                column_count: assignments.len(),
            }),
            Err(err) => warn!(path = %path.display(), error = %err, "skipping floor table"),
        }
    }

    results.sort_by(|a, b| a.image.cmp(&b.image));
    Ok(results)
}

fn compare_one(
    config: &RunConfig,
    planned: &FloorPopulation,
    result: &ImageResult,
) -> Result<ProgressReport> {
    let assignments = read_floor_table(&result.floor_table)?;
    let built = FloorPopulation::from_floors(assignments.iter().map(|a| a.floor));
    let report = compare_progress(planned, &built);

    let out = config.output_dir.join(format!(
        "{}_{}_construction_percentage.txt",
        config.view_direction, result.image
    ));
    write_progress_report(&out, &report)?;

    info!(
        image = %result.image,
        overall = report.overall_progress,
        "progress computed"
    );
    Ok(report)
}

/// Compare every per-image floor table against the planned facade.
///
/// The planned table is reduced to the facade line visible from the
/// configured view before counting; per-image failures are isolated the
/// same way as in floor assignment.
pub fn compare_batch(config: &RunConfig, results: &[ImageResult]) -> Result<BatchSummary> {
    let planned_path = config.planned_tables.for_view(config.view_direction);
    let planned_raw = read_planned_columns(planned_path)?;
    let planned = select_facade_columns(&planned_raw, config.view_direction, FACADE_TOLERANCE);
    let planned_pop = FloorPopulation::from_floors(planned.iter().map(|c| c.floor));

    let mut per_image = FxHashMap::default();
    for result in results {
        match compare_one(config, &planned_pop, result) {
            Ok(report) => {
                per_image.insert(result.image.clone(), report.overall_progress);
            }
            Err(err) => warn!(image = %result.image, error = %err, "skipping comparison"),
        }
    }

    let mean_overall = if per_image.is_empty() {
        0.0
    } else {
        per_image.values().sum::<f64>() / per_image.len() as f64
    };

    Ok(BatchSummary {
        per_image,
        mean_overall,
    })
}

/// Full run: floor assignment for every image, then progress comparison.
pub fn run(config: &RunConfig) -> Result<BatchSummary> {
    std::fs::create_dir_all(&config.output_dir)?;
    let results = assign_floors_batch(config)?;
    compare_batch(config, &results)
}
