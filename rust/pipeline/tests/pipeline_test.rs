// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end batch run over the fixture dataset.
//!
//! The fixture image holds three bays (x ≈ 100, 400, 700) in a
//! 1000-pixel-high frame: one complete stack on floors 1-3, one with a
//! skipped floor (1 and 3), and one with an occluded ground floor
//! (2 and 3). The planned east facade has 3 columns on each of floors
//! 1-4, plus two interior columns the facade selection must drop.

use approx::assert_relative_eq;
use sitegauge_pipeline::{batch, PlannedTables, RunConfig, ViewDirection};
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn test_config(output_tag: &str) -> RunConfig {
    let data = fixture_dir();
    let planned = data.join("planned_east.txt");
    let output_dir = std::env::temp_dir().join(format!(
        "sitegauge_{}_{}",
        output_tag,
        std::process::id()
    ));

    RunConfig {
        view_direction: ViewDirection::East,
        planned_tables: PlannedTables {
            east: planned.clone(),
            west: planned.clone(),
            north: planned.clone(),
            south: planned,
        },
        detections_dir: data.join("detections"),
        output_dir,
        image_height: 1000.0,
        analysis: Default::default(),
    }
}

#[test]
fn test_full_batch_run() {
    let config = test_config("run");
    let summary = batch::run(&config).expect("batch run failed");

    // The malformed detection file is skipped, not fatal
    assert_eq!(summary.per_image.len(), 1);

    // Floors 1-3 complete after sequence adjustment, floor 4 not started
    let overall = summary.per_image["img_001"];
    assert_relative_eq!(overall, 75.0, epsilon = 1e-9);
    assert_relative_eq!(summary.mean_overall, 75.0, epsilon = 1e-9);

    let floor_table = config.output_dir.join("east_img_001_floor_info.txt");
    let assignments = sitegauge_pipeline::read_floor_table(&floor_table).unwrap();
    assert_eq!(assignments.len(), 7);

    let mut floors: Vec<u32> = assignments.iter().map(|a| a.floor).collect();
    floors.sort_unstable();
    assert_eq!(floors, vec![1, 1, 2, 2, 3, 3, 3]);

    let report_path = config
        .output_dir
        .join("east_img_001_construction_percentage.txt");
    let report = std::fs::read_to_string(report_path).unwrap();
    assert!(report.contains("1, 100.00%, 3, 3"));
    assert!(report.contains("2, 100.00%, 3, 3"));
    assert!(report.contains("3, 100.00%, 3, 3"));
    assert!(report.contains("4, 0.00%, 0, 3"));
    assert!(report.contains("Overall Project Progress: 75.00%"));

    std::fs::remove_dir_all(&config.output_dir).ok();
}

#[test]
fn test_progress_only_reuses_floor_tables() {
    let config = test_config("reuse");
    std::fs::create_dir_all(&config.output_dir).unwrap();

    let results = batch::assign_floors_batch(&config).unwrap();
    assert_eq!(results.len(), 1);

    let recovered = batch::existing_results(&config).unwrap();
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].image, "img_001");
    assert_eq!(recovered[0].column_count, 7);

    let summary = batch::compare_batch(&config, &recovered).unwrap();
    assert_relative_eq!(summary.per_image["img_001"], 75.0, epsilon = 1e-9);

    std::fs::remove_dir_all(&config.output_dir).ok();
}

#[test]
fn test_malformed_image_is_isolated() {
    let config = test_config("isolate");
    std::fs::create_dir_all(&config.output_dir).unwrap();

    let bad = config.detections_dir.join("img_bad.txt");
    assert!(batch::process_image(&config, &bad).is_err());

    // The batch as a whole still succeeds on the good image
    let results = batch::assign_floors_batch(&config).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].image, "img_001");

    std::fs::remove_dir_all(&config.output_dir).ok();
}
