// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: estimate construction progress from detected column datasets
//!
//! Runs floor assignment for every detection file in the configured
//! directory, then compares the resulting floor tables against the
//! planned facade.
//!
//! Usage:
//!   progress-report <config.json> [options]

use anyhow::Context;
use sitegauge_pipeline::{batch, RunConfig};
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let config_path = PathBuf::from(&args[1]);

    let mut floors_only = false;
    let mut progress_only = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--floors-only" => {
                floors_only = true;
            }
            "--progress-only" => {
                progress_only = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    println!("=== SiteGauge Progress Report ===");
    println!();

    println!("[1/3] Loading configuration: {}", config_path.display());
    let config = RunConfig::from_file(&config_path)
        .with_context(|| format!("cannot load configuration '{}'", config_path.display()))?;
    println!("  View direction: {}", config.view_direction);
    println!("  Detections:     {}", config.detections_dir.display());
    println!("  Output:         {}", config.output_dir.display());

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("cannot create output dir '{}'", config.output_dir.display()))?;

    let results = if progress_only {
        println!("[2/3] Floor assignment: SKIPPED (--progress-only)");
        let results = batch::existing_results(&config)?;
        println!("  Reusing {} floor tables", results.len());
        results
    } else {
        println!("[2/3] Assigning floors per image...");
        let results = batch::assign_floors_batch(&config)?;
        println!("  Images processed: {}", results.len());
        for result in &results {
            println!(
                "    {:<24} {:>3} columns -> {}",
                result.image,
                result.column_count,
                result.floor_table.display()
            );
        }
        results
    };

    if results.is_empty() {
        eprintln!("Error: no usable detection data found.");
        std::process::exit(1);
    }

    if floors_only {
        println!("[3/3] Progress comparison: SKIPPED (--floors-only)");
        return Ok(());
    }

    println!("[3/3] Comparing against the planned layout...");
    let summary = batch::compare_batch(&config, &results)?;

    println!();
    println!("=== Progress Summary ===");
    let mut images: Vec<(&String, &f64)> = summary.per_image.iter().collect();
    images.sort_by(|a, b| a.0.cmp(b.0));
    for (image, pct) in images {
        println!("  {:<24} {:>7.2}%", image, pct);
    }
    println!("  Mean overall progress: {:.2}%", summary.mean_overall);

    Ok(())
}

fn print_usage() {
    println!(
        r#"SiteGauge Progress Report
=========================

Estimates construction progress by assigning floor numbers to detected
columns and comparing the result against the planned column layout.

USAGE:
  progress-report <config.json> [OPTIONS]

ARGUMENTS:
  <config.json>     Run configuration (view direction, dataset paths,
                    image height, analysis constants)

OPTIONS:
  --floors-only     Stop after writing the per-image floor tables
  --progress-only   Skip floor assignment and reuse floor tables already
                    present in the output directory
  -h, --help        Show this help message

PIPELINE:
  1. Cluster detected columns into vertical bays (x-axis density)
  2. Calibrate each bay's starting floor against the average ground line
  3. Assign floor numbers, inferring skipped floors from vertical gaps
  4. Compare per-floor counts against the plan (bottom-up completion)

Set RUST_LOG to control logging (default: info).
"#
    );
}
