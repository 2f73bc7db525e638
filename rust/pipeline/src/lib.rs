// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dataset contracts, batch orchestration and reporting around the
//! column analysis core
//!
//! This crate owns everything that touches the filesystem:
//! 1. Loading per-image detection files and the planned column tables
//! 2. Converting detector coordinates into the analysis frame
//! 3. Fanning the per-image pipeline out over a batch of images
//! 4. Persisting floor tables and progress reports
//!
//! # Usage
//!
//! ```rust,ignore
//! use sitegauge_pipeline::{batch, RunConfig};
//!
//! let config = RunConfig::from_file("run.json".as_ref())?;
//! let summary = batch::run(&config)?;
//! println!("mean overall progress: {:.2}%", summary.mean_overall);
//! ```

pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod facade;
pub mod report;

// Re-export commonly used types and functions
pub use batch::{assign_floors_batch, compare_batch, run, BatchSummary, ImageResult};
pub use config::{PlannedTables, RunConfig, ViewDirection};
pub use dataset::{
    columns_from_bboxes, read_detected_columns, read_floor_table, read_planned_columns,
    write_floor_table, PlannedColumn, FLOOR_TABLE_HEADER,
};
pub use error::{Error, Result};
pub use facade::{select_facade_columns, FACADE_TOLERANCE};
pub use report::{render_progress_report, write_progress_report, REPORT_HEADER};
