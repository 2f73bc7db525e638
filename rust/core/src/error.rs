use thiserror::Error;

/// Result type for column analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during bay clustering and floor analysis
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid column at bottom ({x:.1}, {y:.1}): height {height:.2} is not positive")]
    InvalidColumn { x: f64, y: f64, height: f64 },

    #[error("No planned columns on floor {0}")]
    MissingPlannedFloor(u32),
}
