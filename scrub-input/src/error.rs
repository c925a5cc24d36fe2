//! Input configuration errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("cell size must be positive, got {width}x{height} px")]
    InvalidCellSize { width: f64, height: f64 },
    #[error("jump step must be positive, got {0}")]
    InvalidJumpStep(i64),
}
