//! Error types for widget construction and configuration

use thiserror::Error;

/// Errors returned when a widget is configured with values it cannot honour.
///
/// Pointer input never produces these: out-of-range coordinates are clamped,
/// and input that arrives before layout is ignored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: f64, max: f64 },
    #[error("range {min}..{max} is too narrow to hold an active region")]
    RangeTooNarrow { min: i64, max: i64 },
    #[error("active region {start}..{end} has no width")]
    EmptyRegion { start: i64, end: i64 },
    #[error("active region {start}..{end} lies outside {min}..{max}")]
    RegionOutOfBounds {
        start: i64,
        end: i64,
        min: i64,
        max: i64,
    },
    #[error("scrollbar has no active region")]
    NoActiveRegion,
    #[error("step must be positive, got {0}")]
    InvalidStep(f64),
    #[error("frame rate must be positive, got {0}")]
    InvalidFrameRate(f64),
    #[error("fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),
    #[error("invalid value text: {0:?}")]
    InvalidValueText(String),
}
