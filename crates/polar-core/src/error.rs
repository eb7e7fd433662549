//! Error types for the polar designer core
//!
//! Out-of-range parameter writes are clamped and never reach these types.

use thiserror::Error;

/// Errors from the recording / optimization surface
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingError {
    /// The goal needs a disturber recording that hasn't completed
    #[error("No disturber recording available")]
    DisturberNotRecorded,

    /// The goal needs a signal recording that hasn't completed
    #[error("No signal recording available")]
    SignalNotRecorded,

    /// Signal-to-disturbance optimization needs both recordings
    #[error("Need both recordings (disturber: {disturber}, signal: {signal})")]
    RecordingsIncomplete { disturber: bool, signal: bool },
}

/// Result type for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Fatal preset errors (field-level problems are warnings, not errors)
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read preset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse preset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Preset root must be an object of named fields")]
    NotAnObject,
}

/// Result type for preset operations
pub type PresetResult<T> = Result<T, PresetError>;

/// Channel layouts rejected at negotiation time
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unsupported input channel count: {0} (expected 2)")]
    UnsupportedInputs(usize),

    #[error("Unsupported output channel count: {0} (expected 1 or 2)")]
    UnsupportedOutputs(usize),
}

/// Result type for bus negotiation
pub type LayoutResult<T> = Result<T, LayoutError>;
