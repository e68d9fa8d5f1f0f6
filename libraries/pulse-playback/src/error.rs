//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Transitions on [`crate::PlaybackSession`] never fail: out-of-range input is
/// clamped and empty-queue operations are no-ops. Errors only arise when
/// validating configuration handed in from outside.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// Volume outside 0-100
    #[error("Invalid volume: {0} (expected 0-100)")]
    InvalidVolume(u8),

    /// Record threshold outside 1-100 percent
    #[error("Invalid record threshold: {0}% (expected 1-100)")]
    InvalidThreshold(u8),

    /// Device tag is empty
    #[error("Device tag cannot be empty")]
    EmptyDeviceTag,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
