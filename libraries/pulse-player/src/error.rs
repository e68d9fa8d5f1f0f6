//! Error types for the player runtime.

use pulse_client::ClientError;
use pulse_playback::PlaybackError;
use thiserror::Error;

/// Errors surfaced by the player runtime.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Playback configuration rejected at spawn
    #[error("Invalid playback configuration: {0}")]
    Config(#[from] PlaybackError),

    /// Play record could not be delivered
    #[error("Play record failed: {0}")]
    Record(#[from] ClientError),

    /// Player task is no longer running
    #[error("Player has stopped")]
    Closed,

    /// Player task panicked or was aborted
    #[error("Player task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
