//! Playback Events
//!
//! Event-based communication for UI synchronization and side effects.
//! The session queues events as transitions happen; the runtime drains them
//! after every command or tick.

use crate::types::{PlayRecord, RepeatMode, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playing flag changed
    StateChanged {
        /// New value of `is_playing`
        is_playing: bool,
    },

    /// A new track instance started
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
        /// Monotonic track instance number
        instance: u64,
    },

    /// Queue contents or order changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// New current position
        index: usize,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle flag
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Elapsed time moved (tick or seek)
    PositionUpdate {
        /// Elapsed seconds in current track
        elapsed_secs: u32,
        /// Current track duration
        duration_secs: u32,
    },

    /// Listen threshold crossed; the record must be sent exactly once
    PlayThresholdReached {
        /// Track instance the record belongs to
        instance: u64,
        /// Payload for the catalog service
        record: PlayRecord,
    },

    /// Track reached its end
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Advanced past the last track with repeat off
    QueueEnded,
}
