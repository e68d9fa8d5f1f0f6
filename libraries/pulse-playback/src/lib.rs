//! Pulse Play - Playback Session
//!
//! Platform-agnostic playback state for Pulse Play.
//!
//! This crate provides:
//! - Play queue with a single current position
//! - Shuffle (uniform, following the current track)
//! - Repeat modes (Off, All, One)
//! - Simulated one-second progress ticks and seeking
//! - Volume control (0-100, mute/unmute)
//! - Exactly-once play records once 80% of a track has elapsed
//!
//! # Architecture
//!
//! `pulse-playback` performs no I/O and owns no timers:
//! - The runtime calls [`PlaybackSession::tick`] once per second while playing
//! - Side effects leave as [`PlaybackEvent`]s via [`PlaybackSession::drain_events`]
//! - Play records are delivered elsewhere; the outcome comes back through
//!   [`PlaybackSession::apply_record_outcome`]
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use pulse_playback::{PlaybackConfig, PlaybackEvent, PlaybackSession, Track};
//!
//! let mut session = PlaybackSession::new(PlaybackConfig::default());
//!
//! let album = vec![
//!     Track::new(1, "Intro", "Artist", 10),
//!     Track::new(2, "Single", "Artist", 200),
//! ];
//! session.play(album[0].clone(), album.clone());
//!
//! for _ in 0..8 {
//!     session.tick();
//! }
//!
//! let recorded = session
//!     .drain_events()
//!     .into_iter()
//!     .any(|e| matches!(e, PlaybackEvent::PlayThresholdReached { .. }));
//! assert!(recorded);
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use pulse_playback::{PlaybackSession, RepeatMode};
//!
//! let mut session = PlaybackSession::default();
//!
//! session.toggle_shuffle();
//! session.set_repeat(RepeatMode::All);
//! assert!(session.shuffle());
//! ```

mod error;
mod events;
mod queue;
mod session;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::Queue;
pub use session::PlaybackSession;
pub use shuffle::{shuffle_tracks, shuffle_tracks_with};
pub use types::{
    PlayRecord, PlaybackConfig, PlaybackSnapshot, RecordStatus, RepeatMode, Track, TrackId,
};
pub use volume::{Volume, VolumeTier};
