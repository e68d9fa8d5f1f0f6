//! Core types for playback management

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a track
///
/// Mirrors the service's integer `song_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub i64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TrackId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Track information for queue management
///
/// Fetched from the catalog service and never mutated by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Duration in whole seconds
    pub duration_secs: u32,

    /// Artist name
    pub artist: String,

    /// Album cover image reference (optional)
    pub cover_image: Option<String>,
}

impl Track {
    /// Create a track without cover art
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_secs: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration_secs,
            artist: artist.into(),
            cover_image: None,
        }
    }

    /// Attach a cover image reference
    #[must_use]
    pub fn with_cover(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `off → all → one → off` cycle
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(RepeatMode::Off),
            "all" => Ok(RepeatMode::All),
            "one" => Ok(RepeatMode::One),
            other => Err(format!("unknown repeat mode: {other}")),
        }
    }
}

/// Outbound "play recorded" payload
///
/// Built once per track instance when the listen threshold is crossed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Track that was listened to
    pub track_id: TrackId,

    /// Elapsed seconds at the moment the threshold was crossed
    pub elapsed_secs: u32,

    /// Device tag reported to the service (e.g. "web")
    pub device_tag: String,
}

/// Delivery status of the current track instance's play record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Record emitted, send outcome not known yet
    Pending,

    /// Service accepted the record
    Acknowledged,

    /// Send failed; not retried
    Failed,
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 70)
    pub volume: u8,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Percent of a track that must elapse before a play is recorded (default: 80)
    pub record_threshold_percent: u8,

    /// Device tag sent with play records (default: "web")
    pub device_tag: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 70,
            shuffle: false,
            repeat: RepeatMode::Off,
            record_threshold_percent: 80,
            device_tag: "web".to_string(),
        }
    }
}

impl PlaybackConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.volume > 100 {
            return Err(PlaybackError::InvalidVolume(self.volume));
        }
        if self.record_threshold_percent == 0 || self.record_threshold_percent > 100 {
            return Err(PlaybackError::InvalidThreshold(
                self.record_threshold_percent,
            ));
        }
        if self.device_tag.trim().is_empty() {
            return Err(PlaybackError::EmptyDeviceTag);
        }
        Ok(())
    }
}

/// Read-only view of the session handed to UI consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub current_track: Option<Track>,
    pub queue: Vec<Track>,
    pub queue_index: usize,
    pub is_playing: bool,
    pub elapsed_secs: u32,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub volume: u8,
    pub muted: bool,
    /// Record status for the current track instance, if one was emitted
    pub record_status: Option<RecordStatus>,
}

impl PlaybackSnapshot {
    /// Progress through the current track as a percentage (0-100)
    pub fn progress_percent(&self) -> f64 {
        match &self.current_track {
            Some(track) if track.duration_secs > 0 => {
                (f64::from(self.elapsed_secs) * 100.0 / f64::from(track.duration_secs)).min(100.0)
            }
            _ => 0.0,
        }
    }
}
