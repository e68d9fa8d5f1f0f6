//! Volume control
//!
//! Volume range is 0-100. Mute is a separate flag so the level survives
//! a mute/unmute round trip.

use serde::{Deserialize, Serialize};

/// Coarse loudness bucket for player indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeTier {
    /// Muted or level 0
    Silent,

    /// Level 1-49
    Low,

    /// Level 50-100
    High,
}

/// Volume controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (clamped to 0-100)
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    ///
    /// Any audible level clears mute; setting 0 leaves the mute flag alone.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
        if self.level > 0 {
            self.muted = false;
        }
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level actually heard: 0 while muted
    pub fn effective_level(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }

    /// Indicator bucket for the current level
    pub fn tier(&self) -> VolumeTier {
        match self.effective_level() {
            0 => VolumeTier::Silent,
            1..=49 => VolumeTier::Low,
            _ => VolumeTier::High,
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}
