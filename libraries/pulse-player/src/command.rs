//! Commands dispatched into the player task.

use pulse_playback::{PlaybackSession, Track};

/// A user-triggered transition, sent to the player over its command channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Play `track`; a non-empty `source` replaces the queue
    Play { track: Track, source: Vec<Track> },
    Next,
    Previous,
    TogglePlay,
    Pause,
    Resume,
    /// Play the queue entry at this position
    JumpTo(usize),
    ToggleShuffle,
    ToggleRepeat,
    /// Seek to this many seconds into the current track
    Seek(u32),
    SetVolume(u8),
    ToggleMute,
    /// Drop the queue and stop
    Clear,
    /// Stop the player task
    Shutdown,
}

impl PlayerCommand {
    /// Apply the command to the session
    ///
    /// `Shutdown` is handled by the task loop and is a no-op here.
    pub fn apply(self, session: &mut PlaybackSession) {
        match self {
            PlayerCommand::Play { track, source } => session.play(track, source),
            PlayerCommand::Next => session.advance(),
            PlayerCommand::Previous => session.retreat(),
            PlayerCommand::TogglePlay => session.toggle_play(),
            PlayerCommand::Pause => session.pause(),
            PlayerCommand::Resume => session.resume(),
            PlayerCommand::JumpTo(index) => session.jump_to(index),
            PlayerCommand::ToggleShuffle => session.toggle_shuffle(),
            PlayerCommand::ToggleRepeat => session.toggle_repeat(),
            PlayerCommand::Seek(secs) => session.seek(secs),
            PlayerCommand::SetVolume(level) => session.set_volume(level),
            PlayerCommand::ToggleMute => session.toggle_mute(),
            PlayerCommand::Clear => session.clear(),
            PlayerCommand::Shutdown => {}
        }
    }
}
