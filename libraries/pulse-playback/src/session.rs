//! Playback session
//!
//! Owns "what is playing": current track, queue, shuffle/repeat modes,
//! simulated elapsed time, volume, and the once-per-track play record.
//! Every operation is a synchronous state transition with no I/O; side
//! effects leave the session as [`PlaybackEvent`]s for the caller to act on.

use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::queue::Queue;
use crate::shuffle::shuffle_tracks_with;
use crate::types::{
    PlayRecord, PlaybackConfig, PlaybackSnapshot, RecordStatus, RepeatMode, Track, TrackId,
};
use crate::volume::{Volume, VolumeTier};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

/// Playback session state machine
///
/// Reachable states are combinations of `is_playing` and whether a current
/// track is present; `(absent, false)` is idle. All transitions are total.
#[derive(Debug)]
pub struct PlaybackSession {
    current_track: Option<Track>,
    queue: Queue,
    is_playing: bool,
    elapsed: u32,
    shuffle: bool,
    repeat: RepeatMode,
    volume: Volume,

    record_threshold_percent: u8,
    device_tag: String,

    /// Bumped on every track load and on clear
    instance: u64,
    /// Play record already emitted for the current instance
    recorded: bool,
    record_status: Option<RecordStatus>,

    pending_events: Vec<PlaybackEvent>,
    rng: StdRng,
}

impl PlaybackSession {
    /// Create a new idle session
    ///
    /// Out-of-range values are clamped; use [`PlaybackSession::try_new`] to
    /// reject them instead.
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new idle session after validating the configuration
    pub fn try_new(config: PlaybackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a session with a deterministic shuffle source
    pub fn with_seed(config: PlaybackConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlaybackConfig, rng: StdRng) -> Self {
        Self {
            current_track: None,
            queue: Queue::new(),
            is_playing: false,
            elapsed: 0,
            shuffle: config.shuffle,
            repeat: config.repeat,
            volume: Volume::new(config.volume),
            record_threshold_percent: config.record_threshold_percent.clamp(1, 100),
            device_tag: config.device_tag,
            instance: 0,
            recorded: false,
            record_status: None,
            pending_events: Vec::new(),
            rng,
        }
    }

    // ===== Playback Control =====

    /// Play `track`, optionally replacing the queue with `source`
    ///
    /// - `source` non-empty: it becomes the queue (shuffled first when shuffle
    ///   is on) and the index points at `track`, or 0 if it is not in the list.
    /// - `source` empty and queue empty: the queue becomes `[track]`.
    /// - `source` empty and queue non-empty: the queue is left unchanged.
    pub fn play(&mut self, track: Track, source: Vec<Track>) {
        if !source.is_empty() {
            let mut list = source;
            if self.shuffle {
                shuffle_tracks_with(&mut list, &mut self.rng);
            }
            let index = list.iter().position(|t| t.id == track.id).unwrap_or(0);
            self.queue.replace(list, index);
            self.emit_queue_changed();
        } else if self.queue.is_empty() {
            self.queue.replace(vec![track.clone()], 0);
            self.emit_queue_changed();
        }

        self.load_track(track);
        self.set_playing(true);
    }

    /// Skip to next track
    ///
    /// Past the last track: wraps under repeat `All`, otherwise stops
    /// playback and keeps the current track. No-op on an empty queue.
    pub fn advance(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        let wrap = self.repeat == RepeatMode::All;
        match self.queue.step_forward(wrap).cloned() {
            Some(track) => {
                self.load_track(track);
                self.set_playing(true);
            }
            None => {
                debug!(queue_len = self.queue.len(), "Reached end of queue");
                self.set_playing(false);
                self.pending_events.push(PlaybackEvent::QueueEnded);
            }
        }
    }

    /// Go to previous track
    ///
    /// Before the first track: wraps to the last under repeat `All`,
    /// otherwise restarts the first. No-op on an empty queue.
    pub fn retreat(&mut self) {
        let wrap = self.repeat == RepeatMode::All;
        if let Some(track) = self.queue.step_back(wrap).cloned() {
            self.load_track(track);
            self.set_playing(true);
        }
    }

    /// Play the queue entry at `index`
    ///
    /// Out-of-range positions are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if let Some(track) = self.queue.jump_to(index).cloned() {
            self.load_track(track);
            self.set_playing(true);
        }
    }

    /// Flip play/pause; does nothing without a current track
    pub fn toggle_play(&mut self) {
        if self.current_track.is_some() {
            self.set_playing(!self.is_playing);
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    /// Resume playback of the current track
    pub fn resume(&mut self) {
        if self.current_track.is_some() {
            self.set_playing(true);
        }
    }

    /// Drop the current track and queue and stop
    ///
    /// Any in-flight play record for the dropped track becomes stale.
    pub fn clear(&mut self) {
        self.current_track = None;
        self.queue.clear();
        self.elapsed = 0;
        self.instance += 1;
        self.recorded = false;
        self.record_status = None;
        self.set_playing(false);
        self.emit_queue_changed();
    }

    // ===== Progress =====

    /// Advance simulated playback by one second
    ///
    /// Ignored while not playing. At the end of the track, repeat `One`
    /// restarts it in place; otherwise the session advances.
    pub fn tick(&mut self) {
        if !self.is_playing {
            return;
        }
        let Some((track_id, duration)) = self
            .current_track
            .as_ref()
            .map(|t| (t.id, t.duration_secs))
        else {
            return;
        };

        self.elapsed = self.elapsed.saturating_add(1);
        trace!(elapsed = self.elapsed, duration, "Tick");
        self.emit_position_update();
        self.record_threshold_crossing();

        if self.elapsed < duration {
            return;
        }

        self.pending_events
            .push(PlaybackEvent::TrackFinished { track_id });

        if self.repeat == RepeatMode::One {
            self.elapsed = 0;
            self.emit_position_update();
            return;
        }

        if self.queue.is_empty() {
            self.set_playing(false);
        } else {
            self.advance();
        }

        if !self.is_playing {
            // Stopped at the end of the queue: rewind the finished track
            self.elapsed = 0;
            self.emit_position_update();
        }
    }

    /// Seek within the current track
    ///
    /// Clamped to `[0, duration]`. Does not change `is_playing`. Seeking past
    /// the threshold records the play if this instance has not been recorded.
    pub fn seek(&mut self, target_secs: u32) {
        let Some(duration) = self.current_track.as_ref().map(|t| t.duration_secs) else {
            return;
        };

        self.elapsed = target_secs.min(duration);
        self.emit_position_update();
        self.record_threshold_crossing();
    }

    /// Seek by fraction of the track (0.0-1.0, clamped)
    pub fn seek_to_percent(&mut self, fraction: f64) {
        let Some(duration) = self.current_track.as_ref().map(|t| t.duration_secs) else {
            return;
        };

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek((f64::from(duration) * fraction).floor() as u32);
    }

    /// Emit the play record if the threshold has been reached
    ///
    /// Fires at most once per track instance; repeated calls, later seeks and
    /// repeat-one loops never re-emit. Zero-length tracks are never recorded.
    /// Returns the record when it fires.
    pub fn record_threshold_crossing(&mut self) -> Option<PlayRecord> {
        if self.recorded || self.elapsed == 0 {
            return None;
        }
        let track = self.current_track.as_ref()?;
        if track.duration_secs == 0 {
            return None;
        }

        let reached = u64::from(self.elapsed) * 100
            >= u64::from(track.duration_secs) * u64::from(self.record_threshold_percent);
        if !reached {
            return None;
        }

        let record = PlayRecord {
            track_id: track.id,
            elapsed_secs: self.elapsed,
            device_tag: self.device_tag.clone(),
        };

        debug!(
            track_id = %record.track_id,
            elapsed = record.elapsed_secs,
            instance = self.instance,
            "Play threshold reached"
        );

        self.recorded = true;
        self.record_status = Some(RecordStatus::Pending);
        self.pending_events.push(PlaybackEvent::PlayThresholdReached {
            instance: self.instance,
            record: record.clone(),
        });

        Some(record)
    }

    /// Apply the outcome of a play record send
    ///
    /// Only applies if `instance` is still the current track instance and its
    /// record is pending; outcomes for superseded tracks are dropped. Returns
    /// whether the outcome was applied.
    pub fn apply_record_outcome(&mut self, instance: u64, success: bool) -> bool {
        if instance != self.instance || self.record_status != Some(RecordStatus::Pending) {
            debug!(
                instance,
                current = self.instance,
                "Ignoring stale play record outcome"
            );
            return false;
        }

        self.record_status = Some(if success {
            RecordStatus::Acknowledged
        } else {
            RecordStatus::Failed
        });
        true
    }

    // ===== Volume =====

    /// Set volume (clamped to 0-100); an audible level clears mute
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.emit_volume_changed();
    }

    /// Toggle mute state, preserving the volume level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.emit_volume_changed();
    }

    // ===== Shuffle & Repeat =====

    /// Flip the shuffle flag
    ///
    /// Turning shuffle on re-permutes the queue around the current track.
    /// Turning it off keeps the shuffled order.
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle);
    }

    /// Set the shuffle flag, re-permuting the queue when it turns on
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle == enabled {
            return;
        }
        self.shuffle = enabled;

        if enabled && !self.queue.is_empty() {
            let current = self.current_track.as_ref().map(|t| t.id);
            self.queue.shuffle_keeping_current(current, &mut self.rng);
            self.emit_queue_changed();
        }

        self.pending_events
            .push(PlaybackEvent::ShuffleChanged { enabled });
    }

    /// Cycle repeat mode `off → all → one → off`
    pub fn toggle_repeat(&mut self) {
        self.set_repeat(self.repeat.next());
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.pending_events
            .push(PlaybackEvent::RepeatChanged { mode });
    }

    // ===== State Queries =====

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Queue in play order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Current queue position
    pub fn queue_index(&self) -> usize {
        self.queue.index()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn volume_tier(&self) -> VolumeTier {
        self.volume.tier()
    }

    /// Current track instance number
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Whether a play record was emitted for the current instance
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn record_status(&self) -> Option<RecordStatus> {
        self.record_status
    }

    /// Progress through the current track as a percentage (0-100)
    pub fn progress_percent(&self) -> f64 {
        self.snapshot().progress_percent()
    }

    /// Clone the observable state for UI consumers
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.current_track.clone(),
            queue: self.queue.tracks().to_vec(),
            queue_index: self.queue.index(),
            is_playing: self.is_playing,
            elapsed_secs: self.elapsed,
            shuffle: self.shuffle,
            repeat: self.repeat,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            record_status: self.record_status,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// Start a new track instance
    fn load_track(&mut self, track: Track) {
        let previous_track_id: Option<TrackId> = self.current_track.as_ref().map(|t| t.id);

        self.instance += 1;
        self.recorded = false;
        self.record_status = None;
        self.elapsed = 0;

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id,
            previous_track_id,
            instance: self.instance,
        });
        self.current_track = Some(track);
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.pending_events
                .push(PlaybackEvent::StateChanged { is_playing: playing });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            index: self.queue.index(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn emit_position_update(&mut self) {
        if let Some(ref track) = self.current_track {
            self.pending_events.push(PlaybackEvent::PositionUpdate {
                elapsed_secs: self.elapsed,
                duration_secs: track.duration_secs,
            });
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
