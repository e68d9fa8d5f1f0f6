//! Property-based tests for the playback session
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use pulse_playback::{
    PlaybackConfig, PlaybackEvent, PlaybackSession, RepeatMode, Track, TrackId,
};
use std::collections::HashMap;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        1i64..1000,         // id
        "[A-Za-z ]{1,30}",  // title
        "[A-Za-z ]{1,20}",  // artist
        1u32..600,          // duration (1-600 seconds)
    )
        .prop_map(|(id, title, artist, duration_secs)| {
            Track::new(id, title, artist, duration_secs)
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..30)
}

fn arbitrary_repeat() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::Off),
        Just(RepeatMode::All),
        Just(RepeatMode::One),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Play(usize),
    PlaySingle,
    Advance,
    Retreat,
    ToggleShuffle,
    ToggleRepeat,
    TogglePlay,
    Tick(u16),
    Seek(u32),
    JumpTo(usize),
    SetVolume(u8),
    ToggleMute,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..40).prop_map(Op::Play),
        Just(Op::PlaySingle),
        Just(Op::Advance),
        Just(Op::Retreat),
        Just(Op::ToggleShuffle),
        Just(Op::ToggleRepeat),
        Just(Op::TogglePlay),
        (1u16..700).prop_map(Op::Tick),
        (0u32..700).prop_map(Op::Seek),
        (0usize..40).prop_map(Op::JumpTo),
        any::<u8>().prop_map(Op::SetVolume),
        Just(Op::ToggleMute),
    ]
}

fn apply(session: &mut PlaybackSession, tracks: &[Track], op: &Op) {
    match *op {
        Op::Play(i) => {
            let track = tracks[i % tracks.len()].clone();
            session.play(track, tracks.to_vec());
        }
        Op::PlaySingle => session.play(tracks[0].clone(), vec![]),
        Op::Advance => session.advance(),
        Op::Retreat => session.retreat(),
        Op::ToggleShuffle => session.toggle_shuffle(),
        Op::ToggleRepeat => session.toggle_repeat(),
        Op::TogglePlay => session.toggle_play(),
        Op::Tick(n) => {
            for _ in 0..n {
                session.tick();
            }
        }
        Op::Seek(secs) => session.seek(secs),
        Op::JumpTo(i) => session.jump_to(i),
        Op::SetVolume(v) => session.set_volume(v),
        Op::ToggleMute => session.toggle_mute(),
    }
}

fn id_counts(tracks: &[Track]) -> HashMap<TrackId, usize> {
    let mut counts = HashMap::new();
    for track in tracks {
        *counts.entry(track.id).or_insert(0) += 1;
    }
    counts
}

// ===== Property Tests =====

proptest! {
    /// Property: queue index stays in range and elapsed never exceeds duration
    #[test]
    fn state_invariants_hold_after_any_operation(
        tracks in arbitrary_tracks(),
        ops in prop::collection::vec(arbitrary_op(), 1..40),
        seed in any::<u64>(),
    ) {
        let mut session = PlaybackSession::with_seed(PlaybackConfig::default(), seed);

        for op in &ops {
            apply(&mut session, &tracks, op);

            let queue = session.queue();
            if queue.is_empty() {
                prop_assert_eq!(session.queue_index(), 0);
            } else {
                prop_assert!(session.queue_index() < queue.len(), "Index out of range");
            }

            if let Some(track) = session.current_track() {
                prop_assert!(
                    session.elapsed_secs() <= track.duration_secs,
                    "Elapsed {} past duration {}",
                    session.elapsed_secs(),
                    track.duration_secs
                );
            } else {
                prop_assert!(!session.is_playing(), "Playing without a current track");
            }

            prop_assert!(session.volume() <= 100);
        }
    }

    /// Property: at most one play record per track instance
    #[test]
    fn play_record_at_most_once_per_instance(
        tracks in arbitrary_tracks(),
        ops in prop::collection::vec(arbitrary_op(), 1..40),
        seed in any::<u64>(),
    ) {
        let mut session = PlaybackSession::with_seed(PlaybackConfig::default(), seed);
        let mut recorded: HashMap<u64, usize> = HashMap::new();

        for op in &ops {
            apply(&mut session, &tracks, op);
            for event in session.drain_events() {
                if let PlaybackEvent::PlayThresholdReached { instance, .. } = event {
                    *recorded.entry(instance).or_insert(0) += 1;
                }
            }
        }

        for (instance, count) in recorded {
            prop_assert_eq!(count, 1, "Instance {} recorded {} times", instance, count);
        }
    }

    /// Property: shuffle is a permutation that keeps the current track in place
    #[test]
    fn shuffle_preserves_tracks_and_current(
        tracks in arbitrary_tracks(),
        start in 0usize..30,
        seed in any::<u64>(),
    ) {
        let mut session = PlaybackSession::with_seed(PlaybackConfig::default(), seed);
        let start = start % tracks.len();
        session.play(tracks[start].clone(), tracks.clone());
        let current = session.current_track().map(|t| t.id);

        session.toggle_shuffle();

        prop_assert_eq!(id_counts(session.queue()), id_counts(&tracks), "Shuffle lost or duplicated tracks");
        let index = session.queue_index();
        prop_assert_eq!(Some(session.queue()[index].id), current);
        prop_assert_eq!(session.current_track().map(|t| t.id), current);
    }

    /// Property: advancing a full lap under repeat all returns to the start
    #[test]
    fn repeat_all_full_lap_returns_to_start(tracks in arbitrary_tracks()) {
        let mut session = PlaybackSession::default();
        session.set_repeat(RepeatMode::All);
        session.play(tracks[0].clone(), tracks.clone());

        for _ in 0..tracks.len() {
            session.advance();
            prop_assert!(session.is_playing());
        }

        prop_assert_eq!(session.queue_index(), 0);
    }

    /// Property: toggling repeat three times is the identity
    #[test]
    fn repeat_cycle_has_period_three(mode in arbitrary_repeat()) {
        let mut session = PlaybackSession::default();
        session.set_repeat(mode);

        session.toggle_repeat();
        session.toggle_repeat();
        session.toggle_repeat();

        prop_assert_eq!(session.repeat(), mode);
    }

    /// Property: volume is clamped and mute never loses the level
    #[test]
    fn volume_clamped_and_preserved_through_mute(volume in any::<u8>()) {
        let mut session = PlaybackSession::default();
        session.set_volume(volume);
        let level = session.volume();
        prop_assert!(level <= 100, "Volume exceeded 100: {}", level);

        session.toggle_mute();
        session.toggle_mute();
        prop_assert_eq!(session.volume(), level);
    }

    /// Property: seek clamps to the track duration
    #[test]
    fn seek_clamps_to_duration(track in arbitrary_track(), target in any::<u32>()) {
        let mut session = PlaybackSession::default();
        let duration = track.duration_secs;
        session.play(track, vec![]);

        session.seek(target);

        prop_assert_eq!(session.elapsed_secs(), target.min(duration));
    }
}
