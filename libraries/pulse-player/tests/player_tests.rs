//! Player runtime tests
//!
//! Run on a paused tokio clock so ticks are deterministic: sleeping in the
//! test advances time exactly to the next due timer.

use async_trait::async_trait;
use pulse_client::ClientError;
use pulse_playback::{PlayRecord, PlaybackConfig, PlaybackEvent, RecordStatus, RepeatMode, Track, TrackId};
use pulse_player::{Delivery, PlayRecorder, Player, PlayerCommand, PlayerError, SHUTDOWN_GRACE};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

// ===== Test Helpers =====

#[derive(Default)]
struct MockRecorder {
    records: Mutex<Vec<PlayRecord>>,
    completed: AtomicUsize,
    delay: Duration,
    fail: bool,
}

impl MockRecorder {
    fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn records(&self) -> Vec<PlayRecord> {
        self.records.lock().unwrap().clone()
    }

    fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayRecorder for MockRecorder {
    async fn record_play(&self, record: &PlayRecord) -> pulse_player::Result<Delivery> {
        self.records.lock().unwrap().push(record.clone());
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            Err(PlayerError::Record(ClientError::ServerError {
                status: 500,
                message: "Failed to record play".to_string(),
            }))
        } else {
            Ok(Delivery::Sent)
        }
    }
}

fn track(id: i64, duration_secs: u32) -> Track {
    Track::new(id, format!("Track {}", id), "Test Artist", duration_secs)
}

fn spawn(recorder: &Arc<MockRecorder>) -> Player {
    Player::spawn(PlaybackConfig::default(), recorder.clone()).unwrap()
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

// ===== Ticking =====

#[tokio::test(start_paused = true)]
async fn test_ticks_advance_elapsed_once_per_second() {
    let recorder = Arc::new(MockRecorder::default());
    let player = spawn(&recorder);

    player.play(track(1, 100), vec![]).await.unwrap();
    sleep(millis(3500)).await;

    let snapshot = player.snapshot();
    assert_eq!(snapshot.elapsed_secs, 3);
    assert!(snapshot.is_playing);
}

#[tokio::test(start_paused = true)]
async fn test_paused_player_does_not_tick() {
    let recorder = Arc::new(MockRecorder::default());
    let player = spawn(&recorder);

    player.play(track(1, 100), vec![]).await.unwrap();
    sleep(millis(3500)).await;
    player.send(PlayerCommand::TogglePlay).await.unwrap();
    sleep(Duration::from_secs(10)).await;

    let snapshot = player.snapshot();
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.elapsed_secs, 3);

    // Resuming starts a fresh second
    player.send(PlayerCommand::TogglePlay).await.unwrap();
    sleep(millis(1200)).await;
    assert_eq!(player.snapshot().elapsed_secs, 4);
}

#[tokio::test(start_paused = true)]
async fn test_track_switch_restarts_tick_phase() {
    let recorder = Arc::new(MockRecorder::default());
    let player = spawn(&recorder);
    let tracks = vec![track(1, 100), track(2, 100)];

    player.play(tracks[0].clone(), tracks.clone()).await.unwrap();
    sleep(millis(1500)).await;
    assert_eq!(player.snapshot().elapsed_secs, 1);

    player.send(PlayerCommand::Next).await.unwrap();
    sleep(millis(700)).await;

    let snapshot = player.snapshot();
    assert_eq!(snapshot.current_track.unwrap().id, TrackId(2));
    assert_eq!(snapshot.elapsed_secs, 0);

    sleep(millis(500)).await;
    assert_eq!(player.snapshot().elapsed_secs, 1);
}

#[tokio::test(start_paused = true)]
async fn test_queue_end_stops_ticking() {
    let recorder = Arc::new(MockRecorder::default());
    let player = spawn(&recorder);

    player.play(track(1, 3), vec![]).await.unwrap();
    sleep(Duration::from_secs(10)).await;

    let snapshot = player.snapshot();
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.elapsed_secs, 0);
    assert_eq!(snapshot.current_track.unwrap().id, TrackId(1));
}

// ===== Play Recording =====

#[tokio::test(start_paused = true)]
async fn test_record_sent_once_at_threshold() {
    let recorder = Arc::new(MockRecorder::default());
    let player = spawn(&recorder);

    player.play(track(5, 10), vec![]).await.unwrap();
    sleep(millis(7500)).await;
    assert!(recorder.records().is_empty());

    sleep(Duration::from_secs(1)).await;

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].track_id, TrackId(5));
    assert_eq!(records[0].elapsed_secs, 8);
    assert_eq!(records[0].device_tag, "web");
    assert_eq!(
        player.snapshot().record_status,
        Some(RecordStatus::Acknowledged)
    );
}

#[tokio::test(start_paused = true)]
async fn test_repeat_one_records_once() {
    let recorder = Arc::new(MockRecorder::default());
    let config = PlaybackConfig {
        repeat: RepeatMode::One,
        ..Default::default()
    };
    let player = Player::spawn(config, recorder.clone()).unwrap();

    player.play(track(1, 5), vec![]).await.unwrap();
    sleep(millis(20_500)).await;

    assert_eq!(recorder.records().len(), 1);
    assert!(player.snapshot().is_playing);
}

#[tokio::test(start_paused = true)]
async fn test_failed_record_does_not_stop_playback() {
    let recorder = Arc::new(MockRecorder::failing());
    let player = spawn(&recorder);

    player.play(track(1, 10), vec![]).await.unwrap();
    sleep(millis(8500)).await;

    let snapshot = player.snapshot();
    assert_eq!(snapshot.record_status, Some(RecordStatus::Failed));
    assert!(snapshot.is_playing);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(player.snapshot().elapsed_secs, 9);
    assert_eq!(recorder.records().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_late_outcome_for_previous_track_is_ignored() {
    let recorder = Arc::new(MockRecorder::delayed(Duration::from_secs(5)));
    let player = spawn(&recorder);
    let tracks = vec![track(1, 10), track(2, 100)];

    player.play(tracks[0].clone(), tracks.clone()).await.unwrap();
    sleep(millis(8500)).await;
    assert_eq!(recorder.records().len(), 1);
    assert_eq!(player.snapshot().record_status, Some(RecordStatus::Pending));

    player.send(PlayerCommand::Next).await.unwrap();
    sleep(Duration::from_secs(6)).await;

    // Send for track 1 finished after the switch
    assert_eq!(recorder.completed(), 1);
    let snapshot = player.snapshot();
    assert_eq!(snapshot.current_track.unwrap().id, TrackId(2));
    assert_eq!(snapshot.record_status, None);
}

#[tokio::test(start_paused = true)]
async fn test_slow_record_does_not_delay_ticks() {
    let recorder = Arc::new(MockRecorder::delayed(Duration::from_secs(30)));
    let player = spawn(&recorder);

    player.play(track(1, 10), vec![]).await.unwrap();
    sleep(millis(9500)).await;

    assert_eq!(player.snapshot().elapsed_secs, 9);
    assert_eq!(recorder.completed(), 0);
}

// ===== Lifecycle =====

#[tokio::test(start_paused = true)]
async fn test_shutdown_lets_last_record_finish() {
    let recorder = Arc::new(MockRecorder::delayed(millis(500)));
    let player = spawn(&recorder);
    let mut events = player.subscribe();

    // One-second track: threshold and track end land on the same tick
    player.play(track(1, 1), vec![]).await.unwrap();
    loop {
        if let Ok(PlaybackEvent::QueueEnded) = events.recv().await {
            break;
        }
    }

    player.shutdown().await.unwrap();

    assert_eq!(recorder.records().len(), 1);
    assert_eq!(recorder.completed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_record_after_grace() {
    let recorder = Arc::new(MockRecorder::delayed(Duration::from_secs(60)));
    let player = spawn(&recorder);

    player.play(track(1, 10), vec![]).await.unwrap();
    sleep(millis(8500)).await;
    assert_eq!(recorder.records().len(), 1);

    let started = tokio::time::Instant::now();
    player.shutdown().await.unwrap();
    assert!(started.elapsed() >= SHUTDOWN_GRACE);
    assert!(started.elapsed() < Duration::from_secs(60));

    sleep(Duration::from_secs(120)).await;

    assert_eq!(recorder.completed(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_events_are_broadcast() {
    let recorder = Arc::new(MockRecorder::default());
    let player = spawn(&recorder);
    let mut events = player.subscribe();

    player.play(track(3, 100), vec![]).await.unwrap();

    let changed = tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            if let Ok(PlaybackEvent::TrackChanged { track_id, .. }) = events.recv().await {
                return track_id;
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(changed, TrackId(3));
}

#[tokio::test(start_paused = true)]
async fn test_watch_notifies_on_change() {
    let recorder = Arc::new(MockRecorder::default());
    let player = spawn(&recorder);
    let mut state = player.watch();

    player.send(PlayerCommand::SetVolume(25)).await.unwrap();
    state.changed().await.unwrap();

    assert_eq!(state.borrow().volume, 25);
    assert!(!player.is_finished());
}

#[tokio::test]
async fn test_spawn_rejects_invalid_config() {
    let config = PlaybackConfig {
        volume: 150,
        ..Default::default()
    };

    let result = Player::spawn(config, Arc::new(MockRecorder::default()));
    assert!(matches!(result, Err(PlayerError::Config(_))));
}
