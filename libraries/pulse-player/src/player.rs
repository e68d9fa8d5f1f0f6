//! Player runtime
//!
//! One tokio task owns the [`PlaybackSession`]. Everything else talks to it
//! through channels:
//! - commands in over `mpsc`
//! - the latest [`PlaybackSnapshot`] out over `watch`
//! - [`PlaybackEvent`]s out over `broadcast`
//!
//! The task also drives the one-second [`Ticker`] and spawns a send for
//! every play record, feeding the outcome back into the session. Sends still
//! in flight at shutdown get [`SHUTDOWN_GRACE`] to finish before they are
//! cancelled.

use crate::command::PlayerCommand;
use crate::error::{PlayerError, Result};
use crate::recorder::{Delivery, PlayRecorder};
use crate::ticker::Ticker;
use pulse_playback::{
    PlayRecord, PlaybackConfig, PlaybackEvent, PlaybackSession, PlaybackSnapshot, Track,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const COMMAND_BUFFER: usize = 64;
const EVENT_BUFFER: usize = 256;

/// How long shutdown waits for in-flight play record sends
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Handle to a running player task
///
/// Dropping the handle closes the command channel, which also stops the task.
pub struct Player {
    commands: mpsc::Sender<PlayerCommand>,
    snapshot: watch::Receiver<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
    task: JoinHandle<()>,
}

impl Player {
    /// Spawn the player task on the current tokio runtime
    pub fn spawn(config: PlaybackConfig, recorder: Arc<dyn PlayRecorder>) -> Result<Self> {
        let session = PlaybackSession::try_new(config)?;
        Ok(Self::spawn_session(session, recorder))
    }

    /// Spawn the player task around an existing session
    pub fn spawn_session(session: PlaybackSession, recorder: Arc<dyn PlayRecorder>) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let (events_tx, _) = broadcast::channel(EVENT_BUFFER);
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        let task = PlayerTask {
            session,
            ticker: Ticker::default(),
            ticking_instance: None,
            recorder,
            snapshot: snapshot_tx,
            events: events_tx.clone(),
            outcomes_tx,
            outcomes_rx,
            sends: JoinSet::new(),
            cancel: CancellationToken::new(),
        };

        let task = tokio::spawn(task.run(commands_rx));

        Self {
            commands: commands_tx,
            snapshot: snapshot_rx,
            events: events_tx,
            task,
        }
    }

    /// Dispatch a command to the player task
    pub async fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PlayerError::Closed)
    }

    /// Play `track`, replacing the queue with `source` when it is non-empty
    pub async fn play(&self, track: Track, source: Vec<Track>) -> Result<()> {
        self.send(PlayerCommand::Play { track, source }).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that is notified on every state change
    pub fn watch(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot.clone()
    }

    /// Subscribe to playback events
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Whether the player task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the player task and wait for it to exit
    ///
    /// In-flight play record sends get [`SHUTDOWN_GRACE`] to complete and are
    /// cancelled after that.
    pub async fn shutdown(self) -> Result<()> {
        // Task may already be gone; the join below reports how it ended
        let _ = self.commands.send(PlayerCommand::Shutdown).await;
        self.task.await?;
        Ok(())
    }
}

/// State owned by the player task
struct PlayerTask {
    session: PlaybackSession,
    ticker: Ticker,
    /// Track instance the ticker was armed for
    ticking_instance: Option<u64>,
    recorder: Arc<dyn PlayRecorder>,
    snapshot: watch::Sender<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
    outcomes_tx: mpsc::UnboundedSender<(u64, bool)>,
    outcomes_rx: mpsc::UnboundedReceiver<(u64, bool)>,
    sends: JoinSet<()>,
    cancel: CancellationToken,
}

impl PlayerTask {
    async fn run(mut self, mut commands: mpsc::Receiver<PlayerCommand>) {
        debug!("Player task started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(PlayerCommand::Shutdown) | None => break,
                    Some(command) => command.apply(&mut self.session),
                },
                () = self.ticker.tick() => self.session.tick(),
                // Never None: the task keeps its own outcomes_tx
                Some((instance, ok)) = self.outcomes_rx.recv() => {
                    self.session.apply_record_outcome(instance, ok);
                }
                Some(_) = self.sends.join_next(), if !self.sends.is_empty() => {}
            }

            self.publish();
        }

        self.ticker.disarm();
        self.finish_sends().await;
        info!("Player stopped");
    }

    /// Let in-flight sends complete within the grace period, then cancel the rest
    async fn finish_sends(&mut self) {
        if !self.sends.is_empty() {
            debug!(pending = self.sends.len(), "Waiting for play record sends");

            let sends = &mut self.sends;
            let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
                while sends.join_next().await.is_some() {}
            })
            .await;

            if drained.is_err() {
                warn!(
                    pending = self.sends.len(),
                    "Play record sends still pending at shutdown"
                );
            }
        }

        self.cancel.cancel();
        while self.sends.join_next().await.is_some() {}
    }

    /// Push events and state out after a transition and keep the ticker in step
    fn publish(&mut self) {
        for event in self.session.drain_events() {
            match &event {
                PlaybackEvent::TrackChanged {
                    track_id, instance, ..
                } => {
                    if let Some(track) = self.session.current_track() {
                        info!(
                            track_id = %track_id,
                            instance,
                            title = %track.title,
                            artist = %track.artist,
                            "Now playing"
                        );
                    }
                }
                PlaybackEvent::PlayThresholdReached { instance, record } => {
                    self.send_record(*instance, record.clone());
                }
                PlaybackEvent::QueueEnded => info!("Queue ended"),
                _ => {}
            }

            // No subscribers is fine
            let _ = self.events.send(event);
        }

        self.sync_ticker();

        let snapshot = self.session.snapshot();
        self.snapshot.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Armed only while playing, re-armed on every new track instance
    fn sync_ticker(&mut self) {
        if !self.session.is_playing() {
            if self.ticker.is_armed() {
                self.ticker.disarm();
                self.ticking_instance = None;
            }
            return;
        }

        let instance = self.session.instance();
        if self.ticking_instance != Some(instance) || !self.ticker.is_armed() {
            self.ticker.arm();
            self.ticking_instance = Some(instance);
        }
    }

    /// Fire-and-forget delivery of one play record
    fn send_record(&mut self, instance: u64, record: PlayRecord) {
        let recorder = Arc::clone(&self.recorder);
        let outcomes = self.outcomes_tx.clone();
        let cancel = self.cancel.clone();

        self.sends.spawn(async move {
            let result = tokio::select! {
                () = cancel.cancelled() => {
                    debug!(track_id = %record.track_id, "Play record send cancelled");
                    return;
                }
                result = recorder.record_play(&record) => result,
            };

            let ok = match result {
                Ok(Delivery::Sent) => {
                    debug!(track_id = %record.track_id, instance, "Play recorded");
                    true
                }
                Ok(Delivery::Skipped) => false,
                Err(e) => {
                    warn!(
                        track_id = %record.track_id,
                        instance,
                        error = %e,
                        "Failed to record play"
                    );
                    false
                }
            };

            // Player may have shut down meanwhile
            let _ = outcomes.send((instance, ok));
        });
    }
}
