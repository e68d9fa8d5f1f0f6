//! Play record delivery.
//!
//! The player hands each threshold crossing to a [`PlayRecorder`] on a
//! separate task; the session never waits for it.

use crate::error::Result;
use async_trait::async_trait;
use pulse_client::PulseClient;
use pulse_playback::PlayRecord;
use tracing::debug;

/// What happened to a play record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the service
    Sent,
    /// Not sent (no signed-in user)
    Skipped,
}

/// Destination for play records
///
/// Called at most once per track instance, with no retry on failure.
#[async_trait]
pub trait PlayRecorder: Send + Sync {
    async fn record_play(&self, record: &PlayRecord) -> Result<Delivery>;
}

/// Records plays through the catalog service's listening history
#[derive(Clone)]
pub struct ClientRecorder {
    client: PulseClient,
}

impl ClientRecorder {
    pub fn new(client: PulseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlayRecorder for ClientRecorder {
    async fn record_play(&self, record: &PlayRecord) -> Result<Delivery> {
        if !self.client.is_authenticated().await {
            debug!(track_id = %record.track_id, "Not signed in, play not recorded");
            return Ok(Delivery::Skipped);
        }

        self.client.record_play(record).await?;
        Ok(Delivery::Sent)
    }
}

/// Recorder that drops every record (offline use)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

#[async_trait]
impl PlayRecorder for NoopRecorder {
    async fn record_play(&self, _record: &PlayRecord) -> Result<Delivery> {
        Ok(Delivery::Skipped)
    }
}
