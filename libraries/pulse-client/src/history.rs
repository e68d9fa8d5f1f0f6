//! Listening history: the "play recorded" call.

use crate::client::endpoint;
use crate::error::{ClientError, Result};
use crate::types::ListeningHistoryRequest;
use pulse_playback::PlayRecord;
use reqwest::Client;
use tracing::debug;

/// Listening history client.
pub struct HistoryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> HistoryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Record one play of a song.
    ///
    /// Single attempt; callers decide what a failure means.
    pub async fn record_play(&self, record: &PlayRecord) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "listening-history"])?;
        debug!(
            url = %url,
            track_id = %record.track_id,
            elapsed = record.elapsed_secs,
            device = %record.device_tag,
            "Recording play"
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(self.token)
            .json(&ListeningHistoryRequest::from(record))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            debug!(track_id = %record.track_id, "Play recorded");
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
