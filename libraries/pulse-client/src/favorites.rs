//! Favorite songs of the signed-in user.

use crate::client::endpoint;
use crate::error::{ClientError, Result};
use crate::types::{FavoriteRequest, SongRow};
use pulse_playback::TrackId;
use reqwest::Client;
use tracing::debug;

/// Favorites client; every call carries the bearer token.
pub struct FavoritesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> FavoritesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// List a user's favorites, most recently added first.
    pub async fn list(&self, user_id: i64) -> Result<Vec<SongRow>> {
        let url = endpoint(self.base_url, &["api", "favorites", user_id.to_string().as_str()])?;
        debug!(url = %url, user_id, "Fetching favorites");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let songs: Vec<SongRow> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse favorites response: {}", e))
            })?;

            debug!(results = songs.len(), "Fetched favorites");
            Ok(songs)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Add a song to favorites.
    pub async fn add(&self, song_id: TrackId) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "favorites"])?;
        debug!(url = %url, song_id = %song_id, "Adding favorite");

        let response = self
            .http
            .post(url)
            .bearer_auth(self.token)
            .json(&FavoriteRequest { song_id: song_id.0 })
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            match ClientError::from_response(response).await {
                ClientError::Conflict(_) => Err(ClientError::AlreadyFavorite(song_id)),
                e => Err(e),
            }
        }
    }

    /// Remove a song from favorites.
    ///
    /// Removing a song that is not a favorite succeeds.
    pub async fn remove(&self, song_id: TrackId) -> Result<()> {
        let url = endpoint(
            self.base_url,
            &["api", "favorites", song_id.to_string().as_str()],
        )?;
        debug!(url = %url, song_id = %song_id, "Removing favorite");

        let response = self
            .http
            .delete(url)
            .bearer_auth(self.token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            debug!(song_id = %song_id, "Favorite removed");
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
