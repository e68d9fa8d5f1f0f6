//! Main Pulse catalog client.

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::error::{ClientError, Result};
use crate::favorites::FavoritesClient;
use crate::history::HistoryClient;
use crate::types::{
    ClientConfig, LoginResponse, RegisterRequest, RegisterResponse, SongPage, SongQuery, SongRow,
};
use pulse_playback::{PlayRecord, TrackId};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use url::Url;

/// Main client for the Pulse catalog/identity service.
///
/// Holds the bearer token obtained at login and attaches it to the calls
/// that need one. Cloning is cheap and clones share the token.
///
/// # Example
///
/// ```ignore
/// use pulse_client::{ClientConfig, PulseClient};
///
/// let client = PulseClient::new(ClientConfig::new("http://localhost:5000"))?;
///
/// let trending = client.trending().await?;
/// println!("{} trending songs", trending.len());
///
/// client.login("ana@example.com", "secret").await?;
/// client.add_favorite(trending[0].song_id.into()).await?;
/// ```
#[derive(Clone)]
pub struct PulseClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl PulseClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let normalized_config = ClientConfig { url, ..config };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("PulsePlay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the service URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has a token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.token.is_some()
    }

    /// Get the current token.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.token.clone()
    }

    /// Get the signed-in user, if known.
    pub async fn user_id(&self) -> Option<i64> {
        self.config.read().await.user_id
    }

    /// Set the token directly (e.g., from stored credentials).
    pub async fn set_token(&self, token: String) {
        self.config.write().await.token = Some(token);
    }

    /// Clear the stored token and user (logout).
    pub async fn logout(&self) {
        let mut config = self.config.write().await;
        config.token = None;
        config.user_id = None;
        info!("Logged out");
    }

    // ===== Auth =====

    /// Login with email and password.
    ///
    /// On success, the token is stored for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url().await;

        let response = AuthClient::new(&self.http, &url)
            .login(email, password)
            .await?;

        let mut config = self.config.write().await;
        config.token = Some(response.token.clone());
        config.user_id = Some(response.user.user_id);

        Ok(response)
    }

    /// Register a new account and sign in as it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        let url = self.url().await;

        let response = AuthClient::new(&self.http, &url).register(request).await?;

        let mut config = self.config.write().await;
        config.token = Some(response.token.clone());
        config.user_id = Some(response.user_id);

        Ok(response)
    }

    // ===== Catalog =====

    /// One page of the song listing.
    pub async fn songs(&self, query: &SongQuery) -> Result<SongPage> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).songs(query).await
    }

    /// Trending songs.
    pub async fn trending(&self) -> Result<Vec<SongRow>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).trending().await
    }

    /// Search songs by title or artist.
    pub async fn search(&self, query: &str) -> Result<Vec<SongRow>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).search(query).await
    }

    /// A single song.
    pub async fn song(&self, song_id: i64) -> Result<SongRow> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).song(song_id).await
    }

    /// Songs of an album.
    pub async fn album(&self, album_id: i64) -> Result<Vec<SongRow>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).album(album_id).await
    }

    /// Songs of an artist.
    pub async fn artist(&self, artist_id: i64) -> Result<Vec<SongRow>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).artist(artist_id).await
    }

    /// Songs of a playlist.
    pub async fn playlist(&self, playlist_id: i64) -> Result<Vec<SongRow>> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).playlist(playlist_id).await
    }

    // ===== Authenticated =====

    /// A user's favorite songs.
    pub async fn favorites(&self, user_id: i64) -> Result<Vec<SongRow>> {
        let (url, token) = self.credentials().await?;
        FavoritesClient::new(&self.http, &url, &token)
            .list(user_id)
            .await
    }

    /// Add a song to the signed-in user's favorites.
    pub async fn add_favorite(&self, song_id: TrackId) -> Result<()> {
        let (url, token) = self.credentials().await?;
        FavoritesClient::new(&self.http, &url, &token)
            .add(song_id)
            .await
    }

    /// Remove a song from the signed-in user's favorites.
    pub async fn remove_favorite(&self, song_id: TrackId) -> Result<()> {
        let (url, token) = self.credentials().await?;
        FavoritesClient::new(&self.http, &url, &token)
            .remove(song_id)
            .await
    }

    /// Record one play for the signed-in user.
    pub async fn record_play(&self, record: &PlayRecord) -> Result<()> {
        let (url, token) = self.credentials().await?;
        HistoryClient::new(&self.http, &url, &token)
            .record_play(record)
            .await
    }

    /// URL and token for an authenticated call; fails before any request
    /// is sent when there is no token.
    async fn credentials(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config.token.clone().ok_or(ClientError::AuthRequired)?;
        Ok((config.url.clone(), token))
    }
}

/// Build an endpoint URL under `base` from raw path segments.
///
/// Segments are percent-encoded, so user input (search terms) is safe to pass.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
