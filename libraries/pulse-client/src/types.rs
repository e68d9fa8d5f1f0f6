//! Types for the Pulse catalog API requests and responses.

use pulse_playback::{PlayRecord, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a Pulse catalog service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://localhost:5000")
    pub url: String,
    /// Bearer token (if authenticated)
    pub token: Option<String>,
    /// Signed-in user (if known)
    pub user_id: Option<i64>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            user_id: None,
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: Some(token.into()),
            user_id: None,
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signed-in user as returned by login.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub subscription_type: Option<String>,
}

/// Response from successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

/// Request body for account registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to "Unknown" on the service when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Response from successful registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: i64,
    pub token: String,
}

// =============================================================================
// Catalog Types
// =============================================================================

/// A song row as returned by the catalog endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongRow {
    pub song_id: i64,
    pub title: String,
    /// Duration in whole seconds
    pub duration: u32,
    /// Absent on album and artist song lists; filled from the parent
    #[serde(default)]
    pub artist_name: String,
    pub cover_image: Option<String>,
    pub genre: Option<String>,
    #[serde(default)]
    pub play_count: Option<i64>,
    #[serde(default)]
    pub likes_count: Option<i64>,
}

impl From<SongRow> for Track {
    fn from(row: SongRow) -> Self {
        Track {
            id: TrackId(row.song_id),
            title: row.title,
            duration_secs: row.duration,
            artist: row.artist_name,
            cover_image: row.cover_image,
        }
    }
}

/// Pagination block of the song listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

/// One page of the song listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongPage {
    pub songs: Vec<SongRow>,
    pub pagination: Pagination,
}

impl SongPage {
    /// Convert the rows into playable tracks.
    pub fn into_tracks(self) -> Vec<Track> {
        self.songs.into_iter().map(Track::from).collect()
    }
}

/// Filters for the song listing.
///
/// Unset fields fall back to the service defaults (page 1, 20 per page).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub genre: Option<String>,
}

/// Album header on the album details endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumSummary {
    pub album_id: i64,
    pub title: String,
    pub artist_name: String,
    pub cover_image: Option<String>,
}

/// Album with its songs in track order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumDetails {
    pub album: AlbumSummary,
    pub songs: Vec<SongRow>,
}

impl AlbumDetails {
    /// Songs carrying the album's artist and cover.
    pub fn into_songs(self) -> Vec<SongRow> {
        let AlbumDetails { album, songs } = self;
        songs
            .into_iter()
            .map(|song| SongRow {
                artist_name: album.artist_name.clone(),
                cover_image: song.cover_image.or_else(|| album.cover_image.clone()),
                ..song
            })
            .collect()
    }
}

/// Artist header on the artist details endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistSummary {
    pub artist_id: i64,
    pub name: String,
}

/// Artist with their songs, most played first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistDetails {
    pub artist: ArtistSummary,
    pub songs: Vec<SongRow>,
}

impl ArtistDetails {
    /// Songs carrying the artist's name.
    pub fn into_songs(self) -> Vec<SongRow> {
        let ArtistDetails { artist, songs } = self;
        songs
            .into_iter()
            .map(|song| SongRow {
                artist_name: artist.name.clone(),
                ..song
            })
            .collect()
    }
}

/// One row of the playlist details endpoint (one per song, by position).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistEntry {
    pub playlist_id: i64,
    pub playlist_title: String,
    pub position: u32,
    pub song_id: i64,
    pub song_title: String,
    pub duration: u32,
    pub genre: Option<String>,
    pub artist_name: String,
    pub cover_image: Option<String>,
}

impl From<PlaylistEntry> for SongRow {
    fn from(entry: PlaylistEntry) -> Self {
        SongRow {
            song_id: entry.song_id,
            title: entry.song_title,
            duration: entry.duration,
            artist_name: entry.artist_name,
            cover_image: entry.cover_image,
            genre: entry.genre,
            play_count: None,
            likes_count: None,
        }
    }
}

// =============================================================================
// Favorites & History Types
// =============================================================================

/// Request body for adding a favorite.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub song_id: i64,
}

/// Request body for recording a play.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListeningHistoryRequest {
    pub song_id: i64,
    /// Seconds listened when the play was recorded
    pub duration: u32,
    pub device: String,
}

impl From<&PlayRecord> for ListeningHistoryRequest {
    fn from(record: &PlayRecord) -> Self {
        Self {
            song_id: record.track_id.0,
            duration: record.elapsed_secs,
            device: record.device_tag.clone(),
        }
    }
}

/// Error body (`{"error": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: String,
}
