//! Song, album, artist and playlist catalog queries.
//!
//! These endpoints are public; no token is sent.

use crate::client::endpoint;
use crate::error::{ClientError, Result};
use crate::types::{AlbumDetails, ArtistDetails, PlaylistEntry, SongPage, SongQuery, SongRow};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Catalog client for the song, album, artist and playlist endpoints.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get one page of the song listing, most played first.
    pub async fn songs(&self, query: &SongQuery) -> Result<SongPage> {
        let mut url = endpoint(self.base_url, &["api", "songs"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(page) = query.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(ref genre) = query.genre {
                pairs.append_pair("genre", genre);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        debug!(url = %url, "Fetching songs");
        let page: SongPage = self.get_json(url, "songs").await?;

        debug!(
            songs = page.songs.len(),
            page = page.pagination.page,
            total = page.pagination.total,
            "Fetched songs"
        );
        Ok(page)
    }

    /// Get the trending songs (top 20 by play count).
    pub async fn trending(&self) -> Result<Vec<SongRow>> {
        let url = endpoint(self.base_url, &["api", "songs", "trending", "all"])?;
        debug!(url = %url, "Fetching trending songs");

        let songs: Vec<SongRow> = self.get_json(url, "trending").await?;
        debug!(results = songs.len(), "Fetched trending songs");
        Ok(songs)
    }

    /// Search songs by title or artist name.
    pub async fn search(&self, query: &str) -> Result<Vec<SongRow>> {
        let url = endpoint(self.base_url, &["api", "songs", "search", query])?;
        debug!(url = %url, query = %query, "Searching songs");

        let songs: Vec<SongRow> = self.get_json(url, "search").await?;
        debug!(results = songs.len(), "Search complete");
        Ok(songs)
    }

    /// Get a single song by ID.
    pub async fn song(&self, song_id: i64) -> Result<SongRow> {
        let url = endpoint(self.base_url, &["api", "songs", song_id.to_string().as_str()])?;
        debug!(url = %url, song_id, "Fetching song");

        self.get_json(url, "song").await
    }

    /// Songs of an album in track order.
    pub async fn album(&self, album_id: i64) -> Result<Vec<SongRow>> {
        let url = endpoint(self.base_url, &["api", "albums", album_id.to_string().as_str()])?;
        debug!(url = %url, album_id, "Fetching album");

        let details: AlbumDetails = self.get_json(url, "album").await?;
        debug!(
            album = %details.album.title,
            songs = details.songs.len(),
            "Fetched album"
        );
        Ok(details.into_songs())
    }

    /// Songs of an artist, most played first.
    pub async fn artist(&self, artist_id: i64) -> Result<Vec<SongRow>> {
        let url = endpoint(self.base_url, &["api", "artists", artist_id.to_string().as_str()])?;
        debug!(url = %url, artist_id, "Fetching artist");

        let details: ArtistDetails = self.get_json(url, "artist").await?;
        debug!(
            artist = %details.artist.name,
            songs = details.songs.len(),
            "Fetched artist"
        );
        Ok(details.into_songs())
    }

    /// Songs of a playlist by position.
    ///
    /// An unknown or empty playlist yields an empty list.
    pub async fn playlist(&self, playlist_id: i64) -> Result<Vec<SongRow>> {
        let url = endpoint(
            self.base_url,
            &["api", "queries", "playlist-details", playlist_id.to_string().as_str()],
        )?;
        debug!(url = %url, playlist_id, "Fetching playlist");

        let entries: Vec<PlaylistEntry> = self.get_json(url, "playlist").await?;
        debug!(songs = entries.len(), "Fetched playlist");
        Ok(entries.into_iter().map(SongRow::from).collect())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
            })
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
