//! Pulse Play Catalog Client
//!
//! HTTP client library for the Pulse catalog/identity service.
//!
//! # Features
//!
//! - **Authentication**: Login and registration with email/password, bearer token storage
//! - **Catalog**: Song listing with pagination, trending, search, single song,
//!   album, artist and playlist song lists
//! - **Favorites**: List, add and remove favorite songs
//! - **Listening history**: Record a play once a track has been listened to
//!
//! # Example
//!
//! ```ignore
//! use pulse_client::{ClientConfig, PulseClient};
//! use pulse_playback::Track;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PulseClient::new(ClientConfig::new("http://localhost:5000"))?;
//!
//!     // Public catalog
//!     let tracks: Vec<Track> = client.trending().await?.into_iter().map(Track::from).collect();
//!     println!("Found {} tracks", tracks.len());
//!
//!     // Login
//!     let login = client.login("ana@example.com", "secret").await?;
//!     println!("Logged in as {}", login.user.name);
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod client;
mod error;
mod favorites;
mod history;
mod types;

// Re-export main types
pub use client::PulseClient;
pub use error::{ClientError, Result};
pub use types::{
    AlbumDetails, AlbumSummary, ApiError, ArtistDetails, ArtistSummary, ClientConfig,
    FavoriteRequest, ListeningHistoryRequest, LoginRequest, LoginResponse, Pagination,
    PlaylistEntry, RegisterRequest, RegisterResponse, SongPage, SongQuery, SongRow, UserInfo,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use catalog::CatalogClient;
pub use favorites::FavoritesClient;
pub use history::HistoryClient;
