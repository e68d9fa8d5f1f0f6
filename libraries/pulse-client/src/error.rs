//! Error types for the Pulse catalog client.

use crate::types::ApiError;
use pulse_playback::TrackId;
use reqwest::Response;
use thiserror::Error;

/// Errors that can occur when interacting with the catalog service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available (or rejected as missing)
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials or token)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid service URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Song is already in the user's favorites
    #[error("Song {0} is already a favorite")]
    AlreadyFavorite(TrackId),

    /// Service is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// Map a transport failure, separating "service down" from other errors.
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }

    /// Map a non-success response by status code.
    ///
    /// The message is the body's `error` field when it has one, else the raw body.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        match status {
            401 => ClientError::AuthRequired,
            403 => ClientError::AuthFailed(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            _ => ClientError::ServerError { status, message },
        }
    }

    /// Whether the error means the stored token is missing or no longer valid.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::AuthRequired | ClientError::AuthFailed(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
