//! Authentication methods for the Pulse catalog service.

use crate::client::endpoint;
use crate::error::{ClientError, Result};
use crate::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for the catalog service.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    ///
    /// Returns the token and user on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = endpoint(self.base_url, &["api", "auth", "login"])?;
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let login_response: LoginResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse login response: {}", e))
            })?;

            info!(
                user_id = login_response.user.user_id,
                name = %login_response.user.name,
                "Login successful"
            );

            Ok(login_response)
        } else if status.as_u16() == 401 {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Login failed: invalid credentials");
            Err(ClientError::AuthFailed(
                "Invalid email or password".to_string(),
            ))
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Create a new account.
    ///
    /// An already registered email comes back as [`ClientError::Conflict`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        let url = endpoint(self.base_url, &["api", "auth", "register"])?;
        debug!(url = %url, email = %request.email, "Registering account");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let register_response: RegisterResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse register response: {}", e))
            })?;

            info!(user_id = register_response.user_id, "Account registered");
            Ok(register_response)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
