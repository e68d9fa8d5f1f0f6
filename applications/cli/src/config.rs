/// Client configuration
use pulse_playback::{PlaybackConfig, RepeatMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File read when no `--config` path is given
pub const DEFAULT_CONFIG_FILE: &str = "pulse-play.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    /// Bearer token from a previous `login`
    #[serde(default)]
    pub token: Option<String>,

    /// Signed-in user id, for `play --favorites`
    #[serde(default)]
    pub user: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub repeat: RepeatMode,

    /// Percent of a track to play before it is recorded
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    #[serde(default = "default_device")]
    pub device: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `pulse-play.toml` in the
    /// working directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`AppConfig::load`], reading `PULSE_*` variables from `env`
    /// instead of the process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (PULSE_SERVER_URL, PULSE_PLAYBACK_VOLUME, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("PULSE")
                .separator("_")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid(
                "Server URL is required (set PULSE_SERVER_URL)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "Server URL must start with http:// or https://, got {url}"
            )));
        }

        self.playback_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Session settings for the player
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.playback.volume,
            shuffle: self.playback.shuffle,
            repeat: self.playback.repeat,
            record_threshold_percent: self.playback.threshold,
            device_tag: self.playback.device.clone(),
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        url: default_url(),
        token: None,
        user: None,
    }
}

fn default_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        volume: default_volume(),
        shuffle: false,
        repeat: RepeatMode::Off,
        threshold: default_threshold(),
        device: default_device(),
    }
}

fn default_volume() -> u8 {
    70
}

fn default_threshold() -> u8 {
    80
}

fn default_device() -> String {
    "web".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            playback: default_playback(),
        }
    }
}
