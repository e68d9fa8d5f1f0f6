//! Pulse Play - Player Runtime
//!
//! Runs a [`pulse_playback::PlaybackSession`] on tokio:
//! - a single task owns the session; callers dispatch [`PlayerCommand`]s
//! - a one-second [`Ticker`] drives progress while playing
//! - play records go out through a [`PlayRecorder`] without blocking playback
//!
//! # Example
//!
//! ```ignore
//! use pulse_client::{ClientConfig, PulseClient};
//! use pulse_playback::{PlaybackConfig, Track};
//! use pulse_player::{ClientRecorder, Player};
//! use std::sync::Arc;
//!
//! let client = PulseClient::new(ClientConfig::with_token("http://localhost:5000", token))?;
//! let tracks: Vec<Track> = client.trending().await?.into_iter().map(Track::from).collect();
//!
//! let player = Player::spawn(PlaybackConfig::default(), Arc::new(ClientRecorder::new(client)))?;
//! player.play(tracks[0].clone(), tracks.clone()).await?;
//!
//! let mut state = player.watch();
//! while state.changed().await.is_ok() {
//!     println!("{}s", state.borrow().elapsed_secs);
//! }
//! ```

mod command;
mod error;
mod player;
mod recorder;
mod ticker;

pub use command::PlayerCommand;
pub use error::{PlayerError, Result};
pub use player::{Player, SHUTDOWN_GRACE};
pub use recorder::{ClientRecorder, Delivery, NoopRecorder, PlayRecorder};
pub use ticker::{Ticker, TICK_PERIOD};
