/// Pulse Play - command-line client for the Pulse catalog service
mod commands;
mod config;
mod controls;

use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::Source;
use crate::config::AppConfig;
use pulse_client::{ClientConfig, PulseClient};
use pulse_playback::RepeatMode;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pulse-play")]
#[command(about = "Browse the Pulse catalog and play through a queue", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./pulse-play.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List trending songs
    Trending,
    /// Search songs by title or artist
    Search {
        /// Search text
        query: String,
    },
    /// Browse the song listing
    Songs {
        /// Page number (starting at 1)
        #[arg(long)]
        page: Option<u32>,
        /// Songs per page
        #[arg(long)]
        limit: Option<u32>,
        /// Only songs of this genre
        #[arg(long)]
        genre: Option<String>,
    },
    /// Sign in and print a bearer token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Add a song to your favorites
    Like {
        song_id: i64,
    },
    /// Remove a song from your favorites
    Unlike {
        song_id: i64,
    },
    /// Play a song list until the queue ends (trending songs by default)
    Play {
        #[command(flatten)]
        source: QueueSource,
        /// Shuffle the queue
        #[arg(long)]
        shuffle: bool,
        /// Repeat mode
        #[arg(long, value_enum)]
        repeat: Option<RepeatArg>,
        /// Starting volume (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        volume: Option<u8>,
    },
}

/// Queue source for `play`; at most one may be given
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct QueueSource {
    /// Queue search results
    #[arg(short, long)]
    search: Option<String>,
    /// Queue an album's songs
    #[arg(long, value_name = "ALBUM_ID")]
    album: Option<i64>,
    /// Queue an artist's songs
    #[arg(long, value_name = "ARTIST_ID")]
    artist: Option<i64>,
    /// Queue a playlist
    #[arg(long, value_name = "PLAYLIST_ID")]
    playlist: Option<i64>,
    /// Queue your favorites (needs a token and user id)
    #[arg(long)]
    favorites: bool,
}

impl From<QueueSource> for Source {
    fn from(args: QueueSource) -> Self {
        if let Some(query) = args.search {
            Source::Search(query)
        } else if let Some(id) = args.album {
            Source::Album(id)
        } else if let Some(id) = args.artist {
            Source::Artist(id)
        } else if let Some(id) = args.playlist {
            Source::Playlist(id)
        } else if args.favorites {
            Source::Favorites
        } else {
            Source::Trending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RepeatArg {
    Off,
    All,
    One,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::Off => RepeatMode::Off,
            RepeatArg::All => RepeatMode::All,
            RepeatArg::One => RepeatMode::One,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pulse_play=info,pulse_player=info,pulse_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Trending => {
            let client = connect(&config)?;
            commands::trending(&client).await?;
        }
        Commands::Search { query } => {
            let client = connect(&config)?;
            commands::search(&client, &query).await?;
        }
        Commands::Songs { page, limit, genre } => {
            let client = connect(&config)?;
            let query = pulse_client::SongQuery { page, limit, genre };
            commands::songs(&client, &query).await?;
        }
        Commands::Login { email, password } => {
            let client = connect(&config)?;
            commands::login(&client, &email, &password).await?;
        }
        Commands::Like { song_id } => {
            let client = connect(&config)?;
            commands::like(&client, song_id).await?;
        }
        Commands::Unlike { song_id } => {
            let client = connect(&config)?;
            commands::unlike(&client, song_id).await?;
        }
        Commands::Play {
            source,
            shuffle,
            repeat,
            volume,
        } => {
            if shuffle {
                config.playback.shuffle = true;
            }
            if let Some(repeat) = repeat {
                config.playback.repeat = repeat.into();
            }
            if let Some(volume) = volume {
                config.playback.volume = volume;
            }

            let client = connect(&config)?;
            commands::play(client, config.playback_config(), source.into()).await?;
        }
    }

    Ok(())
}

fn connect(config: &AppConfig) -> anyhow::Result<PulseClient> {
    let mut client_config = match &config.server.token {
        Some(token) => ClientConfig::with_token(&config.server.url, token),
        None => ClientConfig::new(&config.server.url),
    };
    client_config.user_id = config.server.user;
    Ok(PulseClient::new(client_config)?)
}
