/// Subcommand handlers
use anyhow::{bail, Context};
use pulse_client::{ClientError, PulseClient, SongQuery, SongRow};
use pulse_playback::{PlaybackConfig, PlaybackEvent, PlaybackSnapshot, RecordStatus, Track, TrackId};
use crate::controls::{self, Control, HELP};
use pulse_player::{ClientRecorder, Player, PlayerCommand};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

pub async fn trending(client: &PulseClient) -> anyhow::Result<()> {
    let songs = client.trending().await.context("Failed to fetch trending songs")?;
    print_songs(&songs);
    Ok(())
}

pub async fn search(client: &PulseClient, query: &str) -> anyhow::Result<()> {
    let songs = client
        .search(query)
        .await
        .with_context(|| format!("Search for {query:?} failed"))?;

    if songs.is_empty() {
        println!("No songs match {query:?}");
    } else {
        print_songs(&songs);
    }
    Ok(())
}

pub async fn songs(client: &PulseClient, query: &SongQuery) -> anyhow::Result<()> {
    let page = client.songs(query).await.context("Failed to fetch songs")?;
    print_songs(&page.songs);
    println!(
        "Page {}/{} ({} songs)",
        page.pagination.page, page.pagination.pages, page.pagination.total
    );
    Ok(())
}

pub async fn login(client: &PulseClient, email: &str, password: &str) -> anyhow::Result<()> {
    let response = client.login(email, password).await?;
    info!(user_id = response.user.user_id, "Signed in as {}", response.user.name);

    println!("{}", response.token);
    eprintln!(
        "Store it as PULSE_SERVER_TOKEN (and PULSE_SERVER_USER={}) or under [server] in pulse-play.toml",
        response.user.user_id
    );
    Ok(())
}

pub async fn like(client: &PulseClient, song_id: i64) -> anyhow::Result<()> {
    match client.add_favorite(TrackId(song_id)).await {
        Ok(()) => println!("Added {song_id} to favorites"),
        Err(ClientError::AlreadyFavorite(_)) => println!("{song_id} is already a favorite"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub async fn unlike(client: &PulseClient, song_id: i64) -> anyhow::Result<()> {
    client.remove_favorite(TrackId(song_id)).await?;
    println!("Removed {song_id} from favorites");
    Ok(())
}

/// Where `play` takes its queue from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Trending,
    Search(String),
    Album(i64),
    Artist(i64),
    Playlist(i64),
    Favorites,
}

async fn load_queue(client: &PulseClient, source: &Source) -> anyhow::Result<Vec<SongRow>> {
    let rows = match source {
        Source::Trending => client.trending().await?,
        Source::Search(query) => client.search(query).await?,
        Source::Album(id) => client.album(*id).await?,
        Source::Artist(id) => client.artist(*id).await?,
        Source::Playlist(id) => client.playlist(*id).await?,
        Source::Favorites => {
            let user_id = client
                .user_id()
                .await
                .context("Favorites need a user id (set PULSE_SERVER_USER)")?;
            client.favorites(user_id).await?
        }
    };
    Ok(rows)
}

/// Queue a song list and play it until the queue ends, `q` or Ctrl-C
///
/// Lines typed on stdin are dispatched as player commands (see [`HELP`]).
pub async fn play(
    client: PulseClient,
    playback: PlaybackConfig,
    source: Source,
) -> anyhow::Result<()> {
    let rows = load_queue(&client, &source)
        .await
        .with_context(|| format!("Failed to load {source:?}"))?;
    let tracks: Vec<Track> = rows.into_iter().map(Track::from).collect();
    let Some(first) = tracks.first().cloned() else {
        bail!("Nothing to play");
    };

    if !client.is_authenticated().await {
        warn!("Not signed in; plays will not be recorded");
    }

    let player = Player::spawn(playback, Arc::new(ClientRecorder::new(client)))?;
    let mut events = player.subscribe();
    let mut state = player.watch();
    let mut input = controls::spawn_reader();
    let mut input_open = true;

    info!(tracks = tracks.len(), "Queued {source:?}; type ? for controls");
    player.play(first, tracks).await?;

    let mut last_status = None;
    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted");
                break;
            }
            event = events.recv() => match event {
                Ok(PlaybackEvent::QueueEnded) | Err(RecvError::Closed) => break,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Event stream lagged"),
            },
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = state.borrow_and_update().clone();
                report(&snapshot, &mut last_status);
            }
            line = input.recv(), if input_open => match line {
                Some(line) => match controls::parse(&line) {
                    Some(Control::Command(command)) => player.send(command).await?,
                    Some(Control::SeekPercent(fraction)) => {
                        if let Some(track) = player.snapshot().current_track {
                            let target = (f64::from(track.duration_secs) * fraction).floor() as u32;
                            player.send(PlayerCommand::Seek(target)).await?;
                        }
                    }
                    Some(Control::Status) => print_status(&player.snapshot()),
                    Some(Control::Help) => println!("{HELP}"),
                    Some(Control::Quit) => break,
                    None => println!("Unknown control {line:?}; type ? for help"),
                },
                None => {
                    debug!("Input closed; controls disabled");
                    input_open = false;
                }
            },
        }
    }

    player.shutdown().await?;
    Ok(())
}

fn print_status(snapshot: &PlaybackSnapshot) {
    let Some(track) = &snapshot.current_track else {
        println!("Nothing playing");
        return;
    };

    println!(
        "{} {} - {}  {} / {}  [{}/{}] shuffle:{} repeat:{} volume:{}{}",
        if snapshot.is_playing { ">" } else { "||" },
        track.artist,
        track.title,
        format_duration(snapshot.elapsed_secs),
        format_duration(track.duration_secs),
        snapshot.queue_index + 1,
        snapshot.queue.len(),
        if snapshot.shuffle { "on" } else { "off" },
        snapshot.repeat,
        snapshot.volume,
        if snapshot.muted { " (muted)" } else { "" }
    );
}

fn report(snapshot: &PlaybackSnapshot, last_status: &mut Option<RecordStatus>) {
    let Some(track) = &snapshot.current_track else {
        return;
    };

    debug!(
        track_id = %track.id,
        elapsed = snapshot.elapsed_secs,
        progress = %format!("{:.0}%", snapshot.progress_percent()),
        playing = snapshot.is_playing,
        "{} / {}",
        format_duration(snapshot.elapsed_secs),
        format_duration(track.duration_secs)
    );

    if snapshot.record_status != *last_status {
        match snapshot.record_status {
            Some(RecordStatus::Acknowledged) => info!(track_id = %track.id, "Play recorded"),
            Some(RecordStatus::Failed) => warn!(track_id = %track.id, "Play not recorded"),
            Some(RecordStatus::Pending) | None => {}
        }
        *last_status = snapshot.record_status;
    }
}

fn print_songs(songs: &[SongRow]) {
    for song in songs {
        println!(
            "{:>6}  {:<40} {:<24} {:>6}",
            song.song_id,
            song.title,
            song.artist_name,
            format_duration(song.duration)
        );
    }
}

fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(214), "3:34");
        assert_eq!(format_duration(3600), "60:00");
    }
}
