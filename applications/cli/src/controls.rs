/// Keyboard controls read from stdin during `play`
use pulse_player::PlayerCommand;
use std::io::BufRead;
use tokio::sync::mpsc;

pub const HELP: &str = "\
Controls (type and press Enter):
  <Enter>, space   play/pause
  n, next          next track
  p, prev          previous track
  s, shuffle       toggle shuffle
  r, repeat        cycle repeat (off, all, one)
  m, mute          toggle mute
  vol N            set volume (0-100)
  seek N           seek to N seconds (or N%)
  j N, jump N      play queue entry N (from 1)
  c, clear         clear the queue and stop
  i, status        show what is playing
  q, quit          stop and exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Command(PlayerCommand),
    /// Seek to a fraction (0.0-1.0) of the current track
    SeekPercent(f64),
    Status,
    Help,
    Quit,
}

/// Forward stdin lines from a dedicated thread
///
/// The channel closes at end of input. The thread is detached and never
/// holds up runtime shutdown.
pub fn spawn_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Parse one line of input; `None` for anything unrecognised
pub fn parse(line: &str) -> Option<Control> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        // Bare Enter (or a space) toggles playback
        return Some(Control::Command(PlayerCommand::TogglePlay));
    };
    let arg = words.next();
    if words.next().is_some() {
        return None;
    }

    let control = match (word.to_ascii_lowercase().as_str(), arg) {
        ("space" | "pause" | "play", None) => Control::Command(PlayerCommand::TogglePlay),
        ("n" | "next", None) => Control::Command(PlayerCommand::Next),
        ("p" | "prev" | "previous", None) => Control::Command(PlayerCommand::Previous),
        ("s" | "shuffle", None) => Control::Command(PlayerCommand::ToggleShuffle),
        ("r" | "repeat", None) => Control::Command(PlayerCommand::ToggleRepeat),
        ("m" | "mute", None) => Control::Command(PlayerCommand::ToggleMute),
        ("c" | "clear", None) => Control::Command(PlayerCommand::Clear),
        ("v" | "vol" | "volume", Some(level)) => {
            let level: u8 = level.parse().ok()?;
            if level > 100 {
                return None;
            }
            Control::Command(PlayerCommand::SetVolume(level))
        }
        ("seek", Some(target)) => match target.strip_suffix('%') {
            Some(percent) => {
                let percent: f64 = percent.parse().ok()?;
                if !(0.0..=100.0).contains(&percent) {
                    return None;
                }
                Control::SeekPercent(percent / 100.0)
            }
            None => Control::Command(PlayerCommand::Seek(target.parse().ok()?)),
        },
        ("j" | "jump", Some(position)) => {
            let position: usize = position.parse().ok()?;
            Control::Command(PlayerCommand::JumpTo(position.checked_sub(1)?))
        }
        ("i" | "status", None) => Control::Status,
        ("h" | "help" | "?", None) => Control::Help,
        ("q" | "quit" | "exit", None) => Control::Quit,
        _ => return None,
    };
    Some(control)
}
