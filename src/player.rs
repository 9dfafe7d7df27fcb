//! External player supervision.
//!
//! Playback is handed to an `mplayer`-compatible binary. The terminal's
//! standard input is passed straight through so the player's keyboard
//! controls keep working. Its output is held back until the first status
//! line (`A: ...`) shows up, which hides the banner and codec chatter, and
//! is relayed to the terminal from then on.
//!
//! [`play`] is a one-shot: once the player exits, so does this process.

use std::{
    ffi::OsString,
    io,
    path::Path,
    process::{ExitStatus, Stdio},
};

use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    process::Command,
};

use crate::{error, info};

pub const STATUS_PREFIX: &[u8] = b"A:";

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("cannot start {player}: {source}")]
    Spawn { player: String, source: io::Error },
    #[error("player output is not available")]
    NoOutput,
    #[error("player failed: {0}")]
    Io(#[from] io::Error),
}

/// Audio output driver passed with `-ao` for the given OS.
pub fn audio_backend(os: &str) -> Option<&'static str> {
    match os {
        "linux" => Some("alsa"),
        "macos" => Some("coreaudio"),
        _ => None,
    }
}

pub fn player_args(path: &Path, is_playlist: bool, os: &str) -> Vec<OsString> {
    let mut args = Vec::new();
    if let Some(backend) = audio_backend(os) {
        args.push(OsString::from("-ao"));
        args.push(OsString::from(backend));
    }
    if is_playlist {
        args.push(OsString::from("-playlist"));
    }
    args.push(path.as_os_str().to_owned());
    args
}

/// True when a chunk of player output contains a playback status line.
pub fn is_playback_status(chunk: &[u8]) -> bool {
    chunk
        .split(|b| *b == b'\r' || *b == b'\n')
        .any(|line| line.starts_with(STATUS_PREFIX))
}

/// Copies player output to `writer`, starting with the first chunk that
/// carries a status line. Returns whether playback output was ever seen.
pub async fn relay_output<R, W>(reader: &mut R, writer: &mut W) -> io::Result<bool>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = [0u8; 4096];
    let mut relaying = false;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        let chunk = &buf[..n];
        if !relaying && is_playback_status(chunk) {
            relaying = true;
        }
        if relaying {
            writer.write_all(chunk).await?;
            writer.flush().await?;
        }
    }

    Ok(relaying)
}

/// Runs the player on `path` until it exits.
pub async fn run(player: &str, path: &Path, is_playlist: bool) -> Result<ExitStatus, PlaybackError> {
    let mut child = Command::new(player)
        .args(player_args(path, is_playlist, std::env::consts::OS))
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| PlaybackError::Spawn {
            player: player.to_string(),
            source,
        })?;

    let mut output = child.stdout.take().ok_or(PlaybackError::NoOutput)?;
    relay_output(&mut output, &mut tokio::io::stdout()).await?;

    Ok(child.wait().await?)
}

/// Plays `path` and terminates the process when playback ends. Never
/// returns.
pub async fn play(player: &str, path: &Path, is_playlist: bool) {
    info!("Playing {}\n", path.display());

    match run(player, path, is_playlist).await {
        Ok(status) if status.success() => std::process::exit(0),
        Ok(status) => error!("{} exited with {}", player, status),
        Err(e) => error!(
            "There was an error playing your song, maybe you need to install {}? ({})",
            player,
            e
        ),
    }
}
