//! # CLI Module
//!
//! This module implements the user-facing commands of gmplayer. Each command
//! runs the same pipeline:
//!
//! ```text
//! login + search (Catalog)
//!     ↓
//! result table + selection prompt
//!     ↓
//! TrackFetcher / AlbumOrchestrator
//!     ↓
//! player (unless --downloadonly)
//! ```
//!
//! Commands print through the crate's console macros and end the process on
//! fatal errors. They never return to `main` once playback has started.
//!
//! ## Commands
//!
//! - [`song`] - Search for a song, download it and play it
//! - [`album`] - Search for an album, download all of its tracks into a
//!   playlist and play it

mod album;
mod lookup;
mod song;

pub use album::album;
pub use song::song;

use std::path::Path;

use crate::{config::Settings, player, success, types::Scope};

/// Options shared by all commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub scope: Scope,
    pub download_only: bool,
}

/// Ends a command: either reports the downloaded file and exits, or hands it
/// to the player, which exits the process when playback is over.
async fn finish(settings: &Settings, path: &Path, is_playlist: bool, options: Options) {
    if options.download_only {
        success!("Saved {}", path.display());
        std::process::exit(0);
    }

    player::play(&settings.player(), path, is_playlist).await;
}
