//! # Fetch Pipeline
//!
//! Turns catalog tracks and albums into local files.
//!
//! ```text
//! AlbumOrchestrator ── album detail ──▶ Catalog
//!        │
//!        │  one track at a time, in album order
//!        ▼
//!   TrackFetcher ── cache hit? ──▶ return existing path
//!        │
//!        ├── stream URL ──▶ Catalog
//!        ├── streaming GET ──▶ <name>.mp3.part
//!        ├── tags ──▶ Tagger
//!        └── rename ──▶ <name>.mp3
//! ```
//!
//! A file at a track's final path is always complete: downloads go to a
//! temporary sibling and are only renamed into place once the stream has
//! ended. That makes existence of the final file a reliable cache hit.
//!
//! Nothing in here runs concurrently. The album loop awaits each track
//! before starting the next one, so the playlist order and the progress
//! counter need no synchronization.

use std::{io, path::PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::{catalog::CatalogError, types::Track};

mod album;
mod playlist;
mod progress;
mod track;

pub use album::AlbumOrchestrator;
pub use playlist::{PlaylistDocument, PlaylistEntry};
pub use progress::{ConsoleProgress, FetchObserver, NoopObserver};
pub use track::TrackFetcher;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("download failed: {0}")]
    Download(reqwest::Error),
    #[error("cannot write {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> FetchError {
        let path = path.into();
        move |source| FetchError::Io { path, source }
    }
}

/// Anything that can turn a track into a local file.
#[async_trait]
pub trait FetchTrack: Send + Sync {
    async fn fetch(&self, track: &Track) -> Result<PathBuf, FetchError>;
}
