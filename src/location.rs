//! Deterministic filesystem locations.
//!
//! Every path the pipeline touches is derived from the settings and the
//! metadata of a track or album. The same track always maps to the same file,
//! which makes [`Locations::track_path`] the cache key of the download
//! pipeline.

use std::path::{Path, PathBuf};

use crate::{
    config::Settings,
    naming,
    types::{Album, Track},
};

pub const SETTINGS_FILE: &str = ".gmplayerrc";
pub const TRACK_EXTENSION: &str = "mp3";
pub const PARTIAL_SUFFIX: &str = ".part";
pub const PLAYLIST_EXTENSION: &str = "m3u";

/// Path of the settings dotfile in the user's home directory, unless an
/// explicit location (from `GMPLAYER_SETTINGS`) is given.
pub fn settings_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| home_dir().join(SETTINGS_FILE))
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

#[derive(Debug, Clone)]
pub struct Locations {
    music_root: PathBuf,
    track_naming: String,
    album_naming: String,
    playlist_naming: String,
}

impl Locations {
    pub fn new(settings: &Settings) -> Self {
        // playlists list absolute paths, so the root must be absolute too
        let root = expand_home(&settings.musicdirectory);
        let music_root = std::path::absolute(&root).unwrap_or(root);

        Self {
            music_root,
            track_naming: settings.tracknaming.clone(),
            album_naming: settings.albumnaming.clone(),
            playlist_naming: settings.playlistnaming.clone(),
        }
    }

    pub fn music_root(&self) -> &Path {
        &self.music_root
    }

    pub fn album_directory(&self, album: &Album) -> PathBuf {
        self.music_root
            .join(naming::render(&self.album_naming, &album.naming_fields()))
    }

    /// Directory of a single track. The album template is used on purpose so
    /// that tracks of the same album share one directory.
    pub fn track_directory(&self, track: &Track) -> PathBuf {
        self.music_root
            .join(naming::render(&self.album_naming, &track.naming_fields()))
    }

    pub fn track_filename(&self, track: &Track) -> String {
        format!(
            "{}.{}",
            naming::render(&self.track_naming, &track.naming_fields()),
            TRACK_EXTENSION
        )
    }

    pub fn track_path(&self, track: &Track) -> PathBuf {
        self.track_directory(track).join(self.track_filename(track))
    }

    /// Download target while the stream is still being received.
    pub fn partial_path(&self, track: &Track) -> PathBuf {
        self.track_directory(track)
            .join(format!("{}{}", self.track_filename(track), PARTIAL_SUFFIX))
    }

    pub fn playlist_path(&self, album: &Album) -> PathBuf {
        self.album_directory(album).join(format!(
            "{}.{}",
            naming::render(&self.playlist_naming, &album.naming_fields()),
            PLAYLIST_EXTENSION
        ))
    }
}
