//! Metadata tag writing for downloaded tracks.
//!
//! Tagging is best effort: the fetch pipeline reports a [`TagError`] as a
//! warning and keeps the downloaded file either way.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use thiserror::Error;

use crate::types::Track;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot tag {path}: {source}")]
    Lofty {
        path: String,
        source: lofty::error::LoftyError,
    },
    #[error("{path} has no writable tag")]
    NoTag { path: String },
    #[error("tagging {path} did not finish: {reason}")]
    Interrupted { path: String, reason: String },
}

pub trait Tagger: Send + Sync {
    /// Writes title, artist, album, album artist and track number of `track`
    /// into the audio file at `path`.
    fn tag(&self, path: &Path, track: &Track) -> Result<(), TagError>;
}

/// Writes tags with lofty. The format is sniffed from the file content, so
/// the file does not need an audio extension yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagger;

impl Tagger for LoftyTagger {
    fn tag(&self, path: &Path, track: &Track) -> Result<(), TagError> {
        let display = path.display().to_string();
        let lofty_err = |source| TagError::Lofty {
            path: display.clone(),
            source,
        };

        let mut tagged_file = Probe::open(path)
            .map_err(lofty_err)?
            .guess_file_type()
            .map_err(|source| TagError::Io {
                path: display.clone(),
                source,
            })?
            .read()
            .map_err(lofty_err)?;

        let tag_type = tagged_file.primary_tag_type();
        if tagged_file.tag(tag_type).is_none() {
            tagged_file.insert_tag(Tag::new(tag_type));
        }
        let Some(tag) = tagged_file.tag_mut(tag_type) else {
            return Err(TagError::NoTag {
                path: display.clone(),
            });
        };

        tag.set_title(track.title.clone());
        tag.set_artist(track.artist.clone());
        tag.set_album(track.album.clone());
        if track.track_number > 0 {
            tag.set_track(track.track_number);
        }
        if let Some(album_artist) = &track.album_artist {
            tag.insert_text(ItemKey::AlbumArtist, album_artist.clone());
        }

        tag.save_to_path(path, WriteOptions::default())
            .map_err(lofty_err)
    }
}
