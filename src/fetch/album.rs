use std::path::PathBuf;

use super::{FetchError, FetchObserver, FetchTrack, PlaylistDocument};
use crate::{catalog::Catalog, location::Locations, types::Album};

/// Downloads whole albums and writes their playlist.
pub struct AlbumOrchestrator<'a> {
    catalog: &'a dyn Catalog,
    fetcher: &'a dyn FetchTrack,
    locations: &'a Locations,
    observer: &'a dyn FetchObserver,
}

impl<'a> AlbumOrchestrator<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        fetcher: &'a dyn FetchTrack,
        locations: &'a Locations,
        observer: &'a dyn FetchObserver,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            locations,
            observer,
        }
    }

    /// Fetches every track of `album` and returns the path of the written
    /// playlist.
    ///
    /// Tracks are fetched one after another in album order; the next fetch
    /// only starts once the previous one has settled. Each track is added to
    /// the playlist before its fetch starts, so the playlist follows album
    /// order no matter how long single downloads take. The first failing
    /// track aborts the album and no playlist is written.
    pub async fn fetch_album(&self, album: &Album) -> Result<PathBuf, FetchError> {
        let album = self.catalog.album_detail(&album.album_id).await?;
        let total = album.tracks.len();

        let mut playlist = PlaylistDocument::new();
        let mut completed = 0;
        self.observer.album_progressed(&album, completed, total);

        for track in &album.tracks {
            playlist.push(self.locations.track_path(track), track.display_name());
            self.fetcher.fetch(track).await?;

            completed += 1;
            self.observer.album_progressed(&album, completed, total);
        }

        let path = self.locations.playlist_path(&album);
        playlist.write(&path).await?;
        Ok(path)
    }
}
