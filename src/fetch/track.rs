use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use futures::AsyncWriteExt;
use reqwest::Client;

use super::{FetchError, FetchObserver, FetchTrack};
use crate::{
    catalog::Catalog,
    location::Locations,
    tagging::{TagError, Tagger},
    types::Track,
};

/// Downloads single tracks into the music directory.
pub struct TrackFetcher<'a> {
    catalog: &'a dyn Catalog,
    tagger: Arc<dyn Tagger>,
    locations: &'a Locations,
    observer: &'a dyn FetchObserver,
    http: Client,
}

impl<'a> TrackFetcher<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        tagger: Arc<dyn Tagger>,
        locations: &'a Locations,
        observer: &'a dyn FetchObserver,
    ) -> Self {
        Self {
            catalog,
            tagger,
            locations,
            observer,
            http: Client::new(),
        }
    }

    /// Streams `url` into `target`, truncating whatever was there before.
    /// Returns the number of bytes written.
    async fn download(&self, track: &Track, url: &str, target: &Path) -> Result<u64, FetchError> {
        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::Download)?;

        // no content-length means the total stays unknown
        let total = response.content_length();
        self.observer.started(track, total);

        let mut file = async_fs::File::create(target)
            .await
            .map_err(FetchError::io(target))?;
        let mut written: u64 = 0;

        while let Some(chunk) = response.chunk().await.map_err(FetchError::Download)? {
            file.write_all(&chunk).await.map_err(FetchError::io(target))?;
            written += chunk.len() as u64;
            self.observer.progressed(track, written, total);
        }

        file.flush().await.map_err(FetchError::io(target))?;
        file.sync_all().await.map_err(FetchError::io(target))?;
        Ok(written)
    }

    /// Runs the tagger on the blocking pool; lofty reads and rewrites the
    /// whole file synchronously.
    async fn tag(&self, path: &Path, track: &Track) -> Result<(), TagError> {
        let tagger = Arc::clone(&self.tagger);
        let target = path.to_path_buf();
        let track = track.clone();

        tokio::task::spawn_blocking(move || tagger.tag(&target, &track))
            .await
            .unwrap_or_else(|e| {
                Err(TagError::Interrupted {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            })
    }
}

#[async_trait]
impl FetchTrack for TrackFetcher<'_> {
    /// Returns the local path of `track`, downloading and tagging it first
    /// unless a file already exists at its deterministic path.
    async fn fetch(&self, track: &Track) -> Result<PathBuf, FetchError> {
        let path = self.locations.track_path(track);
        if async_fs::metadata(&path).await.is_ok() {
            // cached files were tagged when they were downloaded
            self.observer.reused(track, &path);
            return Ok(path);
        }

        let url = self.catalog.stream_url(&track.stream_id).await?;

        let directory = self.locations.track_directory(track);
        async_fs::create_dir_all(&directory)
            .await
            .map_err(FetchError::io(&directory))?;

        let partial = self.locations.partial_path(track);
        if let Err(e) = self.download(track, &url, &partial).await {
            let _ = async_fs::remove_file(&partial).await;
            return Err(e);
        }

        if let Err(e) = self.tag(&partial, track).await {
            self.observer.tagging_failed(track, &e);
        }

        async_fs::rename(&partial, &path)
            .await
            .map_err(FetchError::io(&path))?;

        self.observer.completed(track, &path);
        Ok(path)
    }
}
