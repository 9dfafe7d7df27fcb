#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
    thread::{self, ThreadId},
};

use async_trait::async_trait;
use axum::{Router, body::Body, extract::Path as UrlPath, http::StatusCode, routing::get};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use gmplayer::{
    catalog::{Catalog, CatalogError},
    config::Settings,
    fetch::FetchObserver,
    tagging::{TagError, Tagger},
    types::{Album, ResultEntry, Scope, Track},
};

pub const AUDIO_LEN: usize = 48 * 1024;

// Helper function to create a test track
pub fn create_test_track(title: &str, artist: &str, album: &str, number: u32) -> Track {
    Track {
        title: title.to_string(),
        artist: artist.to_string(),
        album_artist: None,
        album: album.to_string(),
        track_number: number,
        stream_id: format!("{}-{}", artist, title).replace([' ', '/'], "_"),
    }
}

pub fn create_test_album(album_id: &str, name: &str, artist: &str, titles: &[&str]) -> Album {
    Album {
        album_id: album_id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        album_artist: artist.to_string(),
        tracks: titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let mut track = create_test_track(title, artist, name, i as u32 + 1);
                track.album_artist = Some(artist.to_string());
                track
            })
            .collect(),
    }
}

pub fn create_test_settings(music_dir: &Path) -> Settings {
    Settings {
        email: "me@example.com".to_string(),
        password: "secret".to_string(),
        musicdirectory: music_dir.display().to_string(),
        tracknaming: "{title} - {artist}".to_string(),
        albumnaming: "{album}".to_string(),
        playlistnaming: "{album}".to_string(),
        apiurl: None,
        player: None,
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Audio host: `/audio/{id}` answers with `AUDIO_LEN` bytes, `/broken/{id}`
/// with a server error.
pub async fn serve_audio() -> String {
    let router = Router::new()
        .route(
            "/audio/{id}",
            get(|UrlPath(_id): UrlPath<String>| async { Body::from(vec![b'x'; AUDIO_LEN]) }),
        )
        .route(
            "/broken/{id}",
            get(|UrlPath(_id): UrlPath<String>| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    serve(router).await
}

/// Audio host that announces `announced` bytes, sends only `sent` of them
/// and then closes the connection.
pub async fn serve_truncated_audio(announced: usize, sent: usize) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nContent-Length: {announced}\r\n\r\n"
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&vec![b'x'; sent]).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}

/// In-memory catalog that hands out stream URLs on a local audio host.
pub struct FakeCatalog {
    pub audio_base: String,
    pub albums: Vec<Album>,
    pub stream_calls: Mutex<Vec<String>>,
    pub album_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new(audio_base: impl Into<String>) -> Self {
        Self {
            audio_base: audio_base.into(),
            albums: Vec::new(),
            stream_calls: Mutex::new(Vec::new()),
            album_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_album(mut self, album: Album) -> Self {
        self.albums.push(album);
        self
    }

    pub fn stream_call_count(&self) -> usize {
        self.stream_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, query: &str, _scope: Scope) -> Result<Vec<ResultEntry>, CatalogError> {
        let entries: Vec<ResultEntry> = self
            .albums
            .iter()
            .filter(|a| a.name.contains(query))
            .cloned()
            .map(ResultEntry::Album)
            .collect();
        if entries.is_empty() {
            return Err(CatalogError::NoResults {
                query: query.to_string(),
            });
        }
        Ok(entries)
    }

    async fn stream_url(&self, stream_id: &str) -> Result<String, CatalogError> {
        self.stream_calls.lock().unwrap().push(stream_id.to_string());

        if stream_id.starts_with("missing") {
            return Err(CatalogError::StreamResolution {
                stream_id: stream_id.to_string(),
                reason: "not streamable".to_string(),
            });
        }
        if stream_id.starts_with("broken") {
            return Ok(format!("{}/broken/{}", self.audio_base, stream_id));
        }
        Ok(format!("{}/audio/{}", self.audio_base, stream_id))
    }

    async fn album_detail(&self, album_id: &str) -> Result<Album, CatalogError> {
        self.album_calls.lock().unwrap().push(album_id.to_string());

        self.albums
            .iter()
            .find(|a| a.album_id == album_id)
            .cloned()
            .ok_or_else(|| CatalogError::AlbumFetch {
                album_id: album_id.to_string(),
                reason: "unknown album".to_string(),
            })
    }
}

/// Tagger that records which files it was asked to tag, how large they were
/// at that moment and which thread did the work.
#[derive(Default)]
pub struct RecordingTagger {
    pub tagged: Mutex<Vec<(PathBuf, u64)>>,
    pub threads: Mutex<Vec<ThreadId>>,
    pub fail: bool,
}

impl RecordingTagger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.tagged.lock().unwrap().len()
    }
}

impl Tagger for RecordingTagger {
    fn tag(&self, path: &Path, _track: &Track) -> Result<(), TagError> {
        let len = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        self.tagged.lock().unwrap().push((path.to_path_buf(), len));
        self.threads.lock().unwrap().push(thread::current().id());
        if self.fail {
            return Err(TagError::NoTag {
                path: path.display().to_string(),
            });
        }
        Ok(())
    }
}

/// Observer that keeps every event as a short string.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl FetchObserver for RecordingObserver {
    fn reused(&self, track: &Track, _path: &Path) {
        self.push(format!("reused {}", track.title));
    }

    fn started(&self, track: &Track, total: Option<u64>) {
        self.push(format!("started {} {:?}", track.title, total));
    }

    fn progressed(&self, _track: &Track, written: u64, _total: Option<u64>) {
        self.push(format!("progress {}", written));
    }

    fn tagging_failed(&self, track: &Track, _error: &TagError) {
        self.push(format!("tag failed {}", track.title));
    }

    fn completed(&self, track: &Track, _path: &Path) {
        self.push(format!("completed {}", track.title));
    }

    fn album_progressed(&self, _album: &Album, completed: usize, total: usize) {
        self.push(format!("album {}/{}", completed, total));
    }
}
