use serde::{Deserialize, Serialize};

use crate::types::{Album, ResultEntry, Track};

/// Search entry type tags used by the catalog search endpoint.
pub const ENTRY_TYPE_TRACK: &str = "1";
pub const ENTRY_TYPE_ALBUM: &str = "3";

/// Kind tag of owned tracks in the library listing.
pub const LIBRARY_KIND_TRACK: &str = "sj#track";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub entries: Vec<SearchEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub track: Option<TrackDto>,
    #[serde(default)]
    pub album: Option<AlbumDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryResponse {
    #[serde(default)]
    pub items: Vec<TrackDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDto {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub album_artist: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub nid: Option<String>,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDto {
    pub album_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album_artist: Option<String>,
    #[serde(default)]
    pub tracks: Vec<TrackDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamUrlResponse {
    pub url: String,
}

impl TrackDto {
    /// Id used to resolve the stream. Catalog tracks carry `nid`, library
    /// uploads only have a `storeId` or a plain `id`.
    pub fn stream_id(&self) -> Option<&str> {
        self.nid
            .as_deref()
            .or(self.store_id.as_deref())
            .or(self.id.as_deref())
    }

    /// Converts into a [`Track`]; entries without any stream id cannot be
    /// downloaded and are dropped.
    pub fn into_track(self) -> Option<Track> {
        let stream_id = self.stream_id()?.to_string();
        Some(Track {
            title: self.title,
            artist: self.artist,
            album_artist: self.album_artist,
            album: self.album,
            track_number: self.track_number.unwrap_or(0),
            stream_id,
        })
    }

    /// Album summary of a library track, used to offer albums from the
    /// user's own library.
    pub fn album_summary(&self) -> Option<Album> {
        let album_id = self.album_id.clone()?;
        let album_artist = self
            .album_artist
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.artist.clone());
        Some(Album {
            album_id,
            name: self.album.clone(),
            artist: album_artist.clone(),
            album_artist,
            tracks: Vec::new(),
        })
    }
}

impl AlbumDto {
    /// Converts an album detail response. The album artist is copied onto
    /// every track, and tracks missing an album name inherit it.
    pub fn into_album(self) -> Album {
        let album_artist = self
            .album_artist
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.artist.clone());
        let name = self.name;
        let tracks = self
            .tracks
            .into_iter()
            .filter_map(TrackDto::into_track)
            .map(|mut track| {
                track.album_artist = Some(album_artist.clone());
                if track.album.is_empty() {
                    track.album = name.clone();
                }
                track
            })
            .collect();

        Album {
            album_id: self.album_id,
            name,
            artist: self.artist,
            album_artist,
            tracks,
        }
    }
}

/// Normalizes catalog search entries into [`ResultEntry`] values, keeping the
/// service order. Unknown entry types (artists, stations, ...) are skipped.
pub fn normalize_search(response: SearchResponse) -> Vec<ResultEntry> {
    response
        .entries
        .into_iter()
        .filter_map(|entry| match entry.entry_type.as_str() {
            ENTRY_TYPE_TRACK => entry
                .track
                .and_then(TrackDto::into_track)
                .map(ResultEntry::Track),
            ENTRY_TYPE_ALBUM => entry
                .album
                .map(|album| ResultEntry::Album(album.into_album())),
            _ => None,
        })
        .collect()
}
