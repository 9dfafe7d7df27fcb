use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::naming::NamingFields;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album_artist: Option<String>,
    pub album: String,
    pub track_number: u32,
    pub stream_id: String,
}

impl Track {
    /// Fields available to naming templates. Every value is a string so the
    /// rendered names never depend on JSON number formatting.
    pub fn naming_fields(&self) -> NamingFields {
        let mut fields = NamingFields::new();
        fields.insert("title".into(), Value::from(self.title.as_str()));
        fields.insert("artist".into(), Value::from(self.artist.as_str()));
        fields.insert("album".into(), Value::from(self.album.as_str()));
        fields.insert("trackNumber".into(), Value::from(self.track_number.to_string()));
        fields.insert("streamId".into(), Value::from(self.stream_id.as_str()));
        if let Some(album_artist) = &self.album_artist {
            fields.insert("albumArtist".into(), Value::from(album_artist.as_str()));
        }
        fields
    }

    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub album_id: String,
    pub name: String,
    pub artist: String,
    pub album_artist: String,
    /// Empty for search summaries, filled by an album detail fetch.
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn naming_fields(&self) -> NamingFields {
        let mut fields = NamingFields::new();
        fields.insert("albumId".into(), Value::from(self.album_id.as_str()));
        fields.insert("name".into(), Value::from(self.name.as_str()));
        fields.insert("album".into(), Value::from(self.name.as_str()));
        fields.insert("artist".into(), Value::from(self.artist.as_str()));
        fields.insert("albumArtist".into(), Value::from(self.album_artist.as_str()));
        fields
    }
}

/// A single search hit, normalized from either listing shape the catalog
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEntry {
    Track(Track),
    Album(Album),
}

impl ResultEntry {
    pub fn kind(&self) -> ResultKind {
        match self {
            ResultEntry::Track(_) => ResultKind::Track,
            ResultEntry::Album(_) => ResultKind::Album,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Track,
    Album,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultKind::Track => write!(f, "song"),
            ResultKind::Album => write!(f, "album"),
        }
    }
}

/// Where a search is resolved: the whole catalog or the user's own library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Catalog,
    Library,
}

/// Keeps the entries of one kind, preserving catalog order.
pub fn filter_by_kind(entries: Vec<ResultEntry>, kind: ResultKind) -> Vec<ResultEntry> {
    entries.into_iter().filter(|e| e.kind() == kind).collect()
}

#[derive(Tabled)]
pub struct ResultTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl ResultTableRow {
    pub fn from_entry(index: usize, entry: &ResultEntry) -> Self {
        match entry {
            ResultEntry::Track(t) => Self {
                index,
                title: t.title.clone(),
                artist: t.artist.clone(),
                album: t.album.clone(),
            },
            ResultEntry::Album(a) => Self {
                index,
                title: a.name.clone(),
                artist: a.artist.clone(),
                album: a.name.clone(),
            },
        }
    }
}
