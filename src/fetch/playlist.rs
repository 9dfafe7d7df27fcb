use std::path::{Path, PathBuf};

use super::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub path: PathBuf,
    pub title: String,
}

/// Ordered list of tracks, serialized as an extended M3U playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistDocument {
    entries: Vec<PlaylistEntry>,
}

impl PlaylistDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: PathBuf, title: impl Into<String>) {
        self.entries.push(PlaylistEntry {
            path,
            title: title.into(),
        });
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Durations are not known up front, so every entry uses `-1`. Line
    /// breaks in titles become spaces to keep each entry on two lines.
    pub fn to_m3u(&self) -> String {
        let mut out = String::from("#EXTM3U\n");
        for entry in &self.entries {
            let title = entry.title.replace(['\r', '\n'], " ");
            out.push_str(&format!("#EXTINF:-1,{title}\n"));
            out.push_str(&format!("{}\n", entry.path.display()));
        }
        out
    }

    pub async fn write(&self, path: &Path) -> Result<(), FetchError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(FetchError::io(parent))?;
        }
        async_fs::write(path, self.to_m3u())
            .await
            .map_err(FetchError::io(path))
    }
}
