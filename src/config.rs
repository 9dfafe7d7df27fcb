//! Configuration management for gmplayer.
//!
//! Settings live in a JSON dotfile in the user's home directory
//! (`~/.gmplayerrc`). The file is created with placeholder credentials on the
//! first run, and the program refuses to continue until the user has put a
//! real email address in it.
//!
//! A few values can additionally be overridden from the environment, which is
//! populated from a `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. The settings file, then built-in defaults

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLACEHOLDER_EMAIL: &str = "add_your_email_here";
pub const PLACEHOLDER_PASSWORD: &str = "add_your_password_here";

pub const DEFAULT_MUSIC_DIRECTORY: &str = "~/Music/gmplayer";
pub const DEFAULT_TRACK_NAMING: &str = "{title} - {artist}";
pub const DEFAULT_ALBUM_NAMING: &str = "{album}";
pub const DEFAULT_PLAYLIST_NAMING: &str = "{album}";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8484/api";
pub const DEFAULT_PLAYER: &str = "mplayer";

pub const ENV_SETTINGS: &str = "GMPLAYER_SETTINGS";
pub const ENV_API_URL: &str = "GMPLAYER_API_URL";
pub const ENV_PLAYER: &str = "GMPLAYER_PLAYER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Created {}. Add your email and password there, then run again.", path.display())]
    Created { path: PathBuf },
    #[error("Go to {} and add your email and password.", path.display())]
    Placeholder { path: PathBuf },
    #[error("cannot access settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub email: String,
    pub password: String,
    #[serde(default = "default_music_directory")]
    pub musicdirectory: String,
    #[serde(default = "default_track_naming")]
    pub tracknaming: String,
    #[serde(default = "default_album_naming")]
    pub albumnaming: String,
    #[serde(default = "default_playlist_naming")]
    pub playlistnaming: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apiurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

fn default_music_directory() -> String {
    DEFAULT_MUSIC_DIRECTORY.to_string()
}

fn default_track_naming() -> String {
    DEFAULT_TRACK_NAMING.to_string()
}

fn default_album_naming() -> String {
    DEFAULT_ALBUM_NAMING.to_string()
}

fn default_playlist_naming() -> String {
    DEFAULT_PLAYLIST_NAMING.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            email: PLACEHOLDER_EMAIL.to_string(),
            password: PLACEHOLDER_PASSWORD.to_string(),
            musicdirectory: default_music_directory(),
            tracknaming: default_track_naming(),
            albumnaming: default_album_naming(),
            playlistnaming: default_playlist_naming(),
            apiurl: None,
            player: None,
        }
    }
}

impl Settings {
    /// Applies environment overrides for the catalog URL and the player.
    /// Called once while loading; afterwards the value is the only source.
    pub fn with_overrides(mut self, api_url: Option<String>, player: Option<String>) -> Self {
        if let Some(api_url) = api_url.filter(|v| !v.is_empty()) {
            self.apiurl = Some(api_url);
        }
        if let Some(player) = player.filter(|v| !v.is_empty()) {
            self.player = Some(player);
        }
        self
    }

    /// Catalog base URL without a trailing slash.
    pub fn api_url(&self) -> String {
        self.apiurl
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Name or path of the external player binary.
    pub fn player(&self) -> String {
        self.player
            .clone()
            .unwrap_or_else(|| DEFAULT_PLAYER.to_string())
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives in `<data_local_dir>/gmplayer/.env`, e.g.
/// `~/.local/share/gmplayer/.env` on Linux. A missing file is not an error;
/// the directory is created so the user has a place to put one.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("gmplayer/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(_) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Reads the settings file at `path` and applies the `GMPLAYER_API_URL` and
/// `GMPLAYER_PLAYER` overrides.
///
/// When the file does not exist it is written with placeholder credentials
/// and [`ConfigError::Created`] is returned. A file still holding the
/// placeholder email yields [`ConfigError::Placeholder`]. Both are meant to
/// end the process with guidance for the user.
pub async fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path_exists(path).await {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&Settings::default())?;
        async_fs::write(path, json).await?;
        return Err(ConfigError::Created {
            path: path.to_path_buf(),
        });
    }

    let content = async_fs::read_to_string(path).await?;
    let settings: Settings = serde_json::from_str(&content)?;
    if settings.email == PLACEHOLDER_EMAIL {
        return Err(ConfigError::Placeholder {
            path: path.to_path_buf(),
        });
    }

    Ok(settings.with_overrides(env::var(ENV_API_URL).ok(), env::var(ENV_PLAYER).ok()))
}

async fn path_exists(path: &Path) -> bool {
    async_fs::metadata(path).await.is_ok()
}
