//! Catalog Music Player CLI Library
//!
//! This library provides the download-and-playback pipeline behind the
//! `gmplayer` command: it searches a remote music catalog, downloads the
//! selected tracks or albums into a local music directory, tags them and
//! hands the result to an external audio player.
//!
//! # Modules
//!
//! - `catalog` - Remote catalog client and result normalization
//! - `cli` - Command-line interface implementations
//! - `config` - Settings file and environment management
//! - `fetch` - Track downloads, album sequencing and playlists
//! - `location` - Deterministic paths for settings, tracks and playlists
//! - `naming` - Naming template rendering
//! - `player` - External player supervision
//! - `tagging` - Metadata tag writing
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use gmplayer::{config, location::{self, Locations}};
//!
//! let settings = config::load_settings(&location::settings_path(None)).await?;
//! let locations = Locations::new(&settings);
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod location;
pub mod naming;
pub mod player;
pub mod tagging;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the command layer where errors from every part of the pipeline
/// meet. Library modules return their own error enums instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Looking up {}", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Downloaded {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only use it
/// for fatal errors: missing configuration, failed player launch, aborted
/// downloads at the command layer.
///
/// # Example
///
/// ```
/// error!("Go to {} and add your email and password", path.display());
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for problems that do not stop the pipeline, such as a track that
/// could not be tagged.
///
/// # Example
///
/// ```
/// warning!("Cannot tag {}: {}", path.display(), err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
