//! # Catalog Integration Module
//!
//! This module is the boundary to the remote music catalog. Everything past
//! it works with the crate's own [`Track`], [`Album`] and [`ResultEntry`]
//! types; the different JSON shapes of the catalog search and the library
//! listing never leak further than [`dto`].
//!
//! ```text
//! CLI / Fetch pipeline
//!          ↓
//! Catalog trait
//!     ├── search (catalog or library scope)
//!     ├── stream URL resolution
//!     └── album detail
//!          ↓
//! HttpCatalog (reqwest, JSON)
//! ```
//!
//! The [`Catalog`] trait exists so the fetch pipeline can be exercised against
//! an in-memory catalog in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Album, ResultEntry, Scope};

pub mod client;
pub mod dto;
pub mod library;

pub use client::HttpCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("the catalog rejected your credentials")]
    Auth,
    #[error("invalid catalog URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("no results found for \"{query}\"")]
    NoResults { query: String },
    #[error("cannot resolve a stream for track {stream_id}: {reason}")]
    StreamResolution { stream_id: String, reason: String },
    #[error("cannot fetch album {album_id}: {reason}")]
    AlbumFetch { album_id: String, reason: String },
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Searches the catalog, or the user's library, for `query`.
    ///
    /// The result keeps the order of the service and mixes tracks and
    /// albums. An empty result is reported as [`CatalogError::NoResults`].
    async fn search(&self, query: &str, scope: Scope) -> Result<Vec<ResultEntry>, CatalogError>;

    /// Resolves a short-lived download URL for a track.
    async fn stream_url(&self, stream_id: &str) -> Result<String, CatalogError>;

    /// Fetches an album with its full, ordered track listing.
    async fn album_detail(&self, album_id: &str) -> Result<Album, CatalogError>;
}
