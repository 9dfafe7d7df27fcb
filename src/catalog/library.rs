//! Local matching over the user's library listing.
//!
//! The library endpoint returns every owned track without any server-side
//! filtering, so the query is matched here: a track matches when its title,
//! album or artist contains the query, ignoring case.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use super::dto::{LIBRARY_KIND_TRACK, TrackDto};
use crate::types::ResultEntry;

fn query_matcher(query: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(query.trim()))
        .case_insensitive(true)
        .build()
}

pub fn item_matches(matcher: &Regex, item: &TrackDto) -> bool {
    [&item.title, &item.album, &item.artist]
        .into_iter()
        .any(|field| matcher.is_match(field))
}

/// Builds result entries for the library items matching `query`.
///
/// Every matching track becomes a track entry. Every distinct album among
/// the matches also becomes an album entry, in order of first appearance,
/// so an album search works against the library as well.
pub fn search_library(items: Vec<TrackDto>, query: &str) -> Vec<ResultEntry> {
    let matcher = match query_matcher(query) {
        Ok(m) => m,
        Err(_) => return Vec::new(),
    };

    let mut seen_albums = HashSet::new();
    let mut tracks = Vec::new();
    let mut albums = Vec::new();

    for item in items {
        if item.kind.as_deref().is_some_and(|k| k != LIBRARY_KIND_TRACK) {
            continue;
        }
        if !item_matches(&matcher, &item) {
            continue;
        }

        if let Some(album) = item.album_summary() {
            if seen_albums.insert(album.album_id.clone()) {
                albums.push(ResultEntry::Album(album));
            }
        }
        if let Some(track) = item.into_track() {
            tracks.push(ResultEntry::Track(track));
        }
    }

    tracks.extend(albums);
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, artist: &str, album: &str, album_id: &str) -> TrackDto {
        TrackDto {
            kind: Some(LIBRARY_KIND_TRACK.to_string()),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            album_id: Some(album_id.to_string()),
            id: Some(format!("{}-id", title)),
            ..Default::default()
        }
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let items = vec![
            item("Thunderstruck", "AC/DC", "The Razors Edge", "A1"),
            item("Hells Bells", "AC/DC", "Back in Black", "A2"),
            item("Yellow", "Coldplay", "Parachutes", "A3"),
        ];

        let entries = search_library(items, "ac/dc");
        let tracks = entries.iter().filter(|e| matches!(e, ResultEntry::Track(_))).count();
        let albums = entries.iter().filter(|e| matches!(e, ResultEntry::Album(_))).count();
        assert_eq!(tracks, 2);
        assert_eq!(albums, 2);
    }

    #[test]
    fn query_is_not_a_pattern() {
        let items = vec![item("Song (Live)", "Band", "LP", "A1"), item("Song", "Band", "LP", "A1")];
        let entries = search_library(items, "(live)");
        assert_eq!(entries.len(), 2); // one track, one album
    }

    #[test]
    fn albums_are_deduplicated() {
        let items = vec![item("One", "Band", "LP", "A1"), item("Two", "Band", "LP", "A1")];
        let entries = search_library(items, "band");
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[2], ResultEntry::Album(_)));
    }
}
