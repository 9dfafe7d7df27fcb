use std::sync::Arc;

use super::{Options, finish, lookup};
use crate::{
    config::Settings,
    error,
    fetch::{ConsoleProgress, FetchTrack, TrackFetcher},
    location::Locations,
    tagging::LoftyTagger,
    types::{ResultEntry, ResultKind},
};

pub async fn song(settings: &Settings, query: &str, options: Options) {
    let (catalog, entries) =
        match lookup::lookup(settings, query, ResultKind::Track, options.scope).await {
            Ok(found) => found,
            Err(e) => error!("{}", e),
        };

    let track = match lookup::choose(entries, "What song do you want to play? #").await {
        Ok(ResultEntry::Track(track)) => track,
        Ok(_) => error!("The selected entry is not a song"),
        Err(e) => error!("No song selected: {}", e),
    };

    let locations = Locations::new(settings);
    let progress = ConsoleProgress::new();
    let fetcher = TrackFetcher::new(&catalog, Arc::new(LoftyTagger), &locations, &progress);

    let path = match fetcher.fetch(&track).await {
        Ok(path) => path,
        Err(e) => error!("Cannot download {}: {}", track.display_name(), e),
    };

    finish(settings, &path, false, options).await;
}
