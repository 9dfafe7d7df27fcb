use std::sync::Arc;

use super::{Options, finish, lookup};
use crate::{
    config::Settings,
    error,
    fetch::{AlbumOrchestrator, ConsoleProgress, TrackFetcher},
    info,
    location::Locations,
    success,
    tagging::LoftyTagger,
    types::{ResultEntry, ResultKind},
};

pub async fn album(settings: &Settings, query: &str, options: Options) {
    let (catalog, entries) =
        match lookup::lookup(settings, query, ResultKind::Album, options.scope).await {
            Ok(found) => found,
            Err(e) => error!("{}", e),
        };

    let album = match lookup::choose(entries, "What album do you want to play? #").await {
        Ok(ResultEntry::Album(album)) => album,
        Ok(_) => error!("The selected entry is not an album"),
        Err(e) => error!("No album selected: {}", e),
    };

    info!("Fetching {} by {}", album.name, album.artist);

    let locations = Locations::new(settings);
    let progress = ConsoleProgress::new();
    let fetcher = TrackFetcher::new(&catalog, Arc::new(LoftyTagger), &locations, &progress);
    let orchestrator = AlbumOrchestrator::new(&catalog, &fetcher, &locations, &progress);

    let playlist = match orchestrator.fetch_album(&album).await {
        Ok(path) => path,
        Err(e) => error!("Cannot download {}: {}", album.name, e),
    };

    success!("Album {} is ready", album.name);
    finish(settings, &playlist, true, options).await;
}
