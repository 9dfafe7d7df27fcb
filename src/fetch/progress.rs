use std::{path::Path, sync::Mutex, time::Duration};

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::{
    info, success,
    tagging::TagError,
    types::{Album, Track},
    warning,
};

/// Receives progress events from the fetch pipeline.
///
/// All methods default to doing nothing.
pub trait FetchObserver: Send + Sync {
    fn reused(&self, _track: &Track, _path: &Path) {}
    fn started(&self, _track: &Track, _total: Option<u64>) {}
    fn progressed(&self, _track: &Track, _written: u64, _total: Option<u64>) {}
    fn tagging_failed(&self, _track: &Track, _error: &TagError) {}
    fn completed(&self, _track: &Track, _path: &Path) {}
    fn album_progressed(&self, _album: &Album, _completed: usize, _total: usize) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {}

/// Renders fetch progress on the terminal with indicatif bars.
pub struct ConsoleProgress {
    multi: MultiProgress,
    track_bar: Mutex<Option<ProgressBar>>,
    album_bar: Mutex<Option<ProgressBar>>,
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            track_bar: Mutex::new(None),
            album_bar: Mutex::new(None),
        }
    }

    fn style(template: &str) -> ProgressStyle {
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn take_track_bar(&self) -> Option<ProgressBar> {
        self.track_bar.lock().ok().and_then(|mut bar| bar.take())
    }
}

impl FetchObserver for ConsoleProgress {
    fn reused(&self, track: &Track, path: &Path) {
        self.multi.suspend(|| {
            info!(
                "{} already found in offline storage ({}), using that instead.",
                track.display_name(),
                path.display()
            )
        });
    }

    fn started(&self, track: &Track, total: Option<u64>) {
        let bar = match total {
            Some(total) => ProgressBar::new(total).with_style(Self::style(
                "{spinner:.blue} {msg} [{bar:30.blue/white}] {bytes}/{total_bytes} ({percent}%)",
            )),
            None => ProgressBar::new_spinner().with_style(Self::style("{spinner:.blue} {msg} {bytes}")),
        };
        let bar = self.multi.add(bar);
        bar.set_message(track.display_name());
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.track_bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn progressed(&self, _track: &Track, written: u64, _total: Option<u64>) {
        if let Ok(slot) = self.track_bar.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.set_position(written);
            }
        }
    }

    fn tagging_failed(&self, track: &Track, error: &TagError) {
        self.multi
            .suspend(|| warning!("Cannot tag {}: {}", track.display_name(), error));
    }

    fn completed(&self, track: &Track, path: &Path) {
        if let Some(bar) = self.take_track_bar() {
            bar.finish_and_clear();
        }
        self.multi.suspend(|| {
            success!("Downloaded {} to {}", track.display_name(), path.display())
        });
    }

    fn album_progressed(&self, album: &Album, completed: usize, total: usize) {
        let Ok(mut slot) = self.album_bar.lock() else {
            return;
        };

        let bar = slot.get_or_insert_with(|| {
            let bar = self.multi.insert(
                0,
                ProgressBar::new(total as u64)
                    .with_style(Self::style("{msg} [{bar:30.green/white}] {pos}/{len} tracks")),
            );
            bar.set_message(album.name.clone());
            bar
        });
        bar.set_position(completed as u64);

        if completed >= total {
            bar.finish_and_clear();
            *slot = None;
        }
    }
}
