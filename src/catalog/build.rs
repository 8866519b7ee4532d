use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use log::debug;
use thiserror::Error;

use crate::document::{Document, TrackRecord};

use super::model::{PlayWindow, Track};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("track {id}: endTime ({end}s) must be greater than startTime ({start}s)")]
    InvalidWindow { id: u32, start: f64, end: f64 },
}

/// Build the ordered catalog from the document's chill-zone records.
///
/// An empty record list yields an empty catalog, which is valid — the deck
/// simply has no toggle targets.
pub fn build(document: &Document, assets_root: &Path) -> Result<Vec<Track>, CatalogError> {
    document
        .chill_zone
        .tracks
        .iter()
        .map(|record| from_record(record, assets_root))
        .collect()
}

fn from_record(record: &TrackRecord, assets_root: &Path) -> Result<Track, CatalogError> {
    let start = record.start_time.unwrap_or(0.0).max(0.0);
    if let Some(end) = record.end_time {
        if end <= start {
            return Err(CatalogError::InvalidWindow {
                id: record.id,
                start,
                end,
            });
        }
    }

    let source = resolve_source(&record.music_path, assets_root);
    let duration = probe_duration(&source);

    Ok(Track {
        id: record.id,
        title: record.title.clone(),
        caption: record.caption.clone(),
        source,
        window: PlayWindow {
            start: Duration::from_secs_f64(start),
            end: record.end_time.map(Duration::from_secs_f64),
        },
        duration,
    })
}

/// Resolve a document locator to a path under the assets root. Locators are
/// site-absolute in the document ("/music/a.mp3"); the leading slash means
/// "from the root", not the filesystem root.
fn resolve_source(locator: &str, assets_root: &Path) -> PathBuf {
    assets_root.join(locator.trim_start_matches('/'))
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()),
        Err(err) => {
            debug!("could not probe duration of {}: {err}", path.display());
            None
        }
    }
}
