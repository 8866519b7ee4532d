//! The single active slot: the state machine at the heart of the deck.
//!
//! At most one tape is playing or paused at any moment. Selecting a new
//! tape parks every other materialized transport at its own window start
//! before the new start request is issued, so no two transports are ever
//! running at once, and a parked tape never resumes mid-window.

use std::time::Duration;

use log::debug;

use crate::catalog::Track;

use super::registry::Registry;
use super::transport::{Transport, TransportError, TransportFactory};
use super::types::{DeckEvent, Progress};

pub(super) struct Slot<F: TransportFactory> {
    factory: F,
    registry: Registry<F::Handle>,
    catalog: Vec<Track>,
    active: Option<usize>,
    playing: bool,
}

impl<F: TransportFactory> Slot<F> {
    pub(super) fn new(factory: F) -> Self {
        Self {
            factory,
            registry: Registry::new(),
            catalog: Vec::new(),
            active: None,
            playing: false,
        }
    }

    /// Bind (or re-bind) the catalog.
    ///
    /// Materialized transports are reused by track id, so a re-bind after a
    /// UI re-attach keeps in-flight playback untouched. If the active id is
    /// gone from the new catalog, its tape is parked and the slot cleared.
    pub(super) fn bind(&mut self, catalog: Vec<Track>) {
        let previous = self.active.and_then(|i| self.catalog.get(i).cloned());
        self.catalog = catalog;

        let Some(previous) = previous else { return };
        match self.catalog.iter().position(|t| t.id == previous.id) {
            Some(index) => self.active = Some(index),
            None => {
                if let Some(handle) = self.registry.get_mut(previous.id) {
                    handle.pause();
                    if let Err(err) = handle.set_position(previous.window.start) {
                        debug!("could not rewind tape {}: {err}", previous.id);
                    }
                }
                self.active = None;
                self.playing = false;
            }
        }
    }

    /// The sole entry point for play/pause decisions.
    ///
    /// Out-of-bounds indices (including any index into an empty catalog)
    /// are silently ignored. Toggling the active tape flips play/pause in
    /// place; toggling any other tape takes over the slot.
    pub(super) fn toggle(&mut self, index: usize) -> Option<DeckEvent> {
        if index >= self.catalog.len() {
            return None;
        }

        if self.active == Some(index) {
            return self.toggle_in_place(index);
        }

        let track = self.catalog[index].clone();
        self.park_others(track.id);
        self.active = None;
        self.playing = false;

        match self.start(&track) {
            Ok(()) => {
                self.active = Some(index);
                self.playing = true;
                None
            }
            Err(err) => {
                debug!("start rejected for tape {}: {err}", track.id);
                Some(DeckEvent::StartRejected { index })
            }
        }
    }

    fn toggle_in_place(&mut self, index: usize) -> Option<DeckEvent> {
        let id = self.catalog[index].id;
        let handle = self.registry.get_mut(id)?;

        if self.playing {
            handle.pause();
            self.playing = false;
            return None;
        }

        match handle.play() {
            Ok(()) => {
                self.playing = true;
                None
            }
            Err(err) => {
                debug!("resume rejected for tape {id}: {err}");
                self.active = None;
                self.playing = false;
                Some(DeckEvent::StartRejected { index })
            }
        }
    }

    /// Pause every materialized transport except `keep` and park it at its
    /// own window start. Must complete before a new start is issued.
    fn park_others(&mut self, keep: u32) {
        for (id, handle) in self.registry.iter_mut() {
            if *id == keep {
                continue;
            }
            handle.pause();
            let start = self
                .catalog
                .iter()
                .find(|t| t.id == *id)
                .map(|t| t.window.start)
                .unwrap_or(Duration::ZERO);
            if let Err(err) = handle.set_position(start) {
                debug!("could not rewind tape {id}: {err}");
            }
        }
    }

    fn start(&mut self, track: &Track) -> Result<(), TransportError> {
        let handle = self.registry.open_or_reuse(&mut self.factory, track)?;
        handle.set_position(track.window.start)?;
        handle.play()
    }

    /// Seek the active tape to a fraction of its window. A no-op when
    /// nothing is active or the window span is unknown.
    pub(super) fn seek(&mut self, fraction: f32) {
        let Some(index) = self.active else { return };
        let track = self.catalog[index].clone();
        let Some(window) = window_duration(&track) else {
            return;
        };
        if window.is_zero() {
            return;
        }

        let fraction = fraction.clamp(0.0, 1.0);
        let target = track.window.start + window.mul_f64(f64::from(fraction));
        if let Some(handle) = self.registry.get_mut(track.id) {
            if let Err(err) = handle.set_position(target) {
                debug!("seek on tape {} failed: {err}", track.id);
            }
        }
    }

    /// Advance on a progress tick from the active transport.
    ///
    /// Reaching a configured window end stops the tape, parks it back at
    /// its window start and empties the slot; the file running out does the
    /// same. Ticks while the slot is empty are discarded.
    pub(super) fn on_tick(&mut self) -> Option<DeckEvent> {
        let index = self.active?;
        let track = self.catalog[index].clone();
        let handle = self.registry.get_mut(track.id)?;

        if let Some(end) = track.window.end {
            if handle.position() >= end {
                handle.pause();
                if let Err(err) = handle.set_position(track.window.start) {
                    debug!("could not rewind tape {}: {err}", track.id);
                }
                self.active = None;
                self.playing = false;
                return Some(DeckEvent::WindowEnded { index });
            }
        }

        if self.playing && handle.is_exhausted() {
            handle.pause();
            if let Err(err) = handle.set_position(track.window.start) {
                debug!("could not rewind tape {}: {err}", track.id);
            }
            self.active = None;
            self.playing = false;
            return Some(DeckEvent::TrackEnded { index });
        }

        None
    }

    /// Derive the current progress snapshot.
    pub(super) fn progress(&mut self) -> Progress {
        let Some(index) = self.active else {
            return Progress::default();
        };
        let track = self.catalog[index].clone();
        let window = window_duration(&track).unwrap_or(Duration::ZERO);
        let Some(handle) = self.registry.get_mut(track.id) else {
            return Progress::default();
        };

        let elapsed = handle.position().saturating_sub(track.window.start);
        let fraction = if window.is_zero() {
            0.0
        } else {
            (elapsed.as_secs_f64() / window.as_secs_f64()).clamp(0.0, 1.0) as f32
        };

        Progress {
            active: Some(index),
            playing: self.playing,
            elapsed,
            window,
            fraction,
        }
    }

    pub(super) fn active_handle_mut(&mut self) -> Option<&mut F::Handle> {
        let index = self.active?;
        let id = self.catalog.get(index)?.id;
        self.registry.get_mut(id)
    }
}

/// The playable span of a track: `end - start` when an end is configured,
/// otherwise natural duration minus start (unknown when unprobed).
fn window_duration(track: &Track) -> Option<Duration> {
    match track.window.end {
        Some(end) => Some(end.saturating_sub(track.window.start)),
        None => track
            .duration
            .map(|natural| natural.saturating_sub(track.window.start)),
    }
}
