//! Small shared types of the deck: the derived progress snapshot, the
//! engine command set and the events surfaced to the UI.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::Track;

/// Derived playback state for whatever currently occupies the slot.
///
/// `elapsed` counts from the active tape's window start; `window` is the
/// playable span and `fraction` is `elapsed / window` clamped to `[0, 1]`,
/// or `0.0` whenever nothing is active or the window span is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub active: Option<usize>,
    pub playing: bool,
    pub elapsed: Duration,
    pub window: Duration,
    pub fraction: f32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            active: None,
            playing: false,
            elapsed: Duration::ZERO,
            window: Duration::ZERO,
            fraction: 0.0,
        }
    }
}

pub type ProgressHandle = Arc<Mutex<Progress>>;

#[derive(Debug)]
pub enum DeckCmd {
    /// Bind (or re-bind) the catalog and subscribe a fresh event channel.
    Bind {
        catalog: Vec<Track>,
        events: Sender<DeckEvent>,
    },
    /// Play/pause decision for the tape at the given catalog index.
    Toggle(usize),
    /// Seek the active tape to a fraction of its window.
    Seek(f32),
    /// Stop the engine, fading the active tape out over `fade_out_ms`.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    /// Fresh derived state; sent on every progress tick and transition.
    Progress(Progress),
    /// The configured window end was reached; the slot is empty again.
    WindowEnded { index: usize },
    /// The file ran out before any window end; the slot is empty again.
    TrackEnded { index: usize },
    /// The start request was refused; the slot is empty and no retry is
    /// scheduled — the user has to toggle again.
    StartRejected { index: usize },
}
