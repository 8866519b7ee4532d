//! The chill-zone cassette deck: a single-slot audio player.
//!
//! Zero or one tape holds the slot at any time. The deck enforces mutual
//! exclusion across tapes, confines playback to each tape's configured
//! window and publishes derived progress for the UI to render. Transports
//! live in a process-wide registry owned by the engine thread, so playback
//! survives the UI detaching and re-attaching.

mod engine;
mod registry;
mod slot;
mod transport;
mod types;

pub use transport::TransportError;
pub use types::{DeckEvent, Progress, ProgressHandle};

#[cfg(test)]
mod tests;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::catalog::Track;
use crate::settings::AudioSettings;

use types::DeckCmd;

/// Process-wide engine link. The engine thread, its output stream and its
/// transport registry outlive any particular `Deck`.
struct EngineLink {
    tx: Sender<DeckCmd>,
    progress: ProgressHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

static ENGINE: OnceLock<EngineLink> = OnceLock::new();

pub struct Deck {
    tx: Sender<DeckCmd>,
    progress: ProgressHandle,
    events: Receiver<DeckEvent>,
}

impl Deck {
    /// Attach to the process-wide engine and bind `catalog`.
    ///
    /// The first call spawns the engine thread; later calls re-bind the
    /// catalog and subscribe a fresh event channel, reusing materialized
    /// transports by track id — a tape playing across a re-attach keeps
    /// playing. Binding an empty catalog is fine; the deck then simply has
    /// no toggle targets.
    pub fn attach(catalog: Vec<Track>, audio: &AudioSettings) -> Self {
        let link = ENGINE.get_or_init(|| {
            let (tx, rx) = mpsc::channel::<DeckCmd>();
            let progress: ProgressHandle = Arc::new(Mutex::new(Progress::default()));
            let join = engine::spawn_engine(
                rx,
                progress.clone(),
                audio.volume,
                Duration::from_millis(audio.tick_ms),
            );
            EngineLink {
                tx,
                progress,
                join: Mutex::new(Some(join)),
            }
        });

        let (event_tx, event_rx) = mpsc::channel();
        let _ = link.tx.send(DeckCmd::Bind {
            catalog,
            events: event_tx,
        });

        Self {
            tx: link.tx.clone(),
            progress: link.progress.clone(),
            events: event_rx,
        }
    }

    /// Request a play/pause decision for the tape at `index`.
    ///
    /// Fire-and-forget: the outcome arrives later as events and through the
    /// progress snapshot (a refused start shows up as
    /// [`DeckEvent::StartRejected`]).
    pub fn toggle(&self, index: usize) {
        let _ = self.tx.send(DeckCmd::Toggle(index));
    }

    /// Seek the active tape to `fraction` of its window (clamped to [0, 1]).
    pub fn seek(&self, fraction: f32) {
        let _ = self.tx.send(DeckCmd::Seek(fraction));
    }

    /// Snapshot of the current derived progress.
    pub fn progress(&self) -> Progress {
        self.progress
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Drain one pending deck event, if any.
    pub fn poll_event(&self) -> Option<DeckEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the engine for good, fading the active tape out over
    /// `fade_out`. Only meant for process shutdown.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.tx.send(DeckCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(link) = ENGINE.get() {
            if let Ok(mut join) = link.join.lock() {
                if let Some(handle) = join.take() {
                    let _ = handle.join();
                }
            }
        }
    }
}
