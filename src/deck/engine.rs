//! The deck engine thread.
//!
//! One engine per process: it owns the audio output stream, the transport
//! registry and the slot state, consumes commands from a channel and treats
//! the receive timeout as the progress tick.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::info;
use rodio::OutputStreamBuilder;

use super::slot::Slot;
use super::transport::RodioFactory;
use super::types::{DeckCmd, DeckEvent, ProgressHandle};

pub(super) fn spawn_engine(
    rx: Receiver<DeckCmd>,
    progress: ProgressHandle,
    volume: f32,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        let stream = Arc::new(stream);

        let mut slot = Slot::new(RodioFactory::new(stream, volume));
        let mut events: Option<Sender<DeckEvent>> = None;

        loop {
            match rx.recv_timeout(tick) {
                Ok(DeckCmd::Bind {
                    catalog,
                    events: tx,
                }) => {
                    info!("binding catalog with {} tapes", catalog.len());
                    slot.bind(catalog);
                    events = Some(tx);
                    publish(&mut slot, &progress, &events, None);
                }
                Ok(DeckCmd::Toggle(index)) => {
                    let event = slot.toggle(index);
                    publish(&mut slot, &progress, &events, event);
                }
                Ok(DeckCmd::Seek(fraction)) => {
                    slot.seek(fraction);
                    publish(&mut slot, &progress, &events, None);
                }
                Ok(DeckCmd::Quit { fade_out_ms }) => {
                    if let Some(handle) = slot.active_handle_mut() {
                        handle.fade_out(fade_out_ms);
                    }
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let event = slot.on_tick();
                    publish(&mut slot, &progress, &events, event);
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn publish(
    slot: &mut Slot<RodioFactory>,
    progress: &ProgressHandle,
    events: &Option<Sender<DeckEvent>>,
    event: Option<DeckEvent>,
) {
    let snapshot = slot.progress();
    let idle = snapshot.active.is_none() && event.is_none();

    if let Ok(mut shared) = progress.lock() {
        *shared = snapshot.clone();
    }

    let Some(tx) = events else { return };
    if let Some(event) = event {
        let _ = tx.send(event);
    }
    // Idle timeouts are not ticks; nothing to report.
    if !idle {
        let _ = tx.send(DeckEvent::Progress(snapshot));
    }
}
