//! The playback transport seam.
//!
//! [`Slot`](super::slot::Slot) drives everything through the [`Transport`]
//! trait so the slot machine is testable without an audio device; the
//! rodio-backed implementation lives below it.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

use crate::catalog::Track;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Mutable transport state of one materialized tape.
pub(super) trait Transport {
    /// Start or resume playback. A refusal leaves the transport paused.
    fn play(&mut self) -> Result<(), TransportError>;
    fn pause(&mut self);
    /// Move to an absolute position in the file, keeping play/pause state.
    fn set_position(&mut self, pos: Duration) -> Result<(), TransportError>;
    /// The transport's current absolute position in the file.
    fn position(&self) -> Duration;
    /// Whether the underlying source has run out of audio.
    fn is_exhausted(&self) -> bool;
}

/// Materializes transports; one factory per engine.
pub(super) trait TransportFactory {
    type Handle: Transport;
    fn open(&mut self, track: &Track) -> Result<Self::Handle, TransportError>;
}

pub(super) struct RodioFactory {
    stream: Arc<OutputStream>,
    volume: f32,
}

impl RodioFactory {
    pub(super) fn new(stream: Arc<OutputStream>, volume: f32) -> Self {
        Self { stream, volume }
    }
}

impl TransportFactory for RodioFactory {
    type Handle = RodioTransport;

    fn open(&mut self, track: &Track) -> Result<RodioTransport, TransportError> {
        let sink = build_sink(&self.stream, &track.source, self.volume, Duration::ZERO)?;
        Ok(RodioTransport {
            stream: self.stream.clone(),
            path: track.source.clone(),
            volume: self.volume,
            sink,
            accumulated: Duration::ZERO,
            started_at: None,
        })
    }
}

/// Create a paused `Sink` for the file at `path` that would start playback
/// at `start_at`.
fn build_sink(
    stream: &OutputStream,
    path: &Path,
    volume: f32,
    start_at: Duration,
) -> Result<Sink, TransportError> {
    let file = File::open(path).map_err(|source| TransportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| TransportError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.set_volume(volume);
    sink.pause();
    Ok(sink)
}

/// Rodio-backed transport. Position is tracked wall-clock style: time
/// accumulated while running plus the instant the current run started,
/// reset whenever the sink is rebuilt at a new offset.
pub(super) struct RodioTransport {
    stream: Arc<OutputStream>,
    path: PathBuf,
    volume: f32,
    sink: Sink,
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl RodioTransport {
    /// Fade the sink to silence over `fade_out_ms` and stop it.
    pub(super) fn fade_out(&mut self, fade_out_ms: u64) {
        if fade_out_ms == 0 || self.sink.empty() {
            self.sink.stop();
            return;
        }
        let steps: u64 = 20;
        let step = Duration::from_millis((fade_out_ms / steps).max(1));
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.sink.set_volume(self.volume * (1.0 - t));
            thread::sleep(step);
        }
        self.sink.stop();
    }
}

impl Transport for RodioTransport {
    fn play(&mut self) -> Result<(), TransportError> {
        if self.sink.empty() {
            // An exhausted sink cannot resume; rebuild at the tracked position.
            self.sink = build_sink(&self.stream, &self.path, self.volume, self.accumulated)?;
        }
        self.sink.play();
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
        if let Some(started) = self.started_at.take() {
            self.accumulated += started.elapsed();
        }
    }

    fn set_position(&mut self, pos: Duration) -> Result<(), TransportError> {
        let resume = self.started_at.is_some();

        // Build the replacement first so a failure leaves state untouched.
        let sink = build_sink(&self.stream, &self.path, self.volume, pos)?;
        self.sink.stop();
        self.sink = sink;
        self.accumulated = pos;
        self.started_at = None;
        if resume {
            self.sink.play();
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn position(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |started| started.elapsed())
    }

    fn is_exhausted(&self) -> bool {
        self.sink.empty()
    }
}
