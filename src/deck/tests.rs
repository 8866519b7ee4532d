use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::catalog::{PlayWindow, Track};

use super::slot::Slot;
use super::transport::{Transport, TransportError, TransportFactory};
use super::types::DeckEvent;

#[derive(Default)]
struct FakeState {
    position: Duration,
    playing: bool,
    exhausted: bool,
    reject_play: bool,
}

struct FakeTransport(Rc<RefCell<FakeState>>);

impl Transport for FakeTransport {
    fn play(&mut self) -> Result<(), TransportError> {
        let mut state = self.0.borrow_mut();
        if state.reject_play {
            return Err(TransportError::Open {
                path: PathBuf::from("fake"),
                source: std::io::Error::other("start refused"),
            });
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().playing = false;
    }

    fn set_position(&mut self, pos: Duration) -> Result<(), TransportError> {
        let mut state = self.0.borrow_mut();
        state.position = pos;
        state.exhausted = false;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.0.borrow().position
    }

    fn is_exhausted(&self) -> bool {
        self.0.borrow().exhausted
    }
}

#[derive(Default)]
struct Shared {
    states: HashMap<u32, Rc<RefCell<FakeState>>>,
    opened: Vec<u32>,
    fail_open: HashSet<u32>,
}

struct FakeFactory(Rc<RefCell<Shared>>);

impl TransportFactory for FakeFactory {
    type Handle = FakeTransport;

    fn open(&mut self, track: &Track) -> Result<FakeTransport, TransportError> {
        let mut shared = self.0.borrow_mut();
        if shared.fail_open.contains(&track.id) {
            return Err(TransportError::Open {
                path: track.source.clone(),
                source: std::io::Error::other("blocked by policy"),
            });
        }
        shared.opened.push(track.id);
        let state = Rc::new(RefCell::new(FakeState::default()));
        shared.states.insert(track.id, state.clone());
        Ok(FakeTransport(state))
    }
}

fn track(id: u32, start: u64, end: Option<u64>) -> Track {
    Track {
        id,
        title: format!("tape {id}"),
        caption: String::new(),
        source: PathBuf::from(format!("{id}.mp3")),
        window: PlayWindow {
            start: Duration::from_secs(start),
            end: end.map(Duration::from_secs),
        },
        duration: Some(Duration::from_secs(300)),
    }
}

fn slot_with(tracks: Vec<Track>) -> (Slot<FakeFactory>, Rc<RefCell<Shared>>) {
    let shared = Rc::new(RefCell::new(Shared::default()));
    let mut slot = Slot::new(FakeFactory(shared.clone()));
    slot.bind(tracks);
    (slot, shared)
}

fn state(shared: &Rc<RefCell<Shared>>, id: u32) -> Rc<RefCell<FakeState>> {
    shared
        .borrow()
        .states
        .get(&id)
        .cloned()
        .expect("transport not materialized")
}

fn playing_count(shared: &Rc<RefCell<Shared>>) -> usize {
    shared
        .borrow()
        .states
        .values()
        .filter(|s| s.borrow().playing)
        .count()
}

#[test]
fn at_most_one_tape_plays_across_any_toggle_sequence() {
    let (mut slot, shared) = slot_with(vec![
        track(1, 0, None),
        track(2, 10, Some(40)),
        track(3, 5, None),
    ]);

    for &index in &[0usize, 1, 2, 1, 0, 2, 2, 0] {
        slot.toggle(index);
        assert!(playing_count(&shared) <= 1, "after toggle({index})");
    }
}

#[test]
fn retoggle_alternates_play_pause_without_resetting_position() {
    let (mut slot, shared) = slot_with(vec![track(1, 0, None)]);

    assert!(slot.toggle(0).is_none());
    let st = state(&shared, 1);
    assert!(st.borrow().playing);

    st.borrow_mut().position = Duration::from_secs(15);

    assert!(slot.toggle(0).is_none());
    assert!(!st.borrow().playing);
    assert_eq!(st.borrow().position, Duration::from_secs(15));

    assert!(slot.toggle(0).is_none());
    assert!(st.borrow().playing);
    assert_eq!(st.borrow().position, Duration::from_secs(15));
}

#[test]
fn window_end_stops_clears_and_rewinds() {
    let (mut slot, shared) = slot_with(vec![track(1, 10, Some(40))]);

    slot.toggle(0);
    let st = state(&shared, 1);
    assert_eq!(st.borrow().position, Duration::from_secs(10));

    st.borrow_mut().position = Duration::from_secs(39);
    assert_eq!(slot.on_tick(), None);

    st.borrow_mut().position = Duration::from_secs(40);
    assert_eq!(slot.on_tick(), Some(DeckEvent::WindowEnded { index: 0 }));

    assert!(!st.borrow().playing);
    assert_eq!(st.borrow().position, Duration::from_secs(10));

    let progress = slot.progress();
    assert_eq!(progress.active, None);
    assert!(!progress.playing);
    assert_eq!(progress.fraction, 0.0);
}

#[test]
fn windowless_tape_runs_to_natural_end() {
    let (mut slot, shared) = slot_with(vec![track(1, 10, None)]);

    slot.toggle(0);
    let st = state(&shared, 1);

    // Well past where any window end could be; no end is configured, so
    // ticks keep reporting progress.
    st.borrow_mut().position = Duration::from_secs(250);
    assert_eq!(slot.on_tick(), None);
    assert_eq!(slot.progress().active, Some(0));

    st.borrow_mut().exhausted = true;
    assert_eq!(slot.on_tick(), Some(DeckEvent::TrackEnded { index: 0 }));
    assert_eq!(st.borrow().position, Duration::from_secs(10));
    assert_eq!(slot.progress().active, None);
}

#[test]
fn seek_maps_fractions_into_the_window() {
    let (mut slot, shared) = slot_with(vec![track(1, 10, Some(30))]);

    slot.toggle(0);
    slot.seek(0.5);

    let st = state(&shared, 1);
    assert_eq!(st.borrow().position, Duration::from_secs(20));

    // A tick reporting the sought position derives the same fraction back.
    let progress = slot.progress();
    assert_eq!(progress.elapsed, Duration::from_secs(10));
    assert_eq!(progress.window, Duration::from_secs(20));
    assert!((progress.fraction - 0.5).abs() < 1e-6);
}

#[test]
fn seek_clamps_out_of_range_fractions() {
    let (mut slot, shared) = slot_with(vec![track(1, 10, Some(30))]);

    slot.toggle(0);
    slot.seek(1.5);
    assert_eq!(state(&shared, 1).borrow().position, Duration::from_secs(30));

    slot.seek(-0.5);
    assert_eq!(state(&shared, 1).borrow().position, Duration::from_secs(10));
}

#[test]
fn seek_without_an_active_tape_is_a_noop() {
    let (mut slot, shared) = slot_with(vec![track(1, 0, None)]);
    slot.seek(0.5);
    assert!(shared.borrow().states.is_empty());
}

#[test]
fn switching_parks_the_previous_tape_at_its_window_start() {
    let (mut slot, shared) = slot_with(vec![track(1, 10, Some(60)), track(2, 0, None)]);

    slot.toggle(0);
    let first = state(&shared, 1);
    first.borrow_mut().position = Duration::from_secs(25);

    slot.toggle(1);
    assert!(!first.borrow().playing);
    assert_eq!(first.borrow().position, Duration::from_secs(10));

    let second = state(&shared, 2);
    assert!(second.borrow().playing);
    assert_eq!(second.borrow().position, Duration::ZERO);
}

#[test]
fn a_tape_paused_mid_window_is_also_parked_on_switch() {
    let (mut slot, shared) = slot_with(vec![track(1, 10, Some(60)), track(2, 0, None)]);

    slot.toggle(0);
    let first = state(&shared, 1);
    first.borrow_mut().position = Duration::from_secs(25);
    slot.toggle(0); // pause mid-window

    slot.toggle(1);
    assert_eq!(first.borrow().position, Duration::from_secs(10));

    // Re-selecting starts from the window start, not mid-window.
    slot.toggle(0);
    assert_eq!(first.borrow().position, Duration::from_secs(10));
    assert!(first.borrow().playing);
}

#[test]
fn empty_catalog_toggle_is_a_noop() {
    let (mut slot, shared) = slot_with(Vec::new());

    assert!(slot.toggle(0).is_none());
    assert!(shared.borrow().opened.is_empty());

    let progress = slot.progress();
    assert_eq!(progress.active, None);
    assert!(!progress.playing);
}

#[test]
fn out_of_bounds_toggle_is_a_noop() {
    let (mut slot, shared) = slot_with(vec![track(1, 0, None)]);
    assert!(slot.toggle(5).is_none());
    assert!(shared.borrow().opened.is_empty());
}

#[test]
fn rejected_start_reports_and_leaves_the_slot_empty() {
    let (mut slot, shared) = slot_with(vec![track(1, 0, None), track(2, 0, None)]);
    shared.borrow_mut().fail_open.insert(2);

    slot.toggle(0);
    assert_eq!(slot.progress().active, Some(0));

    // The previous tape is parked even though the new start fails.
    assert_eq!(
        slot.toggle(1),
        Some(DeckEvent::StartRejected { index: 1 })
    );
    let progress = slot.progress();
    assert_eq!(progress.active, None);
    assert!(!progress.playing);
    assert!(!state(&shared, 1).borrow().playing);

    // No automatic retry: the same toggle is rejected again.
    assert_eq!(
        slot.toggle(1),
        Some(DeckEvent::StartRejected { index: 1 })
    );
}

#[test]
fn rejected_resume_clears_the_slot() {
    let (mut slot, shared) = slot_with(vec![track(1, 0, None)]);

    slot.toggle(0);
    slot.toggle(0); // pause
    state(&shared, 1).borrow_mut().reject_play = true;

    assert_eq!(
        slot.toggle(0),
        Some(DeckEvent::StartRejected { index: 0 })
    );
    assert_eq!(slot.progress().active, None);
}

#[test]
fn rebinding_reuses_materialized_transports_by_id() {
    let tracks = vec![track(1, 0, None), track(2, 10, Some(40))];
    let (mut slot, shared) = slot_with(tracks.clone());

    slot.toggle(1);
    assert_eq!(shared.borrow().opened, vec![2]);

    slot.bind(tracks);
    assert_eq!(shared.borrow().opened, vec![2]);

    // Playback carried straight through the re-bind.
    let progress = slot.progress();
    assert_eq!(progress.active, Some(1));
    assert!(progress.playing);
    assert!(state(&shared, 2).borrow().playing);
}

#[test]
fn rebinding_follows_the_active_id_to_its_new_index() {
    let (mut slot, shared) = slot_with(vec![track(1, 0, None), track(2, 10, Some(40))]);

    slot.toggle(1);
    slot.bind(vec![track(2, 10, Some(40)), track(1, 0, None)]);

    let progress = slot.progress();
    assert_eq!(progress.active, Some(0));
    assert!(state(&shared, 2).borrow().playing);
}

#[test]
fn rebinding_without_the_active_id_parks_it() {
    let (mut slot, shared) = slot_with(vec![track(1, 10, Some(40))]);

    slot.toggle(0);
    let st = state(&shared, 1);
    st.borrow_mut().position = Duration::from_secs(20);

    slot.bind(vec![track(9, 0, None)]);
    assert!(!st.borrow().playing);
    assert_eq!(st.borrow().position, Duration::from_secs(10));
    assert_eq!(slot.progress().active, None);
}

#[test]
fn unknown_window_span_reports_zero_fraction() {
    let mut windowless = track(1, 0, None);
    windowless.duration = None;
    let (mut slot, shared) = slot_with(vec![windowless]);

    slot.toggle(0);
    state(&shared, 1).borrow_mut().position = Duration::from_secs(5);

    let progress = slot.progress();
    assert_eq!(progress.elapsed, Duration::from_secs(5));
    assert_eq!(progress.window, Duration::ZERO);
    assert_eq!(progress.fraction, 0.0);

    // And with no span there is nowhere to map a seek to.
    slot.seek(0.5);
    assert_eq!(state(&shared, 1).borrow().position, Duration::from_secs(5));
}

#[test]
fn ticks_while_the_slot_is_empty_are_discarded() {
    let (mut slot, _shared) = slot_with(vec![track(1, 0, Some(40))]);
    assert_eq!(slot.on_tick(), None);
    assert_eq!(slot.progress().active, None);
}

#[test]
fn window_end_applies_even_while_paused() {
    // Seeking a paused tape to its window end still retires it on the next
    // tick, exactly like a position report during playback would.
    let (mut slot, shared) = slot_with(vec![track(1, 10, Some(40))]);

    slot.toggle(0);
    slot.toggle(0); // pause
    slot.seek(1.0);
    assert_eq!(state(&shared, 1).borrow().position, Duration::from_secs(40));

    assert_eq!(slot.on_tick(), Some(DeckEvent::WindowEnded { index: 0 }));
    assert_eq!(slot.progress().active, None);
}
