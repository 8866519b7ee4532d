//! The app model: which page is showing and the little bits of state each
//! page flips (envelope, cards, seal). Playback state lives in the deck,
//! not here.

use std::time::{Duration, Instant};

/// The five pages of the experience, stepped through linearly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Landing,
    Letter,
    ChillZone,
    Cards,
    FinalLetter,
}

impl Stage {
    pub fn next(self) -> Self {
        match self {
            Self::Landing => Self::Letter,
            Self::Letter => Self::ChillZone,
            Self::ChillZone => Self::Cards,
            Self::Cards => Self::FinalLetter,
            Self::FinalLetter => Self::FinalLetter,
        }
    }
}

/// The main application model.
pub struct App {
    pub stage: Stage,
    /// Deadline after which the intro splash dismisses itself; `None` once
    /// it has been dismissed (or when intros are disabled).
    pub intro_until: Option<Instant>,
    intro_length: Option<Duration>,

    pub envelope_open: bool,
    pub selected_track: usize,
    pub flipped: Vec<bool>,
    pub sealed: bool,
    /// Transient status line (e.g. after a refused playback start).
    pub notice: Option<String>,
}

impl App {
    /// Create a fresh model. `intro_length` of `None` disables the intro
    /// splash; `card_count` sizes the flip state for the cards page.
    pub fn new(intro_length: Option<Duration>, card_count: usize) -> Self {
        Self {
            stage: Stage::Landing,
            intro_until: intro_length.map(|d| Instant::now() + d),
            intro_length,
            envelope_open: false,
            selected_track: 0,
            flipped: vec![false; card_count],
            sealed: false,
            notice: None,
        }
    }

    /// Whether the intro splash is still showing.
    pub fn intro_active(&self) -> bool {
        self.intro_until.is_some_and(|until| Instant::now() < until)
    }

    /// Drop the intro deadline once it has passed.
    pub fn dismiss_expired_intro(&mut self) {
        if let Some(until) = self.intro_until {
            if Instant::now() >= until {
                self.intro_until = None;
            }
        }
    }

    /// Dismiss the intro early (any keypress skips it).
    pub fn skip_intro(&mut self) {
        self.intro_until = None;
    }

    /// Move to the next page. The final letter is the last page; advancing
    /// from it stays put.
    pub fn advance(&mut self) {
        self.stage = self.stage.next();
        self.notice = None;
    }

    pub fn open_envelope(&mut self) {
        self.envelope_open = true;
    }

    /// Move the track cursor down, wrapping around.
    pub fn select_next_track(&mut self, track_count: usize) {
        if track_count > 0 {
            self.selected_track = (self.selected_track + 1) % track_count;
        }
    }

    /// Move the track cursor up, wrapping around.
    pub fn select_prev_track(&mut self, track_count: usize) {
        if track_count > 0 {
            self.selected_track = (self.selected_track + track_count - 1) % track_count;
        }
    }

    /// Flip the card at `index` over (or back). Out-of-range indices are
    /// ignored.
    pub fn flip_card(&mut self, index: usize) {
        if let Some(card) = self.flipped.get_mut(index) {
            *card = !*card;
        }
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Back to the landing page with everything reset, replaying the intro.
    pub fn restart(&mut self) {
        *self = Self::new(self.intro_length, self.flipped.len());
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
