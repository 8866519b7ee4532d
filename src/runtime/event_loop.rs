use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Stage};
use crate::catalog::Track;
use crate::deck::{Deck, DeckEvent, Progress};
use crate::document::Document;
use crate::settings::Settings;
use crate::ui;

/// Main terminal event loop: drains deck events, redraws and handles
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    document: &Document,
    catalog: &[Track],
    deck: &Deck,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.dismiss_expired_intro();

        while let Some(deck_event) = deck.poll_event() {
            match deck_event {
                DeckEvent::StartRejected { index } => {
                    let title = catalog
                        .get(index)
                        .map(|t| t.title.as_str())
                        .unwrap_or("that tape");
                    app.set_notice(format!("{title} would not start; press enter to try again"));
                }
                DeckEvent::WindowEnded { index } | DeckEvent::TrackEnded { index } => {
                    debug!("tape at index {index} finished");
                }
                DeckEvent::Progress(_) => {}
            }
        }

        let progress = deck.progress();
        terminal.draw(|f| ui::draw(f, app, document, catalog, &progress, &settings.audio))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(key, settings, catalog, deck, app, &progress) {
                    break;
                }
            }
        }
    }

    deck.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    Ok(())
}

/// Handle one keypress. Returns `true` when the app should quit.
fn handle_key(
    key: KeyEvent,
    settings: &Settings,
    catalog: &[Track],
    deck: &Deck,
    app: &mut App,
    progress: &Progress,
) -> bool {
    if app.intro_active() {
        // Any key skips the splash.
        app.skip_intro();
        return false;
    }

    if key.code == KeyCode::Char('q') {
        return true;
    }

    match app.stage {
        Stage::Landing => {
            if key.code == KeyCode::Enter {
                app.advance();
            }
        }
        Stage::Letter => match key.code {
            KeyCode::Enter if !app.envelope_open => app.open_envelope(),
            KeyCode::Char('o') => app.open_envelope(),
            KeyCode::Enter | KeyCode::Char('n') => app.advance(),
            _ => {}
        },
        Stage::ChillZone => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.select_next_track(catalog.len()),
            KeyCode::Char('k') | KeyCode::Up => app.select_prev_track(catalog.len()),
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.clear_notice();
                deck.toggle(app.selected_track);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                scrub(deck, progress, -(settings.audio.seek_seconds as f64));
            }
            KeyCode::Char('l') | KeyCode::Right => {
                scrub(deck, progress, settings.audio.seek_seconds as f64);
            }
            KeyCode::Char('n') => app.advance(),
            _ => {}
        },
        Stage::Cards => match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                app.flip_card(c as usize - '1' as usize);
            }
            KeyCode::Char('n') => app.advance(),
            _ => {}
        },
        Stage::FinalLetter => match key.code {
            KeyCode::Char('s') => app.seal(),
            KeyCode::Char('r') => app.restart(),
            _ => {}
        },
    }

    false
}

/// Map a ±seconds scrub onto the deck's fraction-based seek.
fn scrub(deck: &Deck, progress: &Progress, seconds: f64) {
    if progress.active.is_none() || progress.window.is_zero() {
        return;
    }
    let window = progress.window.as_secs_f64();
    let target = (progress.elapsed.as_secs_f64() + seconds).clamp(0.0, window);
    deck.seek((target / window) as f32);
}
