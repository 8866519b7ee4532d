//! Runtime wiring: terminal setup/teardown, startup plumbing and the main
//! event loop.

use std::path::Path;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::catalog;
use crate::deck::Deck;
use crate::document;

mod event_loop;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = startup::load_settings();
    startup::init_logging(&settings.log);

    let document = match document::load(Path::new(&settings.document.path)) {
        Ok(document) => document,
        Err(err) => {
            // No document, no experience: show the blocking screen and leave.
            return startup::run_unavailable_screen(&err);
        }
    };

    let assets_root = Path::new(&settings.document.assets_root);
    let tracks = catalog::build(document, assets_root)?;
    let deck = Deck::attach(tracks.clone(), &settings.audio);

    let intro = settings
        .ui
        .intro
        .then(|| Duration::from_millis(settings.ui.intro_ms));
    let mut app = App::new(intro, document.cards.cards.len());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        event_loop::run(&mut terminal, &settings, document, &tracks, &deck, &mut app)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
