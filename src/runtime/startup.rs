use std::fs::File;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::LevelFilter;
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::WriteLogger;

use crate::document::DocumentError;
use crate::settings::{LogSettings, Settings};
use crate::ui;

pub fn load_settings() -> Settings {
    match Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("billet: invalid config, using defaults: {msg}");
                Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("billet: failed to load config, using defaults: {e}");
            Settings::default()
        }
    }
}

/// Set up file logging. The terminal belongs to the TUI, so logs go to a
/// file; an empty path disables logging.
pub fn init_logging(log: &LogSettings) {
    if log.path.is_empty() {
        return;
    }

    let level = match log.level.as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    match File::create(&log.path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, simplelog::Config::default(), file);
        }
        Err(err) => eprintln!("billet: cannot open log file {}: {err}", log.path),
    }
}

/// The dedicated error screen for a missing or broken greeting document:
/// block on it until any key, then report the error upwards.
pub fn run_unavailable_screen(err: &DocumentError) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let detail = err.to_string();
    let wait_result: Result<(), Box<dyn std::error::Error>> = (|| {
        loop {
            terminal.draw(|f| ui::draw_unavailable(f, &detail))?;
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    wait_result?;
    Err(detail.into())
}
