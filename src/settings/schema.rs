use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/billet/config.toml` or
/// `~/.config/billet/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BILLET__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub document: DocumentSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            document: DocumentSettings::default(),
            audio: AudioSettings::default(),
            ui: UiSettings::default(),
            log: LogSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Path to the greeting document (JSON).
    pub path: String,
    /// Directory that track `musicPath` locators resolve under.
    pub assets_root: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            path: "billet.json".to_string(),
            assets_root: "assets".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Progress tick interval of the deck engine (milliseconds).
    pub tick_ms: u64,
    /// Initial playback volume.
    pub volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Number of seconds a single seek keypress scrubs.
    pub seek_seconds: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            volume: 1.0,
            quit_fade_out_ms: 500,
            seek_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the typing intro splash is shown before the landing page.
    pub intro: bool,
    /// How long the intro splash stays up (milliseconds).
    pub intro_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            intro: true,
            intro_ms: 3500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file path. The terminal belongs to the TUI, so logs go to a
    /// file; set to an empty string to disable logging entirely.
    pub path: String,
    /// Log level filter: off, error, warn, info, debug or trace.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: "billet.log".to_string(),
            level: "info".to_string(),
        }
    }
}
