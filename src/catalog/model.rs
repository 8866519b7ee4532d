use std::path::PathBuf;
use std::time::Duration;

/// The sub-range of an audio file treated as "the tape" for playback,
/// progress and seeking. `end` of `None` means the tape runs to the file's
/// natural end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayWindow {
    pub start: Duration,
    pub end: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub caption: String,
    pub source: PathBuf,
    pub window: PlayWindow,
    /// Natural duration of the file, when it could be probed up front.
    pub duration: Option<Duration>,
}
