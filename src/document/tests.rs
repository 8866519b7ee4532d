use super::*;
use std::path::Path;

const SAMPLE: &str = r#"
{
  "landing": {
    "welcome": "hey you",
    "title": "Happy Day",
    "subtitle": "a tiny surprise",
    "lastLine": "no rush",
    "button": "open",
    "footer": "xx"
  },
  "chillZone": {
    "heading": "Mixtape Corner",
    "subheading": "three songs, three moments",
    "chooseTrackHint": "pick one",
    "continueButton": "onwards",
    "tracks": [
      {
        "id": 1,
        "title": "First Dance",
        "caption": "the one from the kitchen",
        "musicPath": "/music/first-dance.mp3",
        "startTime": 10,
        "endTime": 40
      },
      {
        "id": 2,
        "title": "Road Trip",
        "caption": "windows down",
        "musicPath": "music/road-trip.mp3"
      }
    ]
  },
  "common": { "continue": "next", "close": "shut", "ok": "yes" }
}
"#;

#[test]
fn read_parses_sections_and_track_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billet.json");
    std::fs::write(&path, SAMPLE).unwrap();

    let doc = read(&path).unwrap();
    assert_eq!(doc.landing.title, "Happy Day");
    assert_eq!(doc.landing.last_line, "no rush");
    assert_eq!(doc.chill_zone.heading, "Mixtape Corner");
    assert_eq!(doc.chill_zone.tracks.len(), 2);
    assert_eq!(doc.common.continue_label, "next");

    let first = &doc.chill_zone.tracks[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.music_path, "/music/first-dance.mp3");
    assert_eq!(first.start_time, Some(10.0));
    assert_eq!(first.end_time, Some(40.0));

    let second = &doc.chill_zone.tracks[1];
    assert_eq!(second.start_time, None);
    assert_eq!(second.end_time, None);
}

#[test]
fn read_fills_missing_sections_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billet.json");
    std::fs::write(&path, "{}").unwrap();

    let doc = read(&path).unwrap();
    assert!(!doc.letter.header_title.is_empty());
    assert!(doc.chill_zone.tracks.is_empty());
    assert_eq!(doc.cards.cards.len(), 4);
}

#[test]
fn read_reports_unavailable_for_missing_file() {
    let err = read(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, DocumentError::Unavailable { .. }));
}

#[test]
fn read_reports_malformed_for_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billet.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = read(&path).unwrap_err();
    assert!(matches!(err, DocumentError::Malformed { .. }));
}

#[test]
fn read_rejects_track_record_without_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billet.json");
    std::fs::write(
        &path,
        r#"{ "chillZone": { "tracks": [ { "title": "x", "caption": "y", "musicPath": "z" } ] } }"#,
    )
    .unwrap();

    let err = read(&path).unwrap_err();
    assert!(matches!(err, DocumentError::Malformed { .. }));
}

#[test]
fn load_caches_the_first_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billet.json");
    std::fs::write(&path, SAMPLE).unwrap();

    let first = load(&path).unwrap();
    // A bogus path afterwards still returns the cached document.
    let second = load(Path::new("/definitely/not/here.json")).unwrap();
    assert_eq!(first.landing.title, second.landing.title);
}
