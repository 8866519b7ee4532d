use serde::Deserialize;

/// The whole greeting document, one section per page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub landing: LandingSection,
    pub letter: LetterSection,
    pub chill_zone: ChillZoneSection,
    pub cards: CardsSection,
    pub final_letter: FinalLetterSection,
    pub common: CommonSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingSection {
    pub welcome: String,
    pub title: String,
    pub subtitle: String,
    pub last_line: String,
    pub button: String,
    pub footer: String,
}

impl Default for LandingSection {
    fn default() -> Self {
        Self {
            welcome: "hello there".to_string(),
            title: "A Little Something".to_string(),
            subtitle: "made just for you".to_string(),
            last_line: "take your time".to_string(),
            button: "come on in".to_string(),
            footer: "with love".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LetterSection {
    pub header_title: String,
    pub header_subtitle: String,
    pub letter_header_title: String,
    pub letter_message: String,
    pub letter_signature: String,
    pub envelope_click_hint: String,
    pub continue_button: String,
}

impl Default for LetterSection {
    fn default() -> Self {
        Self {
            header_title: "Special Delivery".to_string(),
            header_subtitle: "something arrived for you".to_string(),
            letter_header_title: "Dear you".to_string(),
            letter_message: "This space was left for a letter.".to_string(),
            letter_signature: "— me".to_string(),
            envelope_click_hint: "open the envelope".to_string(),
            continue_button: "keep going".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChillZoneSection {
    pub heading: String,
    pub subheading: String,
    pub choose_track_hint: String,
    pub continue_button: String,
    pub tracks: Vec<TrackRecord>,
}

impl Default for ChillZoneSection {
    fn default() -> Self {
        Self {
            heading: "The Chill Zone".to_string(),
            subheading: "press play on a memory".to_string(),
            choose_track_hint: "pick a tape".to_string(),
            continue_button: "keep going".to_string(),
            tracks: Vec::new(),
        }
    }
}

/// One track record as authored in the document. Times are in seconds;
/// `startTime` defaults to 0 and a missing `endTime` means the tape plays
/// to its natural end.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub id: u32,
    pub title: String,
    pub caption: String,
    pub music_path: String,
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardsSection {
    pub heading: String,
    pub subheading: String,
    pub instruction: String,
    pub continue_button: String,
    pub cards: Vec<CardFace>,
}

impl Default for CardsSection {
    fn default() -> Self {
        Self {
            heading: "Flip Me Over".to_string(),
            subheading: "four little notes".to_string(),
            instruction: "flip a card".to_string(),
            continue_button: "keep going".to_string(),
            cards: (1..=4)
                .map(|n| CardFace {
                    front: format!("card {n}"),
                    back_title: format!("note {n}"),
                    back_text: "This one was left blank.".to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardFace {
    pub front: String,
    pub back_title: String,
    pub back_text: String,
}

impl Default for CardFace {
    fn default() -> Self {
        Self {
            front: "card".to_string(),
            back_title: "note".to_string(),
            back_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinalLetterSection {
    pub title: String,
    pub sealing_text: String,
    pub seal_button: String,
    pub restart_button: String,
    pub sealed_title: String,
    pub sealed_subtitle: String,
    pub letter_greeting: String,
    pub letter_paragraphs: Vec<String>,
    pub sealing_note: String,
}

impl Default for FinalLetterSection {
    fn default() -> Self {
        Self {
            title: "One Last Letter".to_string(),
            sealing_text: "seal it when you are ready".to_string(),
            seal_button: "seal the letter".to_string(),
            restart_button: "experience it again".to_string(),
            sealed_title: "Sealed with care".to_string(),
            sealed_subtitle: "until next time".to_string(),
            letter_greeting: "Dear you,".to_string(),
            letter_paragraphs: vec!["This space was left for a letter.".to_string()],
            sealing_note: "some things are better kept".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonSection {
    #[serde(rename = "continue")]
    pub continue_label: String,
    pub close: String,
    pub ok: String,
}

impl Default for CommonSection {
    fn default() -> Self {
        Self {
            continue_label: "continue".to_string(),
            close: "close".to_string(),
            ok: "ok".to_string(),
        }
    }
}
