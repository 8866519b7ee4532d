//! UI rendering for the terminal experience.
//!
//! One `draw` entry point dispatches on the current stage; every page is a
//! paragraph-and-block arrangement in the same frame layout so the flow
//! feels like turning pages of the same card.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, Stage};
use crate::catalog::Track;
use crate::deck::Progress;
use crate::document::Document;
use crate::settings::AudioSettings;

const INTRO_TEXT: &str = "Loading something special for you ...";

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn bordered<'a>(title: &str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    document: &Document,
    catalog: &[Track],
    progress: &Progress,
    audio: &AudioSettings,
) {
    if app.intro_active() {
        draw_intro(frame);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, app, document, chunks[0]);

    match app.stage {
        Stage::Landing => draw_landing(frame, document, chunks[1]),
        Stage::Letter => draw_letter(frame, app, document, chunks[1]),
        Stage::ChillZone => draw_chill_zone(frame, app, document, catalog, progress, chunks[1]),
        Stage::Cards => draw_cards(frame, app, document, chunks[1]),
        Stage::FinalLetter => draw_final_letter(frame, app, document, chunks[1]),
    }

    draw_status(frame, app, document, catalog, progress, chunks[2]);
    draw_footer(frame, app, audio, chunks[3]);
}

/// The typing-splash shown before the landing page.
fn draw_intro(frame: &mut Frame) {
    let area = centered_rect_sized(50, 5, frame.area());
    let splash = Paragraph::new(INTRO_TEXT)
        .alignment(Alignment::Center)
        .block(bordered("billet"));
    frame.render_widget(splash, area);
}

/// The blocking screen shown when the greeting document cannot be loaded.
pub fn draw_unavailable(frame: &mut Frame, detail: &str) {
    let area = centered_rect_sized(64, 8, frame.area());
    let text = format!("This letter is not ready yet.\n\n{detail}\n\nPress any key to close.");
    let message = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(bordered("billet"));
    frame.render_widget(message, area);
}

fn draw_header(frame: &mut Frame, app: &App, document: &Document, area: Rect) {
    let title = match app.stage {
        Stage::Landing => document.landing.welcome.as_str(),
        Stage::Letter => document.letter.header_title.as_str(),
        Stage::ChillZone => document.chill_zone.heading.as_str(),
        Stage::Cards => document.cards.heading.as_str(),
        Stage::FinalLetter => document.final_letter.title.as_str(),
    };
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(bordered("billet"));
    frame.render_widget(header, area);
}

fn draw_landing(frame: &mut Frame, document: &Document, area: Rect) {
    let landing = &document.landing;
    let text = format!(
        "{}\n\n{}\n\n{}\n\n\n{}",
        landing.title, landing.subtitle, landing.last_line, landing.footer
    );
    let page = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(bordered(&landing.button));
    frame.render_widget(page, centered_rect_sized(60, 12, area));
}

fn draw_letter(frame: &mut Frame, app: &App, document: &Document, area: Rect) {
    let letter = &document.letter;

    if !app.envelope_open {
        let envelope = format!(
            "{}\n\n  ______________\n |\\            /|\n | \\          / |\n |  \\________/  |\n |______________|\n\n{}",
            letter.header_subtitle, letter.envelope_click_hint
        );
        let closed = Paragraph::new(envelope)
            .alignment(Alignment::Center)
            .block(bordered(&letter.header_title));
        frame.render_widget(closed, centered_rect_sized(50, 14, area));
        return;
    }

    let text = format!(
        "{}\n\n{}\n\n{}",
        letter.letter_header_title, letter.letter_message, letter.letter_signature
    );
    let open = Paragraph::new(text)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .block(bordered(&letter.header_title));
    frame.render_widget(open, centered_rect_sized(64, 16, area));
}

fn draw_chill_zone(
    frame: &mut Frame,
    app: &App,
    document: &Document,
    catalog: &[Track],
    progress: &Progress,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(area);

    let subheading = Paragraph::new(document.chill_zone.subheading.as_str())
        .alignment(Alignment::Center);
    frame.render_widget(subheading, chunks[0]);

    let items: Vec<ListItem> = catalog
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = match progress.active {
                Some(active) if active == i && progress.playing => "▶",
                Some(active) if active == i => "⏸",
                _ => " ",
            };
            ListItem::new(format!("{marker} {} — {}", track.title, track.caption))
        })
        .collect();

    let list = List::new(items)
        .block(bordered(&document.chill_zone.choose_track_hint))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if !catalog.is_empty() {
        state.select(Some(app.selected_track.min(catalog.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    // Seek bar + timer for whatever holds the slot.
    let label = if progress.window.is_zero() {
        format_mmss(progress.elapsed)
    } else {
        format!(
            "{} / {}",
            format_mmss(progress.elapsed),
            format_mmss(progress.window)
        )
    };
    let gauge = Gauge::default()
        .block(bordered("tape"))
        .ratio(f64::from(progress.fraction).clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, chunks[2]);
}

fn draw_cards(frame: &mut Frame, app: &App, document: &Document, area: Rect) {
    let cards = &document.cards.cards;
    if cards.is_empty() {
        let empty = Paragraph::new(document.cards.instruction.as_str())
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row_index, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);

        for (col_index, col) in cols.iter().enumerate() {
            let index = row_index * 2 + col_index;
            let Some(card) = cards.get(index) else {
                continue;
            };
            let flipped = app.flipped.get(index).copied().unwrap_or(false);

            let body = if flipped {
                format!("{}\n\n{}", card.back_title, card.back_text)
            } else {
                format!("\n{}\n\n[{}]", card.front, index + 1)
            };
            let face = Paragraph::new(body)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(bordered(&format!("card {}", index + 1)));
            frame.render_widget(face, *col);
        }
    }
}

fn draw_final_letter(frame: &mut Frame, app: &App, document: &Document, area: Rect) {
    let letter = &document.final_letter;

    let text = if app.sealed {
        format!(
            "{}\n\n{}\n\n{}",
            letter.sealed_title, letter.sealed_subtitle, letter.sealing_note
        )
    } else {
        let mut text = format!("{}\n\n", letter.letter_greeting);
        for paragraph in &letter.letter_paragraphs {
            text.push_str(paragraph);
            text.push_str("\n\n");
        }
        text.push_str(&letter.sealing_text);
        text
    };

    let page = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(bordered(&letter.title));
    frame.render_widget(page, centered_rect_sized(64, 18, area));
}

fn draw_status(
    frame: &mut Frame,
    app: &App,
    document: &Document,
    catalog: &[Track],
    progress: &Progress,
    area: Rect,
) {
    let status = if let Some(notice) = &app.notice {
        notice.clone()
    } else if let Some(active) = progress.active.and_then(|i| catalog.get(i)) {
        let state = if progress.playing { "Playing" } else { "Paused" };
        format!("{state}: {} — {}", active.title, active.caption)
    } else {
        match app.stage {
            Stage::ChillZone => document.chill_zone.choose_track_hint.clone(),
            Stage::Cards => document.cards.instruction.clone(),
            _ => document.common.continue_label.clone(),
        }
    };

    let status_par = Paragraph::new(status)
        .block(bordered("status"))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, area);
}

fn draw_footer(frame: &mut Frame, app: &App, audio: &AudioSettings, area: Rect) {
    let controls = match app.stage {
        Stage::Landing => "[enter] begin | [q] quit".to_string(),
        Stage::Letter => {
            if app.envelope_open {
                "[n/enter] continue | [q] quit".to_string()
            } else {
                "[enter/o] open the envelope | [q] quit".to_string()
            }
        }
        Stage::ChillZone => format!(
            "[j/k] choose | [enter/space] play/pause | [h/l] scrub -/+{}s | [n] continue | [q] quit",
            audio.seek_seconds
        ),
        Stage::Cards => "[1-4] flip a card | [n] continue | [q] quit".to_string(),
        Stage::FinalLetter => {
            if app.sealed {
                "[r] experience it again | [q] quit".to_string()
            } else {
                "[s] seal the letter | [r] start over | [q] quit".to_string()
            }
        }
    };

    let footer = Paragraph::new(controls)
        .block(bordered("controls"))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, area);
}
