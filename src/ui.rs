//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, FacetRow, Selection};
use crate::catalog::{Facet, FacetSelection};
use crate::config::{ControlsSettings, UiSettings};
use crate::playback::{PlaybackController, PlaybackSurface};
use crate::time::format_time;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "change/select".to_string());
    map.insert("backspace".to_string(), "clear".to_string());
    map.insert("space".to_string(), "play/pause".to_string());
    // left/right is filled dynamically from config.
    map.insert("q".to_string(), "quit".to_string());
    map
});

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64, facets: bool) -> String {
    let order = ["j/k", "enter", "backspace", "space", "left/right", "q"];
    order
        .iter()
        .filter(|k| facets || **k != "backspace")
        .filter_map(|k| {
            if *k == "left/right" {
                Some(format!("[←/→] seek -/+{}s", seek_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// `elapsed / total`, both in `m:ss`.
fn time_text(position: f64, duration: f64) -> String {
    format!("{} / {}", format_time(position), format_time(duration))
}

fn facet_value<F: Facet>(value: Option<F>) -> &'static str {
    value.map(|v| v.label()).unwrap_or("-")
}

fn facet_row_text(row: FacetRow, selection: &FacetSelection) -> String {
    let value = match row {
        FacetRow::Duration => facet_value(selection.duration),
        FacetRow::Level => facet_value(selection.level),
        FacetRow::Music => facet_value(selection.music),
    };
    format!("{}: {}", row.title(), value)
}

fn draw_selection(frame: &mut Frame, app: &App, area: Rect) {
    let (items, selected, title): (Vec<ListItem>, usize, &str) = match &app.selection {
        Selection::Facets {
            selection, focus, ..
        } => {
            let items = FacetRow::ALL
                .iter()
                .map(|row| ListItem::new(facet_row_text(*row, selection)))
                .collect();
            let pos = FacetRow::ALL.iter().position(|r| r == focus).unwrap_or(0);
            (items, pos, " meditación ")
        }
        Selection::Enumerated { catalog, cursor } => {
            let chosen = catalog.selected_index();
            let items = catalog
                .entries()
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let mark = if i == chosen { "* " } else { "  " };
                    ListItem::new(format!("{mark}{}", e.display_name))
                })
                .collect();
            (items, *cursor, " grabaciones ")
        }
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn status_lines<'a, S: PlaybackSurface>(
    app: &'a App,
    controller: &'a PlaybackController<S>,
) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = Vec::new();

    let incomplete = matches!(
        &app.selection,
        Selection::Facets { selection, .. } if !selection.is_complete()
    );
    match app.bound() {
        Some(asset) => lines.push(Line::from(format!("File: {}", asset.identifier))),
        None if incomplete => lines.push(Line::from("File: -  (elige duración, nivel y música)")),
        None => lines.push(Line::from("File: -")),
    }

    let state = controller.state().label();
    match controller.position() {
        Some(pos) => lines.push(Line::from(format!(
            "{state} [{}]",
            time_text(pos, controller.duration())
        ))),
        None => lines.push(Line::from(state)),
    }

    let display = controller.display();
    let mut last: Vec<Span> = Vec::new();
    if !display.status_text.is_empty() {
        last.push(Span::raw(display.status_text.as_str()));
    }
    if display.loading {
        if !last.is_empty() {
            last.push(Span::raw(" • "));
        }
        last.push(Span::raw("Loading…").slow_blink());
    }
    lines.push(Line::from(last));
    lines
}

/// Render the entire UI into the provided `frame`.
pub fn draw<S: PlaybackSurface>(
    frame: &mut Frame,
    app: &App,
    controller: &PlaybackController<S>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());
    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" meditar ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_selection(frame, app, chunks[1]);

    let status_par = Paragraph::new(status_lines(app, controller))
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[2]);

    let facets = matches!(app.selection, Selection::Facets { .. });
    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds, facets))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
