//! UI rendering helpers for the terminal user interface.
//!
//! Layout: header, search box, results | queue, now playing, controls.

use std::{collections::BTreeMap, sync::LazyLock, time::Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, EMPTY_QUEUE_MESSAGE, NO_RESULTS_MESSAGE, PROMPT_MESSAGE, SearchView};
use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("type", "search");
    map.insert("up/down", "select");
    map.insert("enter", "add to queue");
    map.insert("esc", "clear / quit");
    map.insert("ctrl-c", "quit");
    map
});

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text.
fn controls_text() -> String {
    let order = ["type", "up/down", "enter", "esc", "ctrl-c"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Gauge ratio for a progress percentage.
pub(crate) fn progress_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_search_box(frame, app, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);
    draw_results(frame, app, columns[0], now);
    draw_queue(frame, app, columns[1]);

    draw_now_playing(frame, app, chunks[3]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(progress_ratio(app.progress))
        .label(format!("{:.0}%", app.progress.clamp(0.0, 100.0)));
    frame.render_widget(gauge, chunks[4]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

fn draw_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.searching {
        " search (searching…) "
    } else {
        " search "
    };
    let input = Paragraph::new(format!("{}▏", app.input)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(LEFT_PAD),
    );
    frame.render_widget(input, area);
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let block = Block::default().borders(Borders::ALL).title(" results ");

    let message = match &app.search {
        SearchView::Results(_) => None,
        SearchView::Prompt => Some(PROMPT_MESSAGE.to_string()),
        SearchView::NoResults => Some(NO_RESULTS_MESSAGE.to_string()),
        SearchView::Error(msg) => Some(msg.clone()),
    };
    if let Some(message) = message {
        let paragraph = Paragraph::new(message)
            .italic()
            .block(block.padding(LEFT_PAD))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let added = app.added_index(now);
    let items: Vec<ListItem> = app
        .results()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let mark = if added == Some(i) {
                "✓"
            } else if track.is_playable() {
                "+"
            } else {
                "-"
            };
            ListItem::new(format!("{mark} {}", track.display()))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !app.results().is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_queue(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" queue ({}) ", app.queue_label()));

    if app.queue.is_empty() {
        let paragraph = Paragraph::new(EMPTY_QUEUE_MESSAGE)
            .italic()
            .block(block.padding(LEFT_PAD))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .queue
        .iter()
        .enumerate()
        .map(|(i, track)| ListItem::new(format!("{}. {}", i + 1, track.display())))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_now_playing(frame: &mut Frame, app: &App, area: Rect) {
    let (title, subtitle) = app.now_playing_lines();
    let text = format!("{} {title}\n  {subtitle}", app.spinner());
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" now playing ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_text_lists_every_binding_in_order() {
        let text = controls_text();
        assert!(text.starts_with("[type] search"));
        assert!(text.ends_with("[ctrl-c] quit"));
        assert_eq!(text.matches(" | ").count(), 4);
    }

    #[test]
    fn progress_ratio_is_bounded() {
        assert_eq!(progress_ratio(0.0), 0.0);
        assert_eq!(progress_ratio(50.0), 0.5);
        assert_eq!(progress_ratio(150.0), 1.0);
        assert_eq!(progress_ratio(-5.0), 0.0);
        assert_eq!(progress_ratio(f64::NAN), 0.0);
    }
}
