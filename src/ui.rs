//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{
        Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap,
        canvas::{self as shapes, Canvas, Rectangle},
    },
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::audio::MediaBackend;
use crate::config::{ControlsSettings, VisualStyle};
use crate::visualizer::{BarCanvas, DrawSurface, VisualizerState};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "play selected song".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L and +/- are filled dynamically from config.
    map.insert("a".to_string(), "add path/url".to_string());
    map.insert("d".to_string(), "remove".to_string());
    map.insert("v".to_string(), "bars/line".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "+/-", "a", "d", "v", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "+/-" => Some(format!(
                "[+/-] volume {}%",
                (controls.volume_step * 100.0).round()
            )),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `mm:ss`, rounding down. Minutes are not capped at 59.
pub fn format_time(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `name - mm:ss / mm:ss`, with `--:--` while the duration is unknown.
fn now_playing_text(name: &str, current: f64, duration: Option<f64>) -> String {
    let total = duration.map_or_else(|| "--:--".to_string(), format_time);
    format!("{} - {} / {}", name, format_time(current), total)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Paint the last visualizer frame. Surface coordinates grow downwards,
/// the canvas grows upwards, so every y is flipped.
fn render_visualizer(
    frame: &mut Frame,
    area: Rect,
    bars: &BarCanvas,
    style: VisualStyle,
    state: VisualizerState,
) {
    let (width, height) = bars.size();
    let style_name = match style {
        VisualStyle::Bars => "bars",
        VisualStyle::Line => "line",
    };
    let title = match state {
        VisualizerState::Drawing => format!(" visualizer: {} ", style_name),
        VisualizerState::Armed => format!(" visualizer: {} (paused) ", style_name),
        VisualizerState::Uninitialized => format!(" visualizer: {} (idle) ", style_name),
    };
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for rect in bars.rects().iter().filter(|r| r.height > 0.0) {
                ctx.draw(&Rectangle {
                    x: rect.x,
                    y: height - (rect.y + rect.height),
                    width: rect.width,
                    height: rect.height,
                    color: Color::Blue,
                });
            }
            for pair in bars.polyline().windows(2) {
                ctx.draw(&shapes::Line {
                    x1: pair[0].0,
                    y1: height - pair[0].1,
                    x2: pair[1].0,
                    y2: height - pair[1].1,
                    color: Color::Green,
                });
            }
        });
    frame.render_widget(canvas, area);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<B: MediaBackend>(frame: &mut Frame, app: &App<B>, controls_settings: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(app.header())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" barline ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let state = app.engine().state();
    let status = {
        let mut parts: Vec<String> = Vec::new();

        match app.now_playing() {
            Some(name) => {
                parts.push(format!(
                    "Song: {}",
                    now_playing_text(name, state.current_time, state.duration)
                ));
                parts.push(if state.is_playing { "Playing" } else { "Paused" }.to_string());
            }
            None => parts.push("Stopped".to_string()),
        }
        parts.push(format!("Vol: {:.0}%", state.volume * 100.0));
        parts.push(format!("Tracks: {}", app.playlist().len()));

        parts.join(" • ")
    };
    let mut status_lines = vec![Line::from(status)];
    if let Some(err) = app.status() {
        status_lines.push(Line::from(format!("! {}", err)).fg(Color::Red));
    }
    let status_par = Paragraph::new(status_lines)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    // Playlist
    {
        let current = app.playlist().current_index();
        // Center the cursor when possible by creating a visible window.
        // Only build ListItems for the visible window.
        let total = app.playlist().len();
        let list_height = main[0].height.saturating_sub(2) as usize;
        let sel_pos = app.cursor().min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = app
            .playlist()
            .iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(i, track)| {
                let marker = if Some(i) == current { "♪ " } else { "  " };
                let item = ListItem::new(format!("{}{}", marker, track.display_name()));
                if Some(i) == current {
                    item.bold()
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        if total > 0 {
            list_state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, main[0], &mut list_state);
    }

    let vis = app.visualizer();
    render_visualizer(frame, main[1], vis.canvas(), vis.style(), vis.state());

    // Seek bar
    let label = match state.duration {
        Some(d) => format!("{} / {}", format_time(state.current_time), format_time(d)),
        None => format_time(state.current_time),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" position "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(state.progress())
        .label(label);
    frame.render_widget(gauge, chunks[3]);

    // Add prompt overlays the playlist while open.
    if let Some(input) = app.input() {
        let popup_area = centered_rect_sized(72, 3, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let prompt = Paragraph::new(format!("{}_", input)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" add file or URL (enter adds, esc cancels) "),
        );
        frame.render_widget(prompt, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
