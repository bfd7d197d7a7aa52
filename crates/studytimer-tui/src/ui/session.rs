//! Countdown screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use studytimer_core::duration::format_minutes;

use super::big_text::{BigText, GLYPH_HEIGHT};
use super::buttons::{render_button_row, Button};
use super::helpers::{centered_rect, key_hint, phase_badge, phase_color};
use crate::app::App;

pub fn draw_session(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let color = phase_color(snapshot.phase);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" 📚 {} ", app.session.subject))
        .title_bottom(format!(" {} ", app.session.topic))
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(GLYPH_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let state = if snapshot.running {
        Span::styled(" ▶ running", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ⏸ paused", Style::default().fg(Color::Yellow))
    };
    let header = Paragraph::new(Line::from(vec![phase_badge(snapshot.phase), state]))
        .alignment(Alignment::Center);
    f.render_widget(header, chunks[1]);

    let clock_width = BigText::width(&snapshot.formatted_time);
    let clock_area = centered_rect(chunks[2], clock_width, GLYPH_HEIGHT);
    if clock_area.width >= clock_width {
        f.render_widget(
            BigText::new(&snapshot.formatted_time)
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            clock_area,
        );
    } else {
        let plain = Paragraph::new(snapshot.formatted_time.as_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(plain, centered_rect(chunks[2], chunks[2].width, 1));
    }

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(snapshot.elapsed_fraction.clamp(0.0, 1.0))
        .label(format!(
            "{} of {}",
            format_minutes(
                snapshot
                    .total_duration_seconds
                    .saturating_sub(snapshot.remaining_seconds)
            ),
            format_minutes(snapshot.total_duration_seconds)
        ));
    f.render_widget(gauge, chunks[4]);

    let active = app.active_preset();
    let buttons: Vec<Button> = app
        .presets
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, preset)| {
            let shortcut = char::from_digit(i as u32 + 1, 10).unwrap_or('?');
            Button::new(format!("{} {}", preset.name, preset.label()), shortcut)
                .selected(active == Some(i))
                .disabled(snapshot.running)
        })
        .collect();
    render_button_row(f, chunks[5], &buttons, 1);

    let toggle = if snapshot.running { "Pause" } else { "Start" };
    let mut hints = Vec::new();
    for (key, action) in [
        ("Space", toggle),
        ("r", "Reset"),
        ("s", "Skip"),
        ("c", "Complete"),
    ] {
        hints.extend(key_hint(key, action));
    }
    f.render_widget(
        Paragraph::new(Line::from(hints)).alignment(Alignment::Center),
        chunks[6],
    );
}
