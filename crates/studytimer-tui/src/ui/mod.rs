pub mod big_text;
pub mod buttons;
pub mod helpers;
pub mod session;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use studytimer_core::duration::format_mmss;

use crate::app::App;
use helpers::centered_rect;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_title_bar(f, app, chunks[0]);
    session::draw_session(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if app.show_help {
        draw_help_modal(f);
    }
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let spans = vec![
        Span::styled(
            "⏳ StudyTimer ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            format!("🎯 {} focused", format_mmss(session.focus_seconds)),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(format!(
            " │ ✔ {} │ ⏭ {} │ [?]Help [q]Quit",
            session.completed_focus_intervals, session.skipped_focus_intervals
        )),
    ];

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(Span::styled(
        format!(" {} ", app.status_message),
        Style::default().fg(Color::Black).bg(Color::Yellow),
    ));
    f.render_widget(status, area);
}

fn draw_help_modal(f: &mut Frame) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        heading("  TIMER"),
        Line::from("    [Space] / [p]  Start / Pause"),
        Line::from("    [r]            Reset current phase"),
        Line::from("    [s] / [n]      Skip to next phase"),
        Line::from("    [c]            Complete session and exit"),
        Line::from(""),
        heading("  PRESETS (while paused)"),
        Line::from("    [1]-[9]        Select focus length"),
        Line::from(""),
        heading("  GENERAL"),
        Line::from("    [?]            Toggle this help"),
        Line::from("    [q] / [Esc]    Quit without completing"),
    ];

    let area = centered_rect(f.area(), 52, lines.len() as u16 + 2);
    f.render_widget(Clear, area);

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("❓ Help")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().bg(Color::Black));
    f.render_widget(help, area);
}
