//! Preset buttons

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct Button {
    pub label: String,
    pub shortcut: char,
    pub selected: bool,
    pub disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, shortcut: char) -> Self {
        Self {
            label: label.into(),
            shortcut,
            selected: false,
            disabled: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn style(&self) -> Style {
        match (self.selected, self.disabled) {
            (true, false) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (true, true) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (false, false) => Style::default().fg(Color::White).bg(Color::DarkGray),
            (false, true) => Style::default().fg(Color::DarkGray),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let text = format!("[{}] {}", self.shortcut, self.label);
        let button = Paragraph::new(text)
            .style(self.style())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(button, area);
    }
}

/// Lay buttons out left to right in equal shares, `spacing` columns apart.
pub fn render_button_row(f: &mut Frame, area: Rect, buttons: &[Button], spacing: u16) {
    if buttons.is_empty() {
        return;
    }

    let mut constraints = Vec::with_capacity(buttons.len() * 2);
    for i in 0..buttons.len() {
        if i > 0 && spacing > 0 {
            constraints.push(Constraint::Length(spacing));
        }
        constraints.push(Constraint::Ratio(1, buttons.len() as u32));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let step = if spacing > 0 { 2 } else { 1 };
    for (button, chunk) in buttons.iter().zip(chunks.iter().step_by(step)) {
        button.render(f, *chunk);
    }
}
