use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
};
use studytimer_core::models::Phase;

pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Focus => Color::Cyan,
        Phase::Break => Color::Magenta,
    }
}

pub fn phase_badge(phase: Phase) -> Span<'static> {
    Span::styled(
        format!(" {} ", phase.as_str().to_uppercase()),
        Style::default()
            .fg(Color::Black)
            .bg(phase_color(phase))
            .add_modifier(Modifier::BOLD),
    )
}

pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn key_hint<'a>(key: &'a str, action: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!("[{}]", key), Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} ", action)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));

        let offset = Rect::new(10, 5, 20, 10);
        assert_eq!(centered_rect(offset, 10, 4), Rect::new(15, 8, 10, 4));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        assert_eq!(centered_rect(area, 60, 20), area);
    }
}
