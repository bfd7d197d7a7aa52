//! Block-digit rendering for the countdown.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

pub const GLYPH_HEIGHT: u16 = 5;

const DIGITS: [[&str; 5]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    [" # ", "## ", " # ", " # ", "###"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];

const COLON: [&str; 5] = [" ", "#", " ", "#", " "];

fn glyph(ch: char) -> Option<[&'static str; 5]> {
    match ch {
        ':' => Some(COLON),
        _ => ch.to_digit(10).map(|d| DIGITS[d as usize]),
    }
}

/// Large `MM:SS` style text. Unknown characters are skipped.
pub struct BigText<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Columns needed to draw `text`, including one column between glyphs.
    pub fn width(text: &str) -> u16 {
        let glyphs: Vec<_> = text.chars().filter_map(glyph).collect();
        let ink: usize = glyphs.iter().map(|g| g[0].len()).sum();
        (ink + glyphs.len().saturating_sub(1)) as u16
    }
}

impl Widget for BigText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut x = area.left();

        for rows in self.text.chars().filter_map(glyph) {
            let width = rows[0].len() as u16;
            if x + width > area.right() {
                break;
            }

            for (dy, row) in rows.iter().enumerate().take(area.height as usize) {
                let y = area.top() + dy as u16;
                for (dx, cell) in row.chars().enumerate() {
                    if cell != '#' {
                        continue;
                    }
                    if let Some(target) = buf.cell_mut((x + dx as u16, y)) {
                        target.set_style(self.style).set_symbol("█");
                    }
                }
            }

            x += width + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(BigText::width("25:00"), 3 * 4 + 1 + 4);
        assert_eq!(BigText::width("1"), 3);
        assert_eq!(BigText::width(""), 0);
    }

    #[test]
    fn test_render_draws_blocks() {
        let area = Rect::new(0, 0, 20, GLYPH_HEIGHT);
        let mut buf = Buffer::empty(area);
        BigText::new("10").render(area, &mut buf);

        // top row of "1" is " # ", of "0" is "###"
        let top: String = (0..7).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(top, " █  ███");
    }

    #[test]
    fn test_render_truncates_to_area() {
        let area = Rect::new(0, 0, 5, GLYPH_HEIGHT);
        let mut buf = Buffer::empty(area);
        BigText::new("88").render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "█");
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }
}
