//! Centered message dialog

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Border, padding and a margin column on each side
const CHROME_WIDTH: u16 = 6;

/// A title, a wrapped message and a key hint, all in one accent color
pub struct Dialog<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub hint: Vec<Span<'a>>,
    pub color: Color,
    pub max_width: u16,
}

impl Dialog<'_> {
    pub fn render(self, frame: &mut Frame) {
        let area = frame.area();
        let max_width = self.max_width.min(area.width);
        let lines = wrap_words(
            self.message,
            usize::from(max_width.saturating_sub(CHROME_WIDTH).max(1)),
        );

        let text_width = lines
            .iter()
            .map(|line| line.chars().count())
            .chain([self.title.chars().count()])
            .max()
            .unwrap_or(0);
        let width = u16::try_from(text_width)
            .unwrap_or(u16::MAX)
            .saturating_add(CHROME_WIDTH);
        // title, blank, message, blank, hint, two borders
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(6);
        let dialog_area = centered_rect(area, width, height);

        let mut content = Vec::with_capacity(lines.len() + 4);
        content.push(Line::from(Span::styled(
            self.title,
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        )));
        content.push(Line::default());
        content.extend(lines.into_iter().map(Line::from));
        content.push(Line::default());
        content.push(Line::from(self.hint));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.color))
            .padding(Padding::horizontal(1));

        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Paragraph::new(content)
                .alignment(Alignment::Center)
                .block(block)
                .style(Style::default().bg(Color::Black)),
            dialog_area,
        );
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap; blank lines in the input are kept
fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let line_len = line.chars().count();
            if line_len > 0 && line_len + 1 + word.chars().count() > max_width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_words_breaks_on_words() {
        assert_eq!(
            wrap_words("We will review your signup", 12),
            vec!["We will", "review your", "signup"]
        );
    }

    #[test]
    fn test_wrap_words_keeps_blank_lines() {
        assert_eq!(wrap_words("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_words("", 10), vec![String::new()]);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
        // Larger than the screen
        assert_eq!(centered_rect(area, 100, 30), area);
    }
}
