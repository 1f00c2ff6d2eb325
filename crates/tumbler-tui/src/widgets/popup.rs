use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Key bindings listed in the help popup
pub const HELP_LINES: &[(&str, &str)] = &[
    ("k / Up", "increase by 1"),
    ("j / Down", "decrease by 1"),
    ("K / PgUp", "increase by 10"),
    ("J / PgDn", "decrease by 10"),
    ("r", "random value"),
    ("e / :", "enter a value"),
    ("a", "toggle animation"),
    ("t", "toggle ticker"),
    ("s", "stop scrolling"),
    ("q / Ctrl-c", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Render the value entry popup
    pub fn render_input(frame: &mut Frame, buffer: &str, theme: &Theme) {
        let area = frame.area();
        let popup_width = 36u16.min(area.width.saturating_sub(4));
        let popup_height = 6u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Set value ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.grey1)),
            Span::styled(
                buffer,
                Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().fg(theme.accent)),
        ]));
        frame.render_widget(input, chunks[0]);

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.green)),
            Span::styled(" apply  ", Style::default().fg(theme.grey1)),
            Span::styled("Esc", Style::default().fg(theme.error)),
            Span::styled(" cancel", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[2]);
    }

    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let popup_width = 40u16.min(area.width.saturating_sub(4));
        let popup_height = (HELP_LINES.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = HELP_LINES
            .iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>12}  ", keys),
                        Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        let help = Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.blue))
                .style(Style::default().bg(theme.bg1)),
        );
        frame.render_widget(help, popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_larger_than_area() {
        let area = Rect::new(5, 5, 10, 4);
        assert_eq!(centered_rect(20, 8, area), Rect::new(5, 5, 20, 8));
    }
}
