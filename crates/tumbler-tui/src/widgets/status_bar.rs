use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, Trend};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = status_text(app);
        let (trend, trend_color) = match app.trend {
            Trend::Up => (" ▲ ", theme.rise),
            Trend::Down => (" ▼ ", theme.fall),
            Trend::Flat => (" = ", theme.grey2),
        };

        let help_hint = " q:quit j/k:step r:random e:enter t:ticker ?:help ";
        let used = status_text.chars().count() + trend.chars().count() + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(trend, Style::default().fg(trend_color).bg(theme.bg2)),
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn status_text(app: &App) -> String {
    if let Some(msg) = &app.status_message {
        return msg.clone();
    }

    let mode_str = match &app.mode {
        Mode::Normal => "NORMAL",
        Mode::Input(_) => "INPUT",
        Mode::Help => "HELP",
    };
    let animation = if app.animated { "anim" } else { "jump" };
    let ticker = if app.ticker_enabled { "ticker on" } else { "ticker off" };
    let changed = app
        .last_change
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    format!(
        "{} | {} | {} | {} | {}",
        mode_str,
        app.value(),
        animation,
        ticker,
        changed
    )
}
