use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const HINTS: &str = "^R relocate  F5 center  PgUp/PgDn zoom  ^←→↑↓ pan  ^C quit";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let status_style = if state.error_message.is_some() {
        Style::default().fg(Color::LightRed).bg(Color::DarkGray)
    } else {
        Theme::status_bar()
    };
    let mut parts: Vec<Span> = vec![Span::styled(format!(" {} ", state.status_line()), status_style)];

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.chars().count()).sum();
    let hint_len = HINTS.chars().count() + 2;
    if (area.width as usize) >= used + hint_len {
        let remaining = area.width as usize - used - hint_len;
        parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
        parts.push(Span::styled(
            format!(" {} ", HINTS),
            Style::default().fg(Color::Cyan).bg(Color::DarkGray),
        ));
    } else {
        let remaining = (area.width as usize).saturating_sub(used);
        parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
