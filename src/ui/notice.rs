use crate::app::state::AppState;
use crate::ui::layout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(ref notice) = state.notice else {
        return;
    };

    let area = layout::centered(frame.area(), 50, 7);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::notice_border())
        .style(Style::default().bg(Theme::BG_SURFACE));

    let text = vec![
        Line::from(notice.body.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Theme::key_hint()),
            Span::raw(" OK"),
        ])
        .alignment(Alignment::Right),
    ];
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
