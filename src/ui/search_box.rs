use crate::app::state::AppState;
use crate::ui::layout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PLACEHOLDER: &str = "Search for a location";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let search = &state.search;

    let title = if search.is_resolving() {
        " Search (locating place...) "
    } else if search.loading {
        " Search (loading...) "
    } else {
        " Search "
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if state.notice.is_some() {
            Theme::border()
        } else {
            Theme::border_focused()
        })
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL))];
    if search.text.is_empty() {
        spans.push(Span::styled(PLACEHOLDER, Theme::placeholder()));
    } else {
        spans.push(Span::styled(search.text.as_str(), Theme::input_text()));
    }
    if let Some(ref err) = search.error {
        spans.push(Span::styled(format!("  ({})", err), Theme::error_message()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    if state.notice.is_none() && inner.width > 0 {
        // Cursor offset: chevron "❯ " (2 cells) + display width before cursor
        let before = UnicodeWidthStr::width(&search.text[..search.cursor]) as u16;
        let cursor_x = inner.x + 2 + before;
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}

/// Suggestion dropdown, drawn over the top of the map.
pub fn render_dropdown(frame: &mut Frame, search_area: Rect, map_area: Rect, state: &AppState) {
    let search = &state.search;
    if !search.is_open() {
        return;
    }

    let area = layout::dropdown_area(search_area, map_area, search.suggestions.len());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused())
        .style(Style::default().bg(Theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let lines: Vec<Line> = search
        .suggestions
        .iter()
        .enumerate()
        .take(inner.height as usize)
        .map(|(i, s)| {
            let text = truncate(&s.description, width.saturating_sub(2));
            let style = if i == search.selected {
                Theme::suggestion_selected()
            } else {
                Theme::suggestion()
            };
            let pad = width.saturating_sub(1 + UnicodeWidthStr::width(text.as_str()));
            Line::from(Span::styled(format!(" {}{}", text, " ".repeat(pad)), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Truncate to `max` display columns, appending "..." when cut.
fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let budget = if max <= 3 { max } else { max - 3 };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max > 3 {
        out.push_str("...");
    }
    out
}
