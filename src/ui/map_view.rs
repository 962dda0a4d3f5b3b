use crate::app::state::AppState;
use crate::map;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let vp = &state.viewport;
    let markers = map::markers(state.store.state());

    let follow = if state.follow_location { " · following" } else { "" };
    let title = format!(
        " Map {} · span {:.4}° × {:.4}°{} ",
        vp.center.short_label(),
        vp.latitude_delta,
        vp.longitude_delta,
        follow
    );

    // Markers outside the viewport are listed on the bottom border.
    let hidden: Vec<&str> = markers
        .iter()
        .filter(|m| !vp.contains(&m.coordinate))
        .map(|m| m.title.as_str())
        .collect();

    let mut block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());
    if !hidden.is_empty() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" off-screen: {} ", hidden.join(", ")),
            Style::default().fg(Theme::ACCENT_AMBER),
        )));
    }

    let canvas = Canvas::default()
        .block(block)
        .x_bounds(vp.x_bounds())
        .y_bounds(vp.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Theme::MAP_LAND,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for marker in &markers {
                let x = vp.canvas_longitude(marker.coordinate.longitude);
                let y = marker.coordinate.latitude;
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color: marker.color,
                });
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        format!("◉ {}", marker.title),
                        Style::default().fg(marker.color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    frame.render_widget(canvas, area);
}
