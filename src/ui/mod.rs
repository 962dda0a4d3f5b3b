mod layout;
mod map_view;
mod notice;
mod search_box;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    map_view::render(frame, app_layout.map, state);
    search_box::render(frame, app_layout.search_box, state);
    search_box::render_dropdown(frame, app_layout.search_box, app_layout.map, state);
    status_bar::render(frame, app_layout.status_bar, state);
    notice::render(frame, state);
}
