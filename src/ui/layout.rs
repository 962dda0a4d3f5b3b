use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub search_box: Rect,
    pub map: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        search_box: chunks[0],
        map: chunks[1],
        status_bar: chunks[2],
    }
}

/// Dropdown area directly under the search box, overlaying the map.
pub fn dropdown_area(search_box: Rect, map: Rect, rows: usize) -> Rect {
    let height = (rows as u16 + 2).min(map.height);
    Rect::new(search_box.x, map.y, search_box.width, height)
}

/// Centered popup of the given size, clipped to `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stacks_rows() {
        let l = compute_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(l.search_box, Rect::new(0, 0, 80, 3));
        assert_eq!(l.map, Rect::new(0, 3, 80, 20));
        assert_eq!(l.status_bar, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_dropdown_clipped_to_map() {
        let l = compute_layout(Rect::new(0, 0, 80, 10));
        let d = dropdown_area(l.search_box, l.map, 20);
        assert_eq!(d.y, l.map.y);
        assert_eq!(d.height, l.map.height);
    }

    #[test]
    fn test_centered_popup() {
        assert_eq!(centered(Rect::new(0, 0, 80, 24), 40, 6), Rect::new(20, 9, 40, 6));
        assert_eq!(centered(Rect::new(0, 0, 20, 4), 40, 6), Rect::new(0, 0, 20, 4));
    }
}
