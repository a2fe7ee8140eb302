//! Layout helpers: split the terminal area into regions and map between
//! terminal cells and page pixels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Page pixels per terminal row.
pub const ROW_PX: f64 = 16.0;
/// Page pixels per terminal column.
pub const COL_PX: f64 = 8.0;

const INSPECTOR_WIDTH: u16 = 34;

/// Primary screen layout: page viewport, controller inspector and a bottom
/// status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub inspector_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page + inspector
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(INSPECTOR_WIDTH)])
            .split(rows[0]);

        Self {
            page_area: columns[0],
            inspector_area: columns[1],
            status_area: rows[1],
        }
    }

    /// Viewport height in page pixels for the page pane.
    pub fn viewport_px(&self) -> f64 {
        f64::from(self.page_area.height) * ROW_PX
    }
}

/// Is the terminal cell inside `rect`?
pub fn point_in_rect(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
