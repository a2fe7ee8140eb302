//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tracing::debug;

use crate::config::Action;
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::page_view::tab_at;

use super::controller::Page;
use super::event::WheelNotch;
use super::state::AppState;

/// Fraction of the viewport a page jump moves, as browsers do.
const PAGE_JUMP: f64 = 0.9;

/// Process a key event through the configured bindings.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let viewport = state.page.viewport_height();

    match action {
        Action::Quit => state.should_quit = true,
        Action::WheelDown => handle_wheel(state, WheelNotch::Down),
        Action::WheelUp => handle_wheel(state, WheelNotch::Up),
        Action::PageDown => state.jump_by(viewport * PAGE_JUMP),
        Action::PageUp => state.jump_by(-viewport * PAGE_JUMP),
        Action::Discover => {
            state.discover();
            state.status_message = Some("Discover more".into());
        }
        Action::NextTab => {
            let tab = state.focused_tab().next();
            state.click_tab(tab);
        }
        Action::PrevTab => {
            let tab = state.focused_tab().prev();
            state.click_tab(tab);
        }
    }
}

/// One wheel notch, from the mouse or its key emulation.
pub fn handle_wheel(state: &mut AppState, notch: WheelNotch) {
    let delta_y = notch.delta_y(state.config.wheel_delta);
    state.wheel(delta_y);
    state.status_message = None;
}

/// Left click: tab labels are the only clickable page elements.
pub fn handle_click(state: &mut AppState, column: u16, row: u16) {
    let layout = AppLayout::from_area(state.terminal_area);
    if !point_in_rect(layout.page_area, column, row) {
        return;
    }
    if let Some(tab) = tab_at(layout.page_area, &state.page, column, row) {
        debug!(tab = tab.key(), column, row, "tab clicked");
        state.click_tab(tab);
    }
}

/// Terminal resized: the page pane becomes the new viewport.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = Rect::new(0, 0, width, height);
    let layout = AppLayout::from_area(state.terminal_area);
    state.resize_viewport(layout.viewport_px());
}
