//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The simulated page and the controller are both owned here; every method
//! below is one host-side event routed into the controller.

use std::time::Duration;

use ratatui::layout::Rect;
use tracing::trace;

use super::controller::{Page, ScrollController};
use super::page::SimPage;
use crate::config::AppConfig;
use crate::core::{hero::InputDisposition, tabs::TabId};

/// Top-level application state.
pub struct AppState {
    /// The virtual landing page (geometry, scroll position, callback queues).
    pub page: SimPage,
    /// Scroll choreography mounted on `page`.
    pub controller: ScrollController,
    /// User-configurable keybindings and simulator settings.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Simulated clock, advanced by [`AppState::tick`].
    pub now: Duration,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(viewport_height: f64, config: AppConfig) -> Self {
        let mut page = SimPage::new(viewport_height);
        let targets = page.reveal_targets();
        let controller = ScrollController::mount(&mut page, targets);
        Self {
            page,
            controller,
            config,
            should_quit: false,
            status_message: None,
            now: Duration::ZERO,
            terminal_area: Rect::default(),
        }
    }

    /// A wheel event.  When the controller does not capture it the page
    /// scrolls natively.
    pub fn wheel(&mut self, delta_y: f64) -> InputDisposition {
        let disposition = self.controller.handle_wheel(&mut self.page, delta_y);
        if disposition == InputDisposition::Native {
            self.page.native_scroll_by(delta_y);
        }
        trace!(delta_y, ?disposition, "wheel");
        disposition
    }

    /// Scrollbar or keyboard page jump: moves the viewport without wheel
    /// input, which the hero treats as an external scroll.
    pub fn jump_by(&mut self, delta: f64) {
        let y = self.page.scroll_y() + delta;
        self.page.jump_to(y);
    }

    /// Absolute jump, as a scrollbar drag would produce.
    pub fn jump_to(&mut self, y: f64) {
        self.page.jump_to(y);
    }

    /// The "Discover more" button.
    pub fn discover(&mut self) {
        self.controller.fast_forward(&mut self.page);
    }

    pub fn click_tab(&mut self, tab: TabId) {
        self.controller.click_tab(&mut self.page, tab);
        self.status_message = Some(format!("→ {}", tab.label()));
    }

    /// Tab the keyboard's next/previous moves start from.
    pub fn focused_tab(&self) -> TabId {
        self.controller.snapshot().current_tab.unwrap_or(TabId::Overview)
    }

    pub fn resize_viewport(&mut self, viewport_height: f64) {
        self.page.resize(viewport_height);
        self.controller.handle_resize(&mut self.page);
    }

    /// Advance the clock to `now` and deliver what became due, in browser
    /// order: the scroll event, then timers, then frame callbacks.
    pub fn tick(&mut self, now: Duration) {
        self.now = now;
        let due = self.page.advance(now);
        if due.scrolled {
            self.controller.handle_scroll(&mut self.page);
        }
        for timer in due.timers {
            self.controller.on_timer(&mut self.page, timer);
        }
        for frame in due.frames {
            self.controller.on_frame(&mut self.page, frame, now);
        }
    }

    /// Unmount the controller.  Page events keep flowing but no longer
    /// reach the choreography.
    pub fn dispose(&mut self) {
        self.controller.dispose(&mut self.page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WHEEL_STEP_THRESHOLD;

    fn run_frames(state: &mut AppState, n: u32) {
        for _ in 0..n {
            let now = state.now + Duration::from_millis(16);
            state.tick(now);
        }
    }

    #[test]
    fn fresh_state_starts_at_the_top() {
        let state = AppState::new(800.0, AppConfig::default());
        assert_eq!(state.page.scroll_y(), 0.0);
        assert_eq!(state.controller.snapshot().hero_state, "above-hero");
    }

    #[test]
    fn native_wheel_scrolls_the_page() {
        let mut state = AppState::new(800.0, AppConfig::default());
        let d = state.wheel(40.0);
        assert_eq!(d, InputDisposition::Native);
        assert_eq!(state.page.scroll_y(), 40.0);
    }

    #[test]
    fn captured_wheel_keeps_the_page_still() {
        let mut state = AppState::new(800.0, AppConfig::default());
        state.jump_to(64.0);
        run_frames(&mut state, 1);
        let d = state.wheel(WHEEL_STEP_THRESHOLD);
        assert_eq!(d, InputDisposition::Captured);
        assert_eq!(state.page.scroll_y(), 64.0);
        assert!(state.controller.snapshot().progress.value() > 0.0);
    }

    #[test]
    fn dispose_detaches_the_controller() {
        let mut state = AppState::new(800.0, AppConfig::default());
        state.jump_to(64.0);
        run_frames(&mut state, 1);
        state.dispose();
        let d = state.wheel(WHEEL_STEP_THRESHOLD);
        assert_eq!(d, InputDisposition::Native);
        assert!(state.controller.snapshot().disposed);
    }
}
