//! Scroll-choreography controller: the one object a page mounts.
//!
//! The controller owns every piece of cross-tick state (hero engine state,
//! tab sync state, pending reveals, the pending frame and settle timer) and
//! is the only place that writes to the [`Page`].  Core modules decide;
//! this module applies.

use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{
    geometry::{Bounds, IndicatorGeometry, ScrollBehavior, Viewport},
    hero::{
        self, HeroEffect, HeroEvent, HeroGeometry, HeroStage, HeroState, InputDisposition,
        Progress,
    },
    parallax::layer_offsets,
    reveal::{RevealId, RevealSet},
    tabs::{click_target, TabGeometry, TabId, TabSync},
};

// ───────────────────────────────────────── page boundary ─────

/// Elements the controller looks up on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Hero,
    ParallaxLayer(usize),
    /// Block whose bottom edge decides tab-bar docking.
    TabsHero,
    TabBar,
    Section(TabId),
    Reveal(RevealId),
}

/// Handle of a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle of a pending timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// The browser-side surface the controller consumes.
///
/// Geometry getters return `None` for elements that are not mounted; the
/// controller treats that as "nothing to do this tick".
pub trait Page {
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Element box in document coordinates.
    fn bounds(&self, element: Element) -> Option<Bounds>;
    /// `offsetLeft`/`offsetWidth` of a tab anchor inside the bar, which
    /// depends on whether the bar is docked.
    fn tab_anchor(&self, tab: TabId, docked: bool) -> Option<IndicatorGeometry>;

    fn set_layer_offset(&mut self, layer: usize, translate_y: f64);
    fn set_hero_stage(&mut self, stage: HeroStage);
    fn set_tab_state(&mut self, tabs: &TabSync);
    fn reveal(&mut self, id: RevealId);
    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior);

    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;
    fn clear_timeout(&mut self, handle: TimerHandle);
}

// ───────────────────────────────────────── snapshot ──────────

/// Read-only view of the controller, for status bars, traces and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub hero_state: &'static str,
    pub progress: Progress,
    pub accumulator: f64,
    pub has_passed_hero: bool,
    pub locked: bool,
    pub current_tab: Option<TabId>,
    pub docked: bool,
    pub indicator: Option<IndicatorGeometry>,
    pub pending_reveals: usize,
    pub disposed: bool,
}

// ───────────────────────────────────────── controller ────────

#[derive(Debug)]
pub struct ScrollController {
    hero: HeroState,
    tabs: TabSync,
    reveal: RevealSet,
    /// Last stage written to the page.
    stage: Option<HeroStage>,
    frame: Option<FrameHandle>,
    settle: Option<TimerHandle>,
    disposed: bool,
}

impl ScrollController {
    /// Create the controller for a freshly mounted page and paint the
    /// initial frame, tab state and reveals.
    pub fn mount<P: Page>(page: &mut P, reveal_targets: impl IntoIterator<Item = RevealId>) -> Self {
        let hero = HeroState::initial(&hero_geometry(&*page));
        let mut controller = Self {
            hero,
            tabs: TabSync::new(),
            reveal: RevealSet::new(reveal_targets),
            stage: None,
            frame: None,
            settle: None,
            disposed: false,
        };
        controller.render(page, hero.progress());
        controller.sync_tabs(page, true);
        controller.observe_reveals(page);
        debug!(state = hero.name(), scroll_y = page.scroll_y(), "scroll controller mounted");
        controller
    }

    /// Feed one wheel event.  The host must suppress native scrolling when
    /// this returns [`InputDisposition::Captured`].
    pub fn handle_wheel<P: Page>(&mut self, page: &mut P, delta_y: f64) -> InputDisposition {
        if self.disposed {
            return InputDisposition::Native;
        }
        self.step(page, HeroEvent::Wheel { delta_y })
    }

    /// The page scrolled.  Hero, tabs and reveals each read the current
    /// position on their own.
    pub fn handle_scroll<P: Page>(&mut self, page: &mut P) {
        if self.disposed {
            return;
        }
        self.step(page, HeroEvent::Scrolled);
        self.sync_tabs(page, false);
        self.observe_reveals(page);
    }

    /// Viewport or layout changed: repaint at the current progress and
    /// re-read tab geometry.
    pub fn handle_resize<P: Page>(&mut self, page: &mut P) {
        if self.disposed {
            return;
        }
        self.render(page, self.hero.progress());
        let changed = self.tabs.refresh_indicator(|tab, docked| page.tab_anchor(tab, docked));
        if changed {
            page.set_tab_state(&self.tabs);
        }
        self.sync_tabs(page, false);
        self.observe_reveals(page);
    }

    /// "Discover more": play the hero to its end, then scroll on.
    pub fn fast_forward<P: Page>(&mut self, page: &mut P) {
        if self.disposed {
            return;
        }
        self.step(page, HeroEvent::FastForward);
    }

    /// A tab was clicked.  Only scrolls; the current tab follows once the
    /// section reaches the band.
    pub fn click_tab<P: Page>(&mut self, page: &mut P, tab: TabId) {
        if self.disposed {
            return;
        }
        let (Some(section), Some(bar)) = (
            page.bounds(Element::Section(tab)),
            page.bounds(Element::TabBar),
        ) else {
            trace!(tab = tab.key(), "tab click ignored, section not mounted");
            return;
        };
        let y = click_target(section, bar);
        debug!(tab = tab.key(), y, "tab click scroll");
        page.scroll_to(y, ScrollBehavior::Smooth);
    }

    /// A frame callback fired.  Handles other than the pending one are stale.
    pub fn on_frame<P: Page>(&mut self, page: &mut P, handle: FrameHandle, now: Duration) {
        if self.disposed || self.frame != Some(handle) {
            trace!(?handle, "stale frame callback");
            return;
        }
        self.frame = None;
        self.step(page, HeroEvent::Frame { now });
    }

    /// A timeout fired.  Only the pending settle timer is honoured.
    pub fn on_timer<P: Page>(&mut self, page: &mut P, handle: TimerHandle) {
        if self.disposed || self.settle != Some(handle) {
            trace!(?handle, "stale timer callback");
            return;
        }
        self.settle = None;
        self.step(page, HeroEvent::SettleElapsed);
    }

    /// Tear down: cancel pending callbacks; every later call is a no-op.
    pub fn dispose<P: Page>(&mut self, page: &mut P) {
        if self.disposed {
            return;
        }
        if let Some(frame) = self.frame.take() {
            page.cancel_frame(frame);
        }
        if let Some(timer) = self.settle.take() {
            page.clear_timeout(timer);
        }
        self.disposed = true;
        debug!(state = self.hero.name(), "scroll controller disposed");
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            hero_state: self.hero.name(),
            progress: self.hero.progress(),
            accumulator: self.hero.accumulator(),
            has_passed_hero: self.hero.has_passed_hero(),
            locked: self.hero.is_locked(),
            current_tab: self.tabs.current,
            docked: self.tabs.docked,
            indicator: self.tabs.indicator,
            pending_reveals: self.reveal.pending().len(),
            disposed: self.disposed,
        }
    }

    // ── internals ───────────────────────────────────────────────

    fn step<P: Page>(&mut self, page: &mut P, event: HeroEvent) -> InputDisposition {
        let before = self.hero;
        let step = hero::transition(before, event, &hero_geometry(&*page));
        if step.state.name() != before.name() {
            debug!(
                from = before.name(),
                to = step.state.name(),
                progress = step.state.progress().value(),
                "hero transition"
            );
        }
        self.hero = step.state;
        for effect in step.effects {
            self.apply(page, effect);
        }
        step.disposition
    }

    fn apply<P: Page>(&mut self, page: &mut P, effect: HeroEffect) {
        match effect {
            HeroEffect::Render(progress) => self.render(page, progress),
            HeroEffect::ScrollTo { y, behavior } => {
                debug!(y, "hero exit scroll");
                page.scroll_to(y, behavior);
            }
            HeroEffect::StartSettleTimer(delay) => {
                if let Some(old) = self.settle.take() {
                    page.clear_timeout(old);
                }
                self.settle = Some(page.set_timeout(delay));
            }
            HeroEffect::RequestFrame => {
                if self.frame.is_none() {
                    self.frame = Some(page.request_frame());
                }
            }
        }
    }

    fn render<P: Page>(&mut self, page: &mut P, progress: Progress) {
        if page.bounds(Element::Hero).is_none() {
            return;
        }
        for (layer, offset) in layer_offsets(progress).into_iter().enumerate() {
            if page.bounds(Element::ParallaxLayer(layer)).is_some() {
                page.set_layer_offset(layer, offset);
            }
        }
        let stage = progress.stage();
        if self.stage != Some(stage) {
            self.stage = Some(stage);
            page.set_hero_stage(stage);
        }
    }

    fn sync_tabs<P: Page>(&mut self, page: &mut P, force: bool) {
        let geo = TabGeometry {
            scroll_y: page.scroll_y(),
            tabs_hero: page.bounds(Element::TabsHero),
            tab_bar: page.bounds(Element::TabBar),
            sections: TabId::ALL
                .into_iter()
                .map(|tab| (tab, page.bounds(Element::Section(tab))))
                .collect(),
        };
        let changed = self.tabs.sync(&geo, |tab, docked| page.tab_anchor(tab, docked));
        if changed || force {
            page.set_tab_state(&self.tabs);
        }
    }

    fn observe_reveals<P: Page>(&mut self, page: &mut P) {
        if self.reveal.is_done() {
            return;
        }
        let viewport = Viewport {
            scroll_y: page.scroll_y(),
            height: page.viewport_height(),
        };
        let revealed = self
            .reveal
            .observe(viewport, |id| page.bounds(Element::Reveal(id)));
        for id in revealed {
            page.reveal(id);
        }
    }
}

fn hero_geometry<P: Page>(page: &P) -> HeroGeometry {
    HeroGeometry {
        scroll_y: page.scroll_y(),
        hero: page.bounds(Element::Hero),
    }
}
