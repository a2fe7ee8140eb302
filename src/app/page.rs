//! Simulated landing page: the host the controller runs against.
//!
//! Lays out the creator landing page in CSS pixels, keeps the scroll
//! position, and queues frame and timer callbacks the way a browser would.
//! The event loop drains those queues with [`SimPage::advance`] and hands
//! them back to the controller.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Duration;

use super::controller::{Element, FrameHandle, Page, TimerHandle};
use super::smooth_scroll::SmoothScroll;
use crate::core::{
    geometry::{Bounds, IndicatorGeometry, ScrollBehavior},
    hero::HeroStage,
    parallax::LAYER_COUNT,
    reveal::RevealId,
    tabs::{TabId, TabSync},
};

// ───────────────────────────────────────── layout ────────────

pub const BANNER_HEIGHT: f64 = 64.0;
pub const INTRO_HEIGHT: f64 = 360.0;
pub const TAB_BAR_HEIGHT: f64 = 48.0;
pub const SECTION_HEIGHTS: [f64; 5] = [900.0, 1100.0, 1200.0, 1000.0, 800.0];
pub const FOOTER_HEIGHT: f64 = 400.0;
/// Decorative cards per section that fade in on intersect.
pub const REVEALS_PER_SECTION: usize = 2;
const REVEAL_HEIGHT: f64 = 120.0;
const SMOOTH_SCROLL_SPEED: f64 = 0.25;
const MIN_VIEWPORT: f64 = 160.0;
/// Programmatic scrolls kept for inspection; older entries are dropped.
const SCROLL_LOG_LIMIT: usize = 32;

/// A decorative card inside a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealCard {
    pub id: RevealId,
    pub section: TabId,
    pub bounds: Bounds,
}

/// Document layout for a given viewport height.  The hero always fills
/// exactly one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub banner: Bounds,
    pub hero: Bounds,
    pub intro: Bounds,
    pub tab_bar: Bounds,
    pub sections: Vec<(TabId, Bounds)>,
    pub reveals: Vec<RevealCard>,
    pub footer: Bounds,
}

impl PageLayout {
    pub fn new(viewport_height: f64) -> Self {
        let banner = Bounds::new(0.0, BANNER_HEIGHT);
        let hero = Bounds::new(banner.bottom(), viewport_height);
        let intro = Bounds::new(hero.bottom(), INTRO_HEIGHT);
        let tab_bar = Bounds::new(intro.bottom(), TAB_BAR_HEIGHT);

        let mut top = tab_bar.bottom();
        let mut sections = Vec::with_capacity(TabId::ALL.len());
        let mut reveals = Vec::new();
        for (tab, height) in TabId::ALL.into_iter().zip(SECTION_HEIGHTS) {
            let section = Bounds::new(top, height);
            for slot in 0..REVEALS_PER_SECTION {
                let offset = 200.0 + slot as f64 * (height - 200.0 - REVEAL_HEIGHT) / 1.5;
                reveals.push(RevealCard {
                    id: reveals.len(),
                    section: tab,
                    bounds: Bounds::new(top + offset, REVEAL_HEIGHT),
                });
            }
            sections.push((tab, section));
            top = section.bottom();
        }
        let footer = Bounds::new(top, FOOTER_HEIGHT);

        Self {
            banner,
            hero,
            intro,
            tab_bar,
            sections,
            reveals,
            footer,
        }
    }

    pub fn document_height(&self) -> f64 {
        self.footer.bottom()
    }

    pub fn section(&self, tab: TabId) -> Option<Bounds> {
        self.sections
            .iter()
            .find(|(t, _)| *t == tab)
            .map(|(_, b)| *b)
    }
}

/// Tab anchor boxes.  The docked bar is compact, so every anchor moves.
pub fn tab_anchor_geometry(tab: TabId, docked: bool) -> IndicatorGeometry {
    let (padding, char_px, inset, gap) = if docked {
        (8.0, 7.0, 16.0, 4.0)
    } else {
        (24.0, 8.0, 32.0, 8.0)
    };
    let width_of = |t: TabId| t.label().len() as f64 * char_px + inset;
    let offset_left = padding
        + TabId::ALL[..tab.index()]
            .iter()
            .map(|t| width_of(*t) + gap)
            .sum::<f64>();
    IndicatorGeometry {
        offset_left,
        width: width_of(tab),
    }
}

// ───────────────────────────────────────── sim page ──────────

/// A programmatic scroll the page was asked to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgrammaticScroll {
    pub y: f64,
    pub behavior: ScrollBehavior,
    pub at: Duration,
}

/// Callbacks that became due during one [`SimPage::advance`].
#[derive(Debug, Default)]
pub struct Due {
    pub scrolled: bool,
    pub timers: Vec<TimerHandle>,
    pub frames: Vec<FrameHandle>,
}

#[derive(Debug)]
pub struct SimPage {
    layout: PageLayout,
    viewport_height: f64,
    scroll_y: f64,
    unmounted: HashSet<Element>,
    layer_offsets: [f64; LAYER_COUNT],
    stage: HeroStage,
    tabs: TabSync,
    revealed: BTreeSet<RevealId>,
    smooth: SmoothScroll,
    frames: Vec<FrameHandle>,
    timers: Vec<(TimerHandle, Duration)>,
    next_handle: u64,
    now: Duration,
    scroll_log: VecDeque<ProgrammaticScroll>,
    scrolled: bool,
}

impl SimPage {
    pub fn new(viewport_height: f64) -> Self {
        let viewport_height = viewport_height.max(MIN_VIEWPORT);
        Self {
            layout: PageLayout::new(viewport_height),
            viewport_height,
            scroll_y: 0.0,
            unmounted: HashSet::new(),
            layer_offsets: [0.0; LAYER_COUNT],
            stage: HeroStage::default(),
            tabs: TabSync::new(),
            revealed: BTreeSet::new(),
            smooth: SmoothScroll::new(SMOOTH_SCROLL_SPEED),
            frames: Vec::new(),
            timers: Vec::new(),
            next_handle: 0,
            now: Duration::ZERO,
            scroll_log: VecDeque::with_capacity(SCROLL_LOG_LIMIT),
            scrolled: false,
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn reveal_targets(&self) -> Vec<RevealId> {
        self.layout.reveals.iter().map(|r| r.id).collect()
    }

    pub fn max_scroll(&self) -> f64 {
        (self.layout.document_height() - self.viewport_height).max(0.0)
    }

    /// Native scrolling for a wheel event the controller did not capture.
    /// An in-flight smooth scroll keeps its target.
    pub fn native_scroll_by(&mut self, delta_y: f64) {
        self.set_scroll(self.scroll_y + delta_y);
    }

    /// Scrollbar / keyboard jump; cancels any smooth scroll.
    pub fn jump_to(&mut self, y: f64) {
        self.smooth.cancel();
        self.set_scroll(y);
    }

    /// Relayout for a new viewport height.
    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(MIN_VIEWPORT);
        self.layout = PageLayout::new(self.viewport_height);
        if let Some(target) = self.smooth.target() {
            self.smooth.start(target.min(self.max_scroll()));
        }
        self.set_scroll(self.scroll_y);
    }

    /// Remove an element from the document (its lookups return `None`).
    pub fn unmount(&mut self, element: Element) {
        self.unmounted.insert(element);
    }

    pub fn remount(&mut self, element: Element) {
        self.unmounted.remove(&element);
    }

    /// Move the clock to `now`: step the smooth scroll and collect every
    /// timer and frame callback that is due.
    pub fn advance(&mut self, now: Duration) -> Due {
        self.now = now;
        if let Some(y) = self.smooth.tick(self.scroll_y) {
            self.set_scroll(y);
        }

        let mut timers: Vec<(TimerHandle, Duration)> = Vec::new();
        self.timers.retain(|&(handle, due)| {
            if due <= now {
                timers.push((handle, due));
                false
            } else {
                true
            }
        });
        timers.sort_by_key(|&(_, due)| due);

        Due {
            scrolled: std::mem::take(&mut self.scrolled),
            timers: timers.into_iter().map(|(h, _)| h).collect(),
            frames: std::mem::take(&mut self.frames),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn layer_offsets(&self) -> &[f64; LAYER_COUNT] {
        &self.layer_offsets
    }

    pub fn stage(&self) -> HeroStage {
        self.stage
    }

    pub fn tabs(&self) -> &TabSync {
        &self.tabs
    }

    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.revealed.contains(&id)
    }

    /// The most recent programmatic scrolls, oldest first.
    pub fn scroll_log(&self) -> &VecDeque<ProgrammaticScroll> {
        &self.scroll_log
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth.is_animating()
    }

    pub fn pending_callbacks(&self) -> usize {
        self.frames.len() + self.timers.len()
    }

    fn set_scroll(&mut self, y: f64) {
        let y = y.clamp(0.0, self.max_scroll());
        if y != self.scroll_y {
            self.scroll_y = y;
            self.scrolled = true;
        }
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Page for SimPage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounds(&self, element: Element) -> Option<Bounds> {
        if self.unmounted.contains(&element) {
            return None;
        }
        match element {
            Element::Hero => Some(self.layout.hero),
            Element::ParallaxLayer(layer) => (layer < LAYER_COUNT).then_some(self.layout.hero),
            Element::TabsHero => Some(self.layout.intro),
            Element::TabBar => Some(self.layout.tab_bar),
            Element::Section(tab) => self.layout.section(tab),
            Element::Reveal(id) => self
                .layout
                .reveals
                .iter()
                .find(|card| card.id == id)
                .map(|card| card.bounds),
        }
    }

    fn tab_anchor(&self, tab: TabId, docked: bool) -> Option<IndicatorGeometry> {
        if self.unmounted.contains(&Element::TabBar) {
            return None;
        }
        Some(tab_anchor_geometry(tab, docked))
    }

    fn set_layer_offset(&mut self, layer: usize, translate_y: f64) {
        if let Some(slot) = self.layer_offsets.get_mut(layer) {
            *slot = translate_y;
        }
    }

    fn set_hero_stage(&mut self, stage: HeroStage) {
        self.stage = stage;
    }

    fn set_tab_state(&mut self, tabs: &TabSync) {
        self.tabs = tabs.clone();
    }

    fn reveal(&mut self, id: RevealId) {
        self.revealed.insert(id);
    }

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        let target = y.clamp(0.0, self.max_scroll());
        if self.scroll_log.len() == SCROLL_LOG_LIMIT {
            self.scroll_log.pop_front();
        }
        self.scroll_log.push_back(ProgrammaticScroll {
            y,
            behavior,
            at: self.now,
        });
        match behavior {
            ScrollBehavior::Instant => {
                self.smooth.cancel();
                self.set_scroll(target);
            }
            ScrollBehavior::Smooth => self.smooth.start(target),
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle());
        self.timers.push((handle, self.now + delay));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn layout_stacks_blocks_in_order() {
        let layout = PageLayout::new(800.0);
        assert_relative_eq!(layout.hero.top, BANNER_HEIGHT);
        assert_relative_eq!(layout.hero.height, 800.0);
        assert_relative_eq!(layout.tab_bar.top, layout.intro.bottom());
        assert_relative_eq!(layout.sections[0].1.top, layout.tab_bar.bottom());
        for pair in layout.sections.windows(2) {
            assert_relative_eq!(pair[0].1.bottom(), pair[1].1.top);
        }
        assert_eq!(layout.reveals.len(), TabId::ALL.len() * REVEALS_PER_SECTION);
        for card in &layout.reveals {
            let section = layout.section(card.section).unwrap();
            assert!(card.bounds.top >= section.top && card.bounds.bottom() <= section.bottom());
        }
    }

    #[test]
    fn docked_anchors_are_compact() {
        let open = tab_anchor_geometry(TabId::Faq, false);
        let docked = tab_anchor_geometry(TabId::Faq, true);
        assert!(docked.offset_left < open.offset_left);
        assert!(docked.width < open.width);
        assert_relative_eq!(tab_anchor_geometry(TabId::Overview, false).offset_left, 24.0);
    }

    #[test]
    fn scroll_is_clamped_to_document() {
        let mut page = SimPage::new(800.0);
        page.native_scroll_by(-50.0);
        assert_relative_eq!(page.scroll_y(), 0.0);
        page.jump_to(1e9);
        assert_relative_eq!(page.scroll_y(), page.max_scroll());
    }

    #[test]
    fn timers_fire_in_due_order_and_only_once() {
        let mut page = SimPage::new(800.0);
        let late = page.set_timeout(Duration::from_millis(500));
        let early = page.set_timeout(Duration::from_millis(100));
        let due = page.advance(Duration::from_millis(600));
        assert_eq!(due.timers, vec![early, late]);
        assert!(page.advance(Duration::from_millis(700)).timers.is_empty());
    }

    #[test]
    fn cancelled_callbacks_never_fire() {
        let mut page = SimPage::new(800.0);
        let frame = page.request_frame();
        let timer = page.set_timeout(Duration::from_millis(10));
        page.cancel_frame(frame);
        page.clear_timeout(timer);
        let due = page.advance(Duration::from_secs(1));
        assert!(due.frames.is_empty());
        assert!(due.timers.is_empty());
    }

    #[test]
    fn smooth_scroll_settles_over_frames() {
        let mut page = SimPage::new(800.0);
        page.scroll_to(865.0, ScrollBehavior::Smooth);
        let mut now = Duration::ZERO;
        let mut saw_scroll = false;
        while page.is_smooth_scrolling() {
            now += Duration::from_millis(16);
            saw_scroll |= page.advance(now).scrolled;
        }
        assert!(saw_scroll);
        assert_relative_eq!(page.scroll_y(), 865.0);
        assert_eq!(page.scroll_log().len(), 1);
    }

    #[test]
    fn instant_scroll_cancels_smooth_scroll() {
        let mut page = SimPage::new(800.0);
        page.scroll_to(2000.0, ScrollBehavior::Smooth);
        page.advance(Duration::from_millis(16));
        page.scroll_to(300.0, ScrollBehavior::Instant);
        assert!(!page.is_smooth_scrolling());
        assert_relative_eq!(page.scroll_y(), 300.0);
        assert!(page.advance(Duration::from_millis(32)).scrolled);
        assert_relative_eq!(page.scroll_y(), 300.0);
    }

    #[test]
    fn scroll_log_keeps_only_recent_entries() {
        let mut page = SimPage::new(800.0);
        for i in 0..SCROLL_LOG_LIMIT + 5 {
            page.advance(Duration::from_millis(i as u64 * 16));
            page.scroll_to(i as f64, ScrollBehavior::Instant);
        }
        let log = page.scroll_log();
        assert_eq!(log.len(), SCROLL_LOG_LIMIT);
        assert_relative_eq!(log[0].y, 5.0);
        assert_eq!(log[0].at, Duration::from_millis(5 * 16));
        assert_eq!(log.back().map(|s| s.behavior), Some(ScrollBehavior::Instant));
    }

    #[test]
    fn unmounted_elements_have_no_bounds() {
        let mut page = SimPage::new(800.0);
        page.unmount(Element::Hero);
        assert!(page.bounds(Element::Hero).is_none());
        assert!(page.bounds(Element::ParallaxLayer(0)).is_some());
        page.remount(Element::Hero);
        assert!(page.bounds(Element::Hero).is_some());
    }
}
