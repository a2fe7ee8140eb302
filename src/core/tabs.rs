//! Sticky section-tab synchronizer.
//!
//! Scroll position is the single source of truth: the docked flag and the
//! current tab are derived from element boxes on every scroll tick, and a
//! tab click only requests a scroll.  The indicator geometry is re-read
//! whenever the current tab or the docked flag changes, because docking
//! re-lays out the bar.

use crate::constants::{BAND_OFFSET, CLICK_NUDGE, DOCK_OFFSET};
use crate::core::geometry::{Bounds, IndicatorGeometry};

/// Content sections of the landing page, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Overview,
    Fees,
    Process,
    Success,
    Faq,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Overview,
        TabId::Fees,
        TabId::Process,
        TabId::Success,
        TabId::Faq,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TabId::Overview => "Overview",
            TabId::Fees => "Fees",
            TabId::Process => "How it works",
            TabId::Success => "Success stories",
            TabId::Faq => "FAQ",
        }
    }

    /// Short identifier used in replay scripts and traces.
    pub fn key(self) -> &'static str {
        match self {
            TabId::Overview => "overview",
            TabId::Fees => "fees",
            TabId::Process => "process",
            TabId::Success => "success",
            TabId::Faq => "faq",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        TabId::ALL
            .into_iter()
            .find(|tab| tab.key().eq_ignore_ascii_case(s))
    }

    pub fn index(self) -> usize {
        TabId::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        TabId::ALL[(self.index() + 1) % TabId::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let n = TabId::ALL.len();
        TabId::ALL[(self.index() + n - 1) % n]
    }
}

/// Element boxes the synchronizer reads on one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TabGeometry {
    pub scroll_y: f64,
    /// The block whose bottom edge decides docking.
    pub tabs_hero: Option<Bounds>,
    pub tab_bar: Option<Bounds>,
    /// Sections in document order; `None` when not mounted.
    pub sections: Vec<(TabId, Option<Bounds>)>,
}

/// Docked when the anchor's bottom edge is above [`DOCK_OFFSET`].
/// Single threshold; there is no dead zone.
pub fn is_docked(scroll_y: f64, tabs_hero: Bounds) -> bool {
    tabs_hero.viewport_bottom(scroll_y) < DOCK_OFFSET
}

/// Viewport-relative y of the "current" band.
pub fn band(tab_bar: Bounds) -> f64 {
    tab_bar.height + BAND_OFFSET
}

/// First section (document order) straddling the band.
pub fn current_section(
    scroll_y: f64,
    band: f64,
    sections: &[(TabId, Option<Bounds>)],
) -> Option<TabId> {
    sections.iter().find_map(|(tab, bounds)| {
        let b = (*bounds)?;
        (b.viewport_top(scroll_y) <= band && b.viewport_bottom(scroll_y) >= band).then_some(*tab)
    })
}

/// Scroll target that puts `section` just inside the band.
pub fn click_target(section: Bounds, tab_bar: Bounds) -> f64 {
    (section.top - band(tab_bar) + CLICK_NUDGE).max(0.0)
}

/// UI state owned by the synchronizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabSync {
    pub current: Option<TabId>,
    pub docked: bool,
    pub indicator: Option<IndicatorGeometry>,
}

impl TabSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive docked/current from `geo`.  When either changed the
    /// indicator is re-read through `anchor`.  Returns whether anything
    /// visible changed.
    pub fn sync<F>(&mut self, geo: &TabGeometry, anchor: F) -> bool
    where
        F: Fn(TabId, bool) -> Option<IndicatorGeometry>,
    {
        let docked = geo
            .tabs_hero
            .map(|b| is_docked(geo.scroll_y, b))
            .unwrap_or(self.docked);

        let current = geo
            .tab_bar
            .and_then(|bar| current_section(geo.scroll_y, band(bar), &geo.sections))
            .or(self.current);

        if docked == self.docked && current == self.current {
            return false;
        }
        self.docked = docked;
        self.current = current;

        if let Some(tab) = current {
            if let Some(geometry) = anchor(tab, docked) {
                self.indicator = Some(geometry);
            }
        }
        true
    }

    /// Re-read the indicator without any state change (layout changed).
    pub fn refresh_indicator<F>(&mut self, anchor: F) -> bool
    where
        F: Fn(TabId, bool) -> Option<IndicatorGeometry>,
    {
        let Some(tab) = self.current else {
            return false;
        };
        match anchor(tab, self.docked) {
            Some(geometry) if Some(geometry) != self.indicator => {
                self.indicator = Some(geometry);
                true
            }
            _ => false,
        }
    }
}
