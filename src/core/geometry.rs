//! Layout geometry read from the page.
//!
//! Element boxes are kept in document coordinates (CSS pixels from the top
//! of the page).  Viewport-relative values are derived on demand by
//! subtracting the current scroll position, which is what a bounding-box
//! query would return.

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top edge relative to the viewport top for the given scroll offset.
    pub fn viewport_top(&self, scroll_y: f64) -> f64 {
        self.top - scroll_y
    }

    /// Bottom edge relative to the viewport top for the given scroll offset.
    pub fn viewport_bottom(&self, scroll_y: f64) -> f64 {
        self.bottom() - scroll_y
    }

    /// Fraction of this element currently inside the viewport, in `[0, 1]`.
    /// Zero-height elements count as fully visible when their edge is inside.
    pub fn visible_ratio(&self, viewport: Viewport) -> f64 {
        let view_top = viewport.scroll_y;
        let view_bottom = viewport.scroll_y + viewport.height;
        if self.height == 0.0 {
            return if self.top >= view_top && self.top <= view_bottom {
                1.0
            } else {
                0.0
            };
        }
        let overlap = self.bottom().min(view_bottom) - self.top.max(view_top);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}

/// Current scroll position and viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

/// Where the sliding underline should sit inside the tab bar
/// (`offsetLeft` / `offsetWidth` of the active tab's anchor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorGeometry {
    pub offset_left: f64,
    pub width: f64,
}

/// How a programmatic scroll should travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}
