//! Page-tuned thresholds for the landing page's scroll choreography.
//!
//! These are fixed for one page layout and deliberately not part of the
//! user configuration.

use std::time::Duration;

// ── hero ──────────────────────────────────────────────────────

/// Progress value of the hero's final frame.
pub const MAX_PROGRESS: f64 = 2.5;
/// Progress change for one threshold crossing.
pub const PROGRESS_STEP: f64 = 0.1;
/// Accumulated wheel delta (px) that buys one progress step.
pub const WHEEL_STEP_THRESHOLD: f64 = 40.0;
/// Slack (px) around the hero's top edge for activation and re-entry.
pub const HERO_TOP_TOLERANCE: f64 = 10.0;
/// The exit scroll lands this far past the hero's bottom edge.
pub const EXIT_OVERSHOOT: f64 = 1.0;
/// How long the lock is held after the exit scroll is issued.
pub const SETTLE_DELAY: Duration = Duration::from_millis(600);
/// Length of the eased "Discover more" fast-forward.
pub const FAST_FORWARD_DURATION: Duration = Duration::from_millis(1200);
/// Progress values closer than this to a bound snap onto it.
pub const PROGRESS_EPSILON: f64 = 1e-9;

// ── parallax ──────────────────────────────────────────────────

/// Translation (px) of a speed-1.0 layer per unit of progress.
pub const PARALLAX_BASE_DISTANCE: f64 = 120.0;
/// Speed multiplier of each background layer, back to front.
pub const PARALLAX_LAYER_SPEEDS: [f64; 4] = [0.25, 0.5, 0.8, 1.2];

// ── section tabs ──────────────────────────────────────────────

/// The bar docks once the tabs-hero bottom is above this line (px from
/// the viewport top).
pub const DOCK_OFFSET: f64 = 72.0;
/// Distance (px) below the tab bar where the "current" band sits.
pub const BAND_OFFSET: f64 = 24.0;
/// Tab clicks land the section this far above the band so the previous
/// section's bottom edge no longer touches it.
pub const CLICK_NUDGE: f64 = 1.0;

// ── reveal ────────────────────────────────────────────────────

/// Visible fraction of an element that triggers its reveal.
pub const REVEAL_THRESHOLD: f64 = 0.15;
