//! Viewport smooth scroll with exponential ease-out.
//!
//! Stands in for the browser's `behavior: "smooth"`.  When a target is set
//! the remaining distance decays by a fixed fraction each frame, so the
//! viewport moves fast at first and settles gently.

/// Programmatic smooth-scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Where the viewport is heading, `None` when idle.
    target: Option<f64>,
    /// Fraction of the remaining distance covered per frame.
    /// Good range: 0.15–0.35 at 60 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            target: None,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Start (or retarget) a smooth scroll.
    pub fn start(&mut self, target: f64) {
        self.target = Some(target);
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Advance one frame from `current`.  Returns the new position while
    /// animating; snaps onto the target once within half a pixel.
    pub fn tick(&mut self, current: f64) -> Option<f64> {
        let target = self.target?;
        let remaining = target - current;
        if remaining.abs() < 0.5 {
            self.target = None;
            return Some(target);
        }
        Some(current + remaining * self.speed)
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<f64> {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn idle_animator_does_nothing() {
        let mut s = SmoothScroll::new(0.25);
        assert_eq!(s.tick(100.0), None);
        assert!(!s.is_animating());
    }

    #[test]
    fn converges_and_snaps_to_target() {
        let mut s = SmoothScroll::new(0.25);
        s.start(865.0);
        let mut y = 64.0;
        let mut frames = 0;
        while let Some(next) = s.tick(y) {
            assert!(next >= y);
            y = next;
            frames += 1;
            assert!(frames < 200);
        }
        assert_relative_eq!(y, 865.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn speed_is_clamped() {
        let mut s = SmoothScroll::new(5.0);
        s.start(100.0);
        let next = s.tick(0.0).unwrap();
        assert_relative_eq!(next, 95.0);
    }
}
