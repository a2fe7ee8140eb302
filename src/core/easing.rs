//! Easing curves for programmatic hero playback.

/// Cubic ease-in-out: slow start, fast middle, slow settle.
/// Input is clamped to `[0, 1]`; output is monotonic over that range.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation from `a` to `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn endpoints_are_exact() {
        assert_relative_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_relative_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_relative_eq!(ease_in_out_cubic(0.5), 0.5);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_relative_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_relative_eq!(ease_in_out_cubic(7.0), 1.0);
    }

    #[test]
    fn curve_is_monotonic() {
        let mut prev = ease_in_out_cubic(0.0);
        for i in 1..=200 {
            let v = ease_in_out_cubic(i as f64 / 200.0);
            assert!(v >= prev, "not monotonic at step {i}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn curve_is_symmetric() {
        for i in 0..=10 {
            let x = i as f64 / 20.0;
            let sum = ease_in_out_cubic(0.5 - x) + ease_in_out_cubic(0.5 + x);
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_relative_eq!(lerp(1.0, 2.5, 0.0), 1.0);
        assert_relative_eq!(lerp(1.0, 2.5, 1.0), 2.5);
    }
}
