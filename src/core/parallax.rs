//! Parallax layer translation for the hero background.
//!
//! Each layer moves `progress × base distance × speed` pixels upward, so
//! faster layers read as closer to the viewer.

use crate::constants::{PARALLAX_BASE_DISTANCE, PARALLAX_LAYER_SPEEDS};
use crate::core::hero::Progress;

/// Number of background layers on the hero.
pub const LAYER_COUNT: usize = PARALLAX_LAYER_SPEEDS.len();

/// Vertical translation (px, negative is up) of `layer` at `progress`.
/// Unknown layers do not move.
pub fn layer_offset(progress: Progress, layer: usize) -> f64 {
    PARALLAX_LAYER_SPEEDS
        .get(layer)
        .map(|speed| -(progress.value() * PARALLAX_BASE_DISTANCE * speed))
        .unwrap_or(0.0)
}

/// Offsets for every layer, back to front.
pub fn layer_offsets(progress: Progress) -> [f64; LAYER_COUNT] {
    std::array::from_fn(|layer| layer_offset(progress, layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_progress_leaves_layers_in_place() {
        for offset in layer_offsets(Progress::ZERO) {
            assert_relative_eq!(offset, 0.0);
        }
    }

    #[test]
    fn translation_scales_with_layer_speed() {
        let offsets = layer_offsets(Progress::new(2.0));
        assert_relative_eq!(offsets[0], -60.0);
        assert_relative_eq!(offsets[3], -288.0);
        assert!(offsets.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn unknown_layer_is_static() {
        assert_relative_eq!(layer_offset(Progress::MAX, 99), 0.0);
    }
}
