//! Reveal-on-intersect: one-shot visibility flags for decorative elements.

use crate::constants::REVEAL_THRESHOLD;
use crate::core::geometry::{Bounds, Viewport};

/// Identifier of a decorative element watched for reveal.
pub type RevealId = usize;

/// Elements still waiting to enter the viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevealSet {
    pending: Vec<RevealId>,
}

impl RevealSet {
    pub fn new(targets: impl IntoIterator<Item = RevealId>) -> Self {
        let mut pending: Vec<RevealId> = targets.into_iter().collect();
        pending.sort_unstable();
        pending.dedup();
        Self { pending }
    }

    /// Reveal every pending element that is sufficiently visible.  Revealed
    /// ids are returned once and never observed again; unmounted elements
    /// stay pending.
    pub fn observe<F>(&mut self, viewport: Viewport, bounds: F) -> Vec<RevealId>
    where
        F: Fn(RevealId) -> Option<Bounds>,
    {
        let mut revealed = Vec::new();
        self.pending.retain(|&id| {
            let visible = bounds(id)
                .map(|b| b.visible_ratio(viewport) >= REVEAL_THRESHOLD)
                .unwrap_or(false);
            if visible {
                revealed.push(id);
            }
            !visible
        });
        revealed
    }

    pub fn pending(&self) -> &[RevealId] {
        &self.pending
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }
}
