//! Tunables for the recommendation engine.

/// Default width of the tolerance band above the minimum workload.
pub const DEFAULT_PARENT_TOLERANCE: usize = 2;

/// Policy knobs for candidate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationPolicy {
    parent_tolerance: usize,
}

impl RecommendationPolicy {
    /// Creates a policy with the given parent-executor tolerance.
    #[must_use]
    pub const fn new(parent_tolerance: usize) -> Self {
        Self { parent_tolerance }
    }

    /// How many active tasks above the minimum a parent's executor may carry
    /// and still be considered for continuity.
    #[must_use]
    pub const fn parent_tolerance(self) -> usize {
        self.parent_tolerance
    }

    /// Upper bound, inclusive, of the tolerance band for a given minimum.
    #[must_use]
    pub const fn tolerance_ceiling(self, minimum: usize) -> usize {
        minimum.saturating_add(self.parent_tolerance)
    }
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PARENT_TOLERANCE)
    }
}
