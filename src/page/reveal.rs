/// Selector for the content blocks that fade in on first sight
pub const REVEAL_TARGETS: &str = ".card, .features-section .col-md-4";
/// Class added to a block once it has been revealed
pub const REVEAL_CLASS: &str = "fade-in";

/// Intersection settings for the scroll reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of a block that must be visible
    pub threshold: f64,
    /// Blocks only count once they clear this much of the viewport bottom
    pub bottom_margin: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }
}

impl RevealOptions {
    /// `rootMargin` value for an `IntersectionObserver`
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }

    /// Whether a block at `top` (relative to the viewport) with `height` counts as in view
    pub fn is_intersecting(&self, top: f64, height: f64, viewport_height: f64) -> bool {
        let limit = viewport_height - self.bottom_margin;
        if height <= 0.0 {
            return top >= 0.0 && top <= limit;
        }
        let visible = (top + height).min(limit) - top.max(0.0);
        visible > 0.0 && visible / height >= self.threshold
    }
}

/// One-shot reveal bookkeeping: a block is revealed the first time it
/// intersects and is never observed again afterwards
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    observed: Vec<K>,
    revealed: Vec<K>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            observed: Vec::new(),
            revealed: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq> RevealTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, target: K) {
        if !self.observed.contains(&target) && !self.revealed.contains(&target) {
            self.observed.push(target);
        }
    }

    pub fn is_observed(&self, target: &K) -> bool {
        self.observed.contains(target)
    }

    pub fn is_revealed(&self, target: &K) -> bool {
        self.revealed.contains(target)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Process intersection reports; returns the blocks revealed by this batch
    pub fn on_entries(&mut self, entries: impl IntoIterator<Item = (K, bool)>) -> Vec<K> {
        let mut newly = Vec::new();
        for (target, intersecting) in entries {
            if !intersecting {
                continue;
            }
            let Some(pos) = self.observed.iter().position(|t| *t == target) else {
                continue;
            };
            let target = self.observed.swap_remove(pos);
            self.revealed.push(target.clone());
            newly.push(target);
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_margin_shrinks_viewport_bottom() {
        assert_eq!(RevealOptions::default().root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn intersection_respects_margin_and_threshold() {
        let options = RevealOptions::default();
        // viewport 800px tall, effective bottom at 750px
        assert!(options.is_intersecting(100.0, 200.0, 800.0));
        assert!(!options.is_intersecting(760.0, 200.0, 800.0));
        assert!(!options.is_intersecting(740.0, 200.0, 800.0));
        assert!(options.is_intersecting(730.0, 200.0, 800.0));
        assert!(!options.is_intersecting(-500.0, 200.0, 800.0));
    }

    #[test]
    fn blocks_reveal_once() {
        let mut tracker = RevealTracker::new();
        tracker.observe("card-1");
        tracker.observe("card-2");

        assert_eq!(tracker.on_entries([("card-1", false), ("card-2", true)]), vec!["card-2"]);
        assert!(tracker.is_revealed(&"card-2"));
        assert!(!tracker.is_observed(&"card-2"));

        assert!(tracker.on_entries([("card-2", true)]).is_empty());
        assert_eq!(tracker.on_entries([("card-1", true)]), vec!["card-1"]);
        assert_eq!(tracker.observed_count(), 0);
    }

    #[test]
    fn revealed_blocks_are_not_observed_again() {
        let mut tracker = RevealTracker::new();
        tracker.observe(1);
        tracker.on_entries([(1, true)]);
        tracker.observe(1);
        assert!(!tracker.is_observed(&1));
    }
}
