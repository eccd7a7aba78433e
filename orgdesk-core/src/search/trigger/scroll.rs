//! Scroll position trigger.

use super::{LoadMore, ViewportTrigger};

/// Geometry of a scrollable container at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Strict, so a tolerance of one unit only absorbs the fraction below it.
    /// A container a whole unit short of its bottom is not at the bottom.
    pub fn at_bottom(&self, tolerance: f64) -> bool {
        self.scroll_top + self.client_height > self.scroll_height - tolerance
    }
}

/// Loads more when the container has been scrolled to its bottom.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    tolerance: f64,
    attached: bool,
}

impl ScrollTrigger {
    /// `tolerance` absorbs fractional offsets when comparing against the
    /// container height.
    pub fn new(tolerance: f64) -> Self {
        ScrollTrigger {
            tolerance: tolerance.max(0.0),
            attached: false,
        }
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics, pager: &mut impl LoadMore) -> bool {
        if !self.attached || !metrics.at_bottom(self.tolerance) || !pager.has_next_page() {
            return false;
        }
        tracing::debug!(?metrics, "scrolled to bottom");
        pager.load_more()
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        ScrollTrigger::new(1.0)
    }
}

impl ViewportTrigger for ScrollTrigger {
    // The listener sits on the container, not on an item.
    fn on_render(&mut self, _last_item: Option<&str>) {
        self.attached = true;
    }

    fn release(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
