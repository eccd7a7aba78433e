//! Sentinel visibility trigger.

use super::{LoadMore, ViewportTrigger};

/// Watches the last rendered item and loads more when it becomes visible.
///
/// The sentinel is whatever item is rendered last, so its identity changes
/// every time a page lands. `on_render` re-targets the observation as soon
/// as that happens; no remount or polling is involved.
#[derive(Debug, Clone)]
pub struct IntersectionTrigger {
    threshold: f64,
    observed: Option<String>,
    /// The observed sentinel is currently past the threshold.
    visible: bool,
}

impl IntersectionTrigger {
    /// `threshold` is the fraction of the sentinel that must be visible,
    /// clamped to `0.0..=1.0`.
    pub fn new(threshold: f64) -> Self {
        IntersectionTrigger {
            threshold: threshold.clamp(0.0, 1.0),
            observed: None,
            visible: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn observed(&self) -> Option<&str> {
        self.observed.as_deref()
    }

    /// Intersection callback for `target` with its current visible ratio.
    ///
    /// Fires at most once per crossing: further callbacks while the
    /// sentinel stays visible are ignored until it drops below the
    /// threshold again. Callbacks for anything but the observed sentinel
    /// are ignored.
    ///
    /// If the fetch it started fails, the sentinel stays the same item and
    /// stays latched until `rearm` (which `SearchPanel::settle` calls on
    /// failure) or until it leaves and re-enters the viewport.
    pub fn on_intersection(&mut self, target: &str, ratio: f64, pager: &mut impl LoadMore) -> bool {
        if self.observed.as_deref() != Some(target) {
            return false;
        }

        if ratio < self.threshold {
            self.visible = false;
            return false;
        }
        if self.visible {
            return false;
        }
        self.visible = true;

        if !pager.has_next_page() {
            return false;
        }
        tracing::debug!(sentinel = target, ratio, "sentinel crossed threshold");
        pager.load_more()
    }
}

impl Default for IntersectionTrigger {
    fn default() -> Self {
        IntersectionTrigger::new(1.0)
    }
}

impl ViewportTrigger for IntersectionTrigger {
    fn on_render(&mut self, last_item: Option<&str>) {
        if self.observed.as_deref() == last_item {
            return;
        }

        tracing::debug!(from = ?self.observed, to = ?last_item, "re-targeting sentinel");
        self.observed = last_item.map(str::to_string);
        self.visible = false;
    }

    fn release(&mut self) {
        self.observed = None;
        self.visible = false;
    }

    fn is_attached(&self) -> bool {
        self.observed.is_some()
    }

    fn rearm(&mut self) {
        self.visible = false;
    }
}
