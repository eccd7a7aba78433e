//! Strategies that decide when the list needs its next page.
//!
//! Both strategies only read `has_next_page` and call `load_more`; the
//! engine's own reentrancy guard absorbs any extra calls.

mod intersection;
mod scroll;

pub use intersection::IntersectionTrigger;
pub use scroll::{ScrollMetrics, ScrollTrigger};

/// The slice of a paginated list a trigger is allowed to touch.
pub trait LoadMore {
    fn has_next_page(&self) -> bool;

    /// Ask for the next page. Returns whether a fetch was actually issued.
    fn load_more(&mut self) -> bool;
}

/// Lifecycle shared by every trigger strategy.
pub trait ViewportTrigger {
    /// Called synchronously after every render commit with the id of the
    /// item currently rendered last.
    fn on_render(&mut self, last_item: Option<&str>);

    /// Stop observing. Called on unmount and whenever a new query epoch
    /// begins; the next `on_render` attaches again.
    fn release(&mut self);

    fn is_attached(&self) -> bool;

    /// Forget that the current target already fired. The panel calls this
    /// when a fetch fails so the same target can trigger the retry.
    fn rearm(&mut self) {}
}
