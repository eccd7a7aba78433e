//! A search session paired with the trigger that pages it.

use super::engine::Indicator;
use super::page::{FetchFailure, Identified};
use super::session::{PageSource, SearchSession};
use super::trigger::{IntersectionTrigger, ScrollMetrics, ScrollTrigger, ViewportTrigger};

/// Host-side glue for one search list.
///
/// The host calls `set_term` on every keystroke, `commit_render` after
/// every render, and forwards viewport events to the trigger through
/// `on_intersection` / `on_scroll`. After `unmount` every call is a no-op.
pub struct SearchPanel<S: PageSource, V> {
    session: SearchSession<S>,
    trigger: V,
    mounted: bool,
}

impl<S, V> SearchPanel<S, V>
where
    S: PageSource + 'static,
    S::Item: 'static,
    V: ViewportTrigger,
{
    pub fn new(session: SearchSession<S>, trigger: V) -> Self {
        SearchPanel {
            session,
            trigger,
            mounted: false,
        }
    }

    /// Mount with the empty term, the way the panel first opens.
    pub fn mount(&mut self) {
        self.mounted = true;
        self.set_term("");
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        if !self.mounted {
            return;
        }
        self.trigger.release();
        self.session.set_term(term);
    }

    /// Let the trigger follow the list as it is now rendered.
    pub fn commit_render(&mut self) {
        if !self.mounted {
            return;
        }
        let last = self.session.items().last().map(|item| item.id());
        self.trigger.on_render(last);
    }

    /// Apply every in-flight fetch, then commit the resulting render.
    /// A failure re-arms the trigger so the same target can retry.
    pub async fn settle(&mut self) -> Option<FetchFailure> {
        let failure = self.session.settle().await;
        if failure.is_some() && self.mounted {
            self.trigger.rearm();
        }
        self.commit_render();
        failure
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.trigger.release();
        self.session.teardown();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn items(&self) -> &[S::Item] {
        self.session.items()
    }

    pub fn indicator(&self) -> Indicator {
        self.session.indicator()
    }

    pub fn session(&self) -> &SearchSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SearchSession<S> {
        &mut self.session
    }

    pub fn trigger(&self) -> &V {
        &self.trigger
    }
}

impl<S> SearchPanel<S, IntersectionTrigger>
where
    S: PageSource + 'static,
    S::Item: 'static,
{
    pub fn on_intersection(&mut self, target: &str, ratio: f64) -> bool {
        if !self.mounted {
            return false;
        }
        self.trigger.on_intersection(target, ratio, &mut self.session)
    }
}

impl<S> SearchPanel<S, ScrollTrigger>
where
    S: PageSource + 'static,
    S::Item: 'static,
{
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.mounted {
            return false;
        }
        self.trigger.on_scroll(metrics, &mut self.session)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::search::testing::{ScriptedSource, user_ids};

    fn intersection_panel(source: ScriptedSource, page_size: u32) -> SearchPanel<ScriptedSource, IntersectionTrigger> {
        SearchPanel::new(SearchSession::new(source, page_size), IntersectionTrigger::new(1.0))
    }

    #[tokio::test(start_paused = true)]
    async fn sentinel_follows_new_last_item_without_remount() {
        let source = ScriptedSource::new()
            .page("", None, &["A", "B"], Some("c1"))
            .page("", Some("c1"), &["C"], Some("c2"))
            .page("", Some("c2"), &["D"], None);
        let mut panel = intersection_panel(source, 2);

        panel.mount();
        panel.settle().await;
        assert_eq!(panel.trigger().observed(), Some("B"));

        assert!(panel.on_intersection("B", 1.0));
        panel.settle().await;
        assert_eq!(panel.trigger().observed(), Some("C"));

        // B is off the hook; C is the sentinel now.
        assert!(!panel.on_intersection("B", 1.0));
        assert!(panel.on_intersection("C", 1.0));
        panel.settle().await;

        assert_eq!(user_ids(panel.items()), ["A", "B", "C", "D"]);
        assert_eq!(panel.indicator(), Indicator::NoMoreResults);
        assert!(!panel.on_intersection("D", 1.0));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_next_page_retries_from_same_sentinel() {
        let source = ScriptedSource::new()
            .page("", None, &["A", "B"], Some("c1"))
            .failing_page("", Some("c1"), "connection reset")
            .page("", Some("c1"), &["C"], None);
        let mut panel = intersection_panel(source, 2);

        panel.mount();
        panel.settle().await;

        assert!(panel.on_intersection("B", 1.0));
        assert!(panel.settle().await.is_some());
        assert_eq!(panel.trigger().observed(), Some("B"));

        // B never left the viewport; the next callback retries.
        assert!(panel.on_intersection("B", 1.0));
        assert!(panel.settle().await.is_none());
        assert_eq!(user_ids(panel.items()), ["A", "B", "C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn jittery_callbacks_issue_one_fetch() {
        let source = Rc::new(
            ScriptedSource::new()
                .page("", None, &["A", "B"], Some("c1"))
                .delayed_page("", Some("c1"), &["C"], None, Duration::from_millis(100)),
        );
        let session = SearchSession::with_shared_source(Rc::clone(&source), 2);
        let mut panel = SearchPanel::new(session, IntersectionTrigger::new(1.0));

        panel.mount();
        panel.settle().await;

        let fired = [1.0, 1.0, 0.2, 1.0, 1.0]
            .into_iter()
            .filter(|&ratio| panel.on_intersection("B", ratio))
            .count();
        assert_eq!(fired, 1);

        panel.settle().await;
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn term_change_releases_sentinel() {
        let source = ScriptedSource::new()
            .page("", None, &["A", "B"], Some("c1"))
            .page("bob", None, &["X"], Some("x1"));
        let mut panel = intersection_panel(source, 2);

        panel.mount();
        panel.settle().await;
        assert_eq!(panel.trigger().observed(), Some("B"));

        panel.set_term("bob");
        assert!(!panel.trigger().is_attached());
        assert!(!panel.on_intersection("B", 1.0));

        panel.settle().await;
        assert_eq!(panel.trigger().observed(), Some("X"));
    }

    #[tokio::test(start_paused = true)]
    async fn scroll_panel_pages_at_bottom() {
        let source = ScriptedSource::new()
            .page("ann", None, &["A", "B", "C", "D", "E"], Some("c1"))
            .page("ann", Some("c1"), &["F"], None);
        let mut panel = SearchPanel::new(SearchSession::new(source, 5), ScrollTrigger::new(1.0));

        panel.mount();
        panel.set_term("ann");
        panel.settle().await;

        let halfway = ScrollMetrics {
            scroll_top: 1.0,
            client_height: 3.0,
            scroll_height: 5.0,
        };
        assert!(!panel.on_scroll(halfway));

        let bottom = ScrollMetrics {
            scroll_top: 2.0,
            ..halfway
        };
        assert!(panel.on_scroll(bottom));
        assert!(!panel.on_scroll(bottom));
        panel.settle().await;

        assert_eq!(user_ids(panel.items()), ["A", "B", "C", "D", "E", "F"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_releases_everything() {
        let source = ScriptedSource::new()
            .page("", None, &["A", "B"], Some("c1"))
            .delayed_page("", Some("c1"), &["C"], None, Duration::from_millis(100));
        let mut panel = intersection_panel(source, 2);

        panel.mount();
        panel.settle().await;
        assert!(panel.on_intersection("B", 1.0));

        panel.unmount();
        assert!(!panel.trigger().is_attached());
        assert_eq!(panel.session().pending(), 0);
        assert!(panel.items().is_empty());

        panel.commit_render();
        panel.set_term("ann");
        assert!(!panel.trigger().is_attached());
        assert!(!panel.on_intersection("B", 1.0));
    }
}
