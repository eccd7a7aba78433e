//! A fixed-height window over a list, measured in terminal rows.

use std::ops::Range;

use orgdesk_core::search::ScrollMetrics;

/// One row per list item. Scrolling moves a whole window at a time.
#[derive(Debug, Clone)]
pub struct TerminalViewport {
    rows: usize,
    top: usize,
}

impl TerminalViewport {
    pub fn new(rows: usize) -> Self {
        TerminalViewport {
            rows: rows.max(1),
            top: 0,
        }
    }

    pub fn scroll_down(&mut self, total: usize) {
        self.top = (self.top + self.rows).min(total.saturating_sub(self.rows));
    }

    pub fn scroll_up(&mut self) {
        self.top = self.top.saturating_sub(self.rows);
    }

    pub fn reset(&mut self) {
        self.top = 0;
    }

    /// Indices of the items currently on screen.
    pub fn visible(&self, total: usize) -> Range<usize> {
        let start = self.top.min(total);
        start..(self.top + self.rows).min(total)
    }

    pub fn at_top(&self) -> bool {
        self.top == 0
    }

    pub fn metrics(&self, total: usize) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.top as f64,
            client_height: self.rows as f64,
            scroll_height: total as f64,
        }
    }
}
