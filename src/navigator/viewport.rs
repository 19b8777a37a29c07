//! Scroll geometry of the suggestion list
//!
//! Rows have a uniform height. Units are whatever the host measures in:
//! terminal lines for the TUI, pixels for a browser binding.

use std::ops::Range;

/// Rows visible without scrolling in a fresh viewport
const DEFAULT_VISIBLE_ROWS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    scroll_top: u32,
    client_height: u32,
    row_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE_ROWS, 1)
    }
}

impl Viewport {
    pub fn new(client_height: u32, row_height: u32) -> Self {
        Self {
            scroll_top: 0,
            client_height,
            row_height: row_height.max(1),
        }
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn client_height(&self) -> u32 {
        self.client_height
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn set_client_height(&mut self, height: u32) {
        self.client_height = height;
    }

    pub fn reset(&mut self) {
        self.scroll_top = 0;
    }

    /// Offset of a row's top edge from the top of the list
    pub fn row_top(&self, index: usize) -> u32 {
        (index as u32).saturating_mul(self.row_height)
    }

    /// Scroll just enough to bring a row fully into view
    ///
    /// Rows already inside the visible window leave the scroll offset alone.
    pub fn scroll_into_view(&mut self, index: usize) {
        let top = self.row_top(index);
        if top < self.scroll_top {
            self.scroll_top = top;
        }
        let bottom = top.saturating_add(self.row_height);
        if bottom > self.scroll_top.saturating_add(self.client_height) {
            self.scroll_top = bottom.saturating_sub(self.client_height);
        }
    }

    /// Indices of rows at least partly visible, clamped to `row_count`
    pub fn visible_rows(&self, row_count: usize) -> Range<usize> {
        let first = (self.scroll_top / self.row_height) as usize;
        let last = self
            .scroll_top
            .saturating_add(self.client_height)
            .div_ceil(self.row_height) as usize;
        first.min(row_count)..last.min(row_count)
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod viewport_tests;
