//! Suggestion list navigation
//!
//! A small state machine over the rendered suggestion rows: open/closed
//! visibility, the highlighted row, keyboard and pointer handling, and the
//! inline message overlay used for errors.
//!
//! Visibility changes and selections are queued as [`NavigatorEvent`]s and
//! drained by the controller, which turns them into user callbacks.

use crate::address::Suggestion;
use crate::events::{Key, MouseButton, MouseTarget};

mod viewport;

pub use viewport::Viewport;

/// One rendered row of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Suggestion { text: String, highlighted: bool },
    /// Inline message; never selectable
    Message { text: String },
}

impl Row {
    pub fn text(&self) -> &str {
        match self {
            Row::Suggestion { text, .. } | Row::Message { text } => text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Row::Suggestion { highlighted: true, .. })
    }

    fn set_highlighted(&mut self, value: bool) {
        if let Row::Suggestion { highlighted, .. } = self {
            *highlighted = value;
        }
    }
}

/// Why the list was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Refreshed with nothing to show
    Empty,
    Blur,
    Escape,
    Select,
    /// Closed by the host
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorEvent {
    Opened,
    Closed(CloseReason),
    Selected(Suggestion),
}

/// What the navigator did with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Not handled; the host keeps its default behaviour
    Ignored,
    /// Handled by the list
    Handled { prevent_default: bool },
    /// Should be treated as a fresh input event
    ForwardInput,
}

/// Suggestion list state
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    /// Last real suggestion list
    suggestions: Vec<Suggestion>,
    /// Rows currently rendered
    rows: Vec<Row>,
    /// Highlighted row (None = no selection)
    highlight: Option<usize>,
    open: bool,
    /// Rows currently hold a message instead of suggestions
    showing_message: bool,
    viewport: Viewport,
    events: Vec<NavigatorEvent>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn message(&self) -> Option<&str> {
        if self.showing_message {
            self.rows.first().map(Row::text)
        } else {
            None
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Resize the visible window, keeping the highlighted row in view
    pub fn set_visible_height(&mut self, height: u32) {
        self.viewport.set_client_height(height);
        if let Some(index) = self.highlight {
            self.viewport.scroll_into_view(index);
        }
    }

    /// Take the queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<NavigatorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the suggestion list and re-render
    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.refresh();
    }

    /// Rebuild rows from the last suggestion list
    ///
    /// Clears the highlight and any message. Opens the list when there is
    /// something to show, closes it otherwise.
    pub fn refresh(&mut self) {
        self.highlight = None;
        self.showing_message = false;
        self.viewport.reset();
        self.rows = self
            .suggestions
            .iter()
            .map(|s| Row::Suggestion {
                text: s.suggestion.clone(),
                highlighted: false,
            })
            .collect();

        if self.rows.is_empty() {
            self.close(CloseReason::Empty);
        } else {
            self.open();
        }
    }

    /// Show a message in place of the suggestions
    ///
    /// `None` or an empty message restores the suggestions.
    pub fn set_message(&mut self, message: Option<&str>) {
        let Some(text) = message.filter(|m| !m.is_empty()) else {
            self.refresh();
            return;
        };
        self.highlight = None;
        self.showing_message = true;
        self.viewport.reset();
        self.rows = vec![Row::Message {
            text: text.to_string(),
        }];
        self.open();
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.events.push(NavigatorEvent::Opened);
    }

    pub fn close(&mut self, reason: CloseReason) {
        if !self.open {
            return;
        }
        self.open = false;
        self.events.push(NavigatorEvent::Closed(reason));
    }

    /// Number of rows that can be highlighted
    fn selectable_len(&self) -> usize {
        if self.showing_message {
            0
        } else {
            self.rows.len()
        }
    }

    /// Highlight the next row, wrapping from last to first
    pub fn next(&mut self) {
        let count = self.selectable_len();
        if !self.open || count == 0 {
            return;
        }
        let index = match self.highlight {
            Some(current) => (current + 1) % count,
            None => 0,
        };
        self.goto(index);
    }

    /// Highlight the previous row, wrapping from first (or none) to last
    pub fn previous(&mut self) {
        let count = self.selectable_len();
        if !self.open || count == 0 {
            return;
        }
        let index = match self.highlight {
            Some(current) if current > 0 => current - 1,
            _ => count - 1,
        };
        self.goto(index);
    }

    /// Highlight a row and scroll it into view
    pub fn goto(&mut self, index: usize) {
        if index >= self.selectable_len() {
            return;
        }
        if let Some(previous) = self.highlight {
            self.rows[previous].set_highlighted(false);
        }
        self.highlight = Some(index);
        self.rows[index].set_highlighted(true);
        self.viewport.scroll_into_view(index);
    }

    /// Commit the highlighted suggestion
    ///
    /// A clicked row becomes the highlight first. Without a highlight this
    /// does nothing.
    pub fn select(&mut self, clicked: Option<usize>) {
        if let Some(index) = clicked
            && index < self.selectable_len()
        {
            if let Some(previous) = self.highlight {
                self.rows[previous].set_highlighted(false);
            }
            self.highlight = Some(index);
            self.rows[index].set_highlighted(true);
        }

        let Some(index) = self.highlight else {
            return;
        };
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            return;
        };
        self.events.push(NavigatorEvent::Selected(suggestion));
        self.close(CloseReason::Select);
    }

    /// Apply the keyboard policy; only active while open
    pub fn handle_key(&mut self, key: Key) -> KeyAction {
        if !self.open {
            return KeyAction::Ignored;
        }
        match key {
            Key::Enter if self.highlight.is_some() => {
                self.select(None);
                KeyAction::Handled {
                    prevent_default: true,
                }
            }
            Key::Backspace => KeyAction::ForwardInput,
            Key::Escape => {
                self.close(CloseReason::Escape);
                KeyAction::Handled {
                    prevent_default: false,
                }
            }
            Key::Up => {
                self.previous();
                KeyAction::Handled {
                    prevent_default: true,
                }
            }
            Key::Down => {
                self.next();
                KeyAction::Handled {
                    prevent_default: true,
                }
            }
            _ => KeyAction::Ignored,
        }
    }

    /// Apply the pointer policy
    ///
    /// Only a primary press on a row of an open list selects. Returns
    /// whether the press was consumed.
    pub fn handle_mouse_down(&mut self, button: MouseButton, target: MouseTarget) -> bool {
        if !self.open {
            return false;
        }
        match (button, target) {
            (MouseButton::Primary, MouseTarget::Row(index)) if index < self.rows.len() => {
                self.select(Some(index));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod navigator_tests;
