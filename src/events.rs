//! Host UI events delivered to the controller

/// Keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Escape,
    Up,
    Down,
    /// Any other key; never handled by the widget
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// What a pointer press landed on
///
/// The host resolves presses on a row's descendants to the row itself,
/// giving the row's ordinal position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTarget {
    Row(usize),
    /// The list container itself, between or around rows
    List,
}

/// Input from the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The input field's text changed
    Input(String),
    KeyDown(Key),
    MouseDown {
        button: MouseButton,
        target: MouseTarget,
    },
    Focus,
    Blur,
}

/// How the host should treat the event after the widget saw it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Suppress the host's default action (form submit, caret move, ...)
    pub prevent_default: bool,
}

impl EventOutcome {
    pub fn handled() -> Self {
        Self {
            prevent_default: true,
        }
    }

    pub fn ignored() -> Self {
        Self::default()
    }
}
