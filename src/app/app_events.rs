//! Terminal event handling
//!
//! Translates crossterm key and mouse events into widget [`UiEvent`]s and
//! edits of the search input.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton as TermButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use idpc_autocomplete::{Key, MouseButton, MouseTarget, UiEvent};

use super::app_state::{App, Focus};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Form => match key.code {
                KeyCode::Tab | KeyCode::BackTab => self.focus_input(),
                KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                _ => {}
            },
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.focus_form(),
            KeyCode::Esc => {
                if self.controller.navigator().is_open() {
                    self.controller.handle_event(UiEvent::KeyDown(Key::Escape));
                } else {
                    self.quit();
                }
            }
            // Single line input: these never reach the textarea
            KeyCode::Enter => {
                self.controller.handle_event(UiEvent::KeyDown(Key::Enter));
            }
            KeyCode::Up => {
                self.controller.handle_event(UiEvent::KeyDown(Key::Up));
            }
            KeyCode::Down => {
                self.controller.handle_event(UiEvent::KeyDown(Key::Down));
            }
            KeyCode::Backspace => {
                self.controller
                    .handle_event(UiEvent::KeyDown(Key::Backspace));
                self.edit(key);
            }
            _ => {
                self.controller.handle_event(UiEvent::KeyDown(Key::Other));
                self.edit(key);
            }
        }
    }

    /// Apply a key to the textarea, reporting any text change as input
    fn edit(&mut self, key: KeyEvent) {
        let before = self.query().to_string();
        self.textarea.input(key);
        if self.query() != before {
            let text = self.query().to_string();
            self.controller.handle_event(UiEvent::Input(text));
        }
    }

    fn focus_input(&mut self) {
        if self.focus != Focus::Input {
            self.focus = Focus::Input;
            self.controller.handle_event(UiEvent::Focus);
        }
    }

    fn focus_form(&mut self) {
        if self.focus != Focus::Form {
            self.focus = Focus::Form;
            self.controller.handle_event(UiEvent::Blur);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let MouseEventKind::Down(button) = mouse.kind else {
            return;
        };
        let position = Position::new(mouse.column, mouse.row);

        // Presses on the list never move focus away from the input
        if let Some(list) = self.regions.list
            && list.contains(position)
        {
            let target = self.list_target(position);
            self.controller.handle_event(UiEvent::MouseDown {
                button: map_button(button),
                target,
            });
            return;
        }

        if self.regions.input.contains(position) {
            self.focus_input();
        } else {
            self.focus_form();
        }
    }

    /// Resolve a press inside the list to the row under it
    fn list_target(&self, position: Position) -> MouseTarget {
        match self.regions.list_inner {
            Some(inner) if inner.contains(position) => {
                let scroll_top = self.controller.navigator().viewport().scroll_top() as usize;
                MouseTarget::Row(scroll_top + (position.y - inner.y) as usize)
            }
            _ => MouseTarget::List,
        }
    }
}

fn map_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Primary,
        TermButton::Right => MouseButton::Secondary,
        TermButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
