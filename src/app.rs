mod app_events;
mod app_render;
mod app_state;

pub use app_state::App;

#[cfg(test)]
pub mod test_helpers {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use idpc_autocomplete::{ControllerOptions, Suggestion};

    use super::App;

    /// App with no reachable API; tests never tick, so lookups are not applied
    pub fn test_app() -> App {
        let mut options = ControllerOptions::new("iddqd")
            .with_output("line_1", "#line_1")
            .with_output("post_town", "#post_town")
            .with_output("postcode", "#postcode");
        options.base_url = "127.0.0.1:9".to_string();
        options.tls = false;
        options.timeout_ms = 100;
        App::new(options, None).unwrap()
    }

    pub fn app_with_suggestions(count: usize) -> App {
        let mut app = test_app();
        app.controller
            .navigator_mut()
            .set_suggestions(suggestions(count));
        app
    }

    pub fn suggestions(count: usize) -> Vec<Suggestion> {
        (0..count)
            .map(|i| {
                Suggestion::new(
                    format!("{} Downing Street, London, SW1A", i + 1),
                    23747771 + i as i64,
                )
            })
            .collect()
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }
}
