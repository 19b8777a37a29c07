use std::cell::RefCell;
use std::rc::Rc;

use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::TextArea;

use idpc_autocomplete::{
    AutocompleteError, Callbacks, Controller, ControllerOptions, FieldValues, UiEvent,
};

/// Suggestion rows shown before the list scrolls
pub const MAX_VISIBLE_ROWS: u16 = 8;

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The address search input
    Input,
    /// The populated address fields
    Form,
}

/// Screen areas from the last render, used for mouse hit testing
#[derive(Debug, Clone, Copy, Default)]
pub struct Regions {
    pub input: Rect,
    /// Suggestion list including its border, when shown
    pub list: Option<Rect>,
    /// Row area inside the list border
    pub list_inner: Option<Rect>,
}

/// Application state
pub struct App {
    pub controller: Controller<FieldValues>,
    pub textarea: TextArea<'static>,
    pub focus: Focus,
    pub regions: Regions,
    /// Last status line, written by the controller callbacks
    pub status: Rc<RefCell<String>>,
    should_quit: bool,
}

impl App {
    /// Create the app and attach the autocomplete controller
    ///
    /// A non-empty `query` is typed into the input straight away.
    pub fn new(options: ControllerOptions, query: Option<&str>) -> Result<Self, AutocompleteError> {
        let status = Rc::new(RefCell::new(String::new()));
        let controller = idpc_autocomplete::init(
            options,
            status_callbacks(&status),
            FieldValues::new(),
        )?;

        let mut textarea = TextArea::default();
        // Remove default underline from cursor line
        textarea.set_cursor_line_style(Style::default());

        let mut app = Self {
            controller,
            textarea,
            focus: Focus::Input,
            regions: Regions::default(),
            status,
            should_quit: false,
        };
        app.controller
            .navigator_mut()
            .set_visible_height(MAX_VISIBLE_ROWS as u32);
        app.controller.handle_event(UiEvent::Focus);

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            app.textarea.insert_str(query);
            app.controller
                .handle_event(UiEvent::Input(query.to_string()));
        }
        Ok(app)
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Get the current search text
    pub fn query(&self) -> &str {
        self.textarea.lines()[0].as_ref()
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    /// Apply lookup responses that arrived since the last frame
    pub fn tick(&mut self) {
        self.controller.poll_responses();
    }

    /// Value shown for an address attribute, from its first selector
    pub fn field_value(&self, attribute: &str) -> &str {
        self.controller
            .options()
            .output_fields
            .get(attribute)
            .and_then(|selectors| selectors.iter().next())
            .and_then(|selector| self.controller.form().value(selector))
            .unwrap_or("")
    }

    /// Print the populated address, one attribute per line
    pub fn print_address(&self) {
        if self.controller.form().is_empty() {
            return;
        }
        for attribute in self.controller.options().output_fields.keys() {
            println!("{}: {}", attribute, self.field_value(attribute));
        }
    }
}

fn status_callbacks(status: &Rc<RefCell<String>>) -> Callbacks {
    let setter = |status: &Rc<RefCell<String>>| {
        let status = Rc::clone(status);
        move |text: String| *status.borrow_mut() = text
    };
    let (loaded, failed, retrieved, selected, address, error) = (
        setter(status),
        setter(status),
        setter(status),
        setter(status),
        setter(status),
        setter(status),
    );

    Callbacks::new()
        .on_loaded(move || loaded("Start typing an address or postcode".to_string()))
        .on_failed_check(move |failure| failed(failure.to_string()))
        .on_suggestions_retrieved(move |hits, query| {
            retrieved(format!("{} matches for \"{}\"", hits.len(), query.query))
        })
        .on_address_selected(move |s| selected(format!("Retrieving {}", s.suggestion)))
        .on_address_retrieved(move |a| address(format!("Retrieved {}", a.line_1())))
        .on_search_error(move |e| error(e.to_string()))
}
