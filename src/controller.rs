//! Autocomplete controller
//!
//! Owns the UI side of the widget: it receives host events, drives the
//! suggestion navigator, sends lookups to the worker thread, applies
//! responses that are still current and writes selected addresses into the
//! form. All user callbacks fire from here, on the host's thread.

use std::fmt;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use crate::address::{AddressRecord, KeyStatus, Suggestion};
use crate::api::{AddressApi, AutocompleteQuery, LookupError, SearchFilters};
use crate::config::ControllerOptions;
use crate::error::AutocompleteError;
use crate::events::{EventOutcome, UiEvent};
use crate::format::{remove_organisation, titleize_post_town};
use crate::navigator::{CloseReason, KeyAction, Navigator, NavigatorEvent};
use crate::output::FormFields;
use crate::sequencer::RequestSequencer;
use crate::worker::{WorkerRequest, WorkerResponse, WorkerSettings, spawn_worker};

/// Inline message shown when a search fails
pub const SUGGESTIONS_ERROR_MESSAGE: &str =
    "Unable to retrieve address suggestions. Please enter your address manually";

/// Inline message shown when resolving a selected address fails
pub const ADDRESS_ERROR_MESSAGE: &str =
    "Unable to retrieve your address. Please enter your address manually";

/// Why the key check kept the widget from attaching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCheckFailure {
    /// The API reported the key as not usable
    Unavailable,
    /// The check itself failed
    Transport(LookupError),
}

impl fmt::Display for KeyCheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCheckFailure::Unavailable => write!(f, "API key is not available"),
            KeyCheckFailure::Transport(e) => write!(f, "Key check failed: {}", e),
        }
    }
}

type Hook = Box<dyn FnMut()>;
type HookWith<T> = Box<dyn FnMut(&T)>;

/// User callbacks; every hook defaults to a no-op
pub struct Callbacks {
    on_open: Hook,
    on_close: Box<dyn FnMut(CloseReason)>,
    on_blur: Hook,
    on_focus: Hook,
    on_input: Box<dyn FnMut(&str)>,
    on_loaded: Hook,
    on_failed_check: HookWith<KeyCheckFailure>,
    on_suggestions_retrieved: Box<dyn FnMut(&[Suggestion], &AutocompleteQuery)>,
    on_address_selected: HookWith<Suggestion>,
    on_address_retrieved: HookWith<AddressRecord>,
    on_search_error: HookWith<LookupError>,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            on_open: Box::new(|| {}),
            on_close: Box::new(|_| {}),
            on_blur: Box::new(|| {}),
            on_focus: Box::new(|| {}),
            on_input: Box::new(|_| {}),
            on_loaded: Box::new(|| {}),
            on_failed_check: Box::new(|_| {}),
            on_suggestions_retrieved: Box::new(|_, _| {}),
            on_address_selected: Box::new(|_| {}),
            on_address_retrieved: Box::new(|_| {}),
            on_search_error: Box::new(|_| {}),
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The suggestion list was shown
    pub fn on_open(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_open = Box::new(f);
        self
    }

    /// The suggestion list was hidden
    pub fn on_close(mut self, f: impl FnMut(CloseReason) + 'static) -> Self {
        self.on_close = Box::new(f);
        self
    }

    pub fn on_blur(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_blur = Box::new(f);
        self
    }

    pub fn on_focus(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_focus = Box::new(f);
        self
    }

    /// Receives the current input text
    pub fn on_input(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_input = Box::new(f);
        self
    }

    /// The widget attached and is handling events
    pub fn on_loaded(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_loaded = Box::new(f);
        self
    }

    pub fn on_failed_check(mut self, f: impl FnMut(&KeyCheckFailure) + 'static) -> Self {
        self.on_failed_check = Box::new(f);
        self
    }

    /// Receives accepted hits and the search they answer, including its
    /// limit and filters
    pub fn on_suggestions_retrieved(
        mut self,
        f: impl FnMut(&[Suggestion], &AutocompleteQuery) + 'static,
    ) -> Self {
        self.on_suggestions_retrieved = Box::new(f);
        self
    }

    pub fn on_address_selected(mut self, f: impl FnMut(&Suggestion) + 'static) -> Self {
        self.on_address_selected = Box::new(f);
        self
    }

    /// Receives the address as returned, before organisation removal
    pub fn on_address_retrieved(mut self, f: impl FnMut(&AddressRecord) + 'static) -> Self {
        self.on_address_retrieved = Box::new(f);
        self
    }

    pub fn on_search_error(mut self, f: impl FnMut(&LookupError) + 'static) -> Self {
        self.on_search_error = Box::new(f);
        self
    }
}

/// Address autocomplete controller
pub struct Controller<F: FormFields> {
    options: ControllerOptions,
    callbacks: Callbacks,
    form: F,
    navigator: Navigator,
    sequencer: RequestSequencer,
    search_filters: SearchFilters,
    /// Current text of the input field
    input: String,
    attached: bool,
    request_tx: UnboundedSender<WorkerRequest>,
    response_rx: Receiver<WorkerResponse>,
}

impl<F: FormFields> fmt::Debug for Controller<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("input", &self.input)
            .field("attached", &self.attached)
            .field("navigator", &self.navigator)
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}

impl<F: FormFields> Controller<F> {
    /// Create a controller backed by `api`
    ///
    /// Starts the lookup worker. Unless `check_key` is set the widget
    /// attaches immediately and `on_loaded` fires before this returns.
    pub fn new<A>(
        options: ControllerOptions,
        callbacks: Callbacks,
        form: F,
        api: A,
    ) -> Result<Self, AutocompleteError>
    where
        A: AddressApi + 'static,
    {
        options.validate()?;

        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();
        let settings = WorkerSettings {
            debounce: options.debounce(),
            timeout: options.timeout(),
        };
        // The worker exits once the controller drops its request sender
        spawn_worker(api, settings, request_rx, response_tx)?;

        let mut controller = Self::with_channels(options, callbacks, form, request_tx, response_rx);
        controller.initialise();
        Ok(controller)
    }

    /// Build a controller around existing worker channels, without
    /// starting attachment
    fn with_channels(
        options: ControllerOptions,
        callbacks: Callbacks,
        form: F,
        request_tx: UnboundedSender<WorkerRequest>,
        response_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let search_filters = options.search_filters.clone();
        Self {
            options,
            callbacks,
            form,
            navigator: Navigator::new(),
            sequencer: RequestSequencer::new(),
            search_filters,
            input: String::new(),
            attached: false,
            request_tx,
            response_rx,
        }
    }

    /// Check the key if configured, otherwise attach
    fn initialise(&mut self) {
        if self.options.check_key {
            self.send(WorkerRequest::CheckKey {
                options: self.options.client_options(),
            });
        } else {
            self.attach();
        }
    }

    fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        log::debug!("Autocomplete attached");
        (self.callbacks.on_loaded)();
    }

    /// Stop handling events and hide the list
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.navigator.close(CloseReason::Explicit);
        self.process_navigator_events();
        self.attached = false;
        log::debug!("Autocomplete detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Mutable navigator access, for hosts that size the viewport
    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn search_filters(&self) -> &SearchFilters {
        &self.search_filters
    }

    /// Replace the filters applied to later searches
    pub fn set_search_filters(&mut self, filters: SearchFilters) {
        self.search_filters = filters;
    }

    /// Close the suggestion list
    pub fn close(&mut self) {
        self.navigator.close(CloseReason::Explicit);
        self.process_navigator_events();
    }

    /// Deliver a host UI event
    pub fn handle_event(&mut self, event: UiEvent) -> EventOutcome {
        if !self.attached {
            return EventOutcome::ignored();
        }

        let outcome = match event {
            UiEvent::Input(text) => {
                self.input = text;
                self.search();
                EventOutcome::ignored()
            }
            UiEvent::KeyDown(key) => match self.navigator.handle_key(key) {
                KeyAction::Ignored => EventOutcome::ignored(),
                KeyAction::Handled { prevent_default } => EventOutcome { prevent_default },
                KeyAction::ForwardInput => {
                    self.search();
                    EventOutcome::ignored()
                }
            },
            UiEvent::MouseDown { button, target } => {
                if self.navigator.handle_mouse_down(button, target) {
                    EventOutcome::handled()
                } else {
                    EventOutcome::ignored()
                }
            }
            UiEvent::Focus => {
                (self.callbacks.on_focus)();
                self.navigator.refresh();
                EventOutcome::ignored()
            }
            UiEvent::Blur => {
                (self.callbacks.on_blur)();
                self.navigator.close(CloseReason::Blur);
                EventOutcome::ignored()
            }
        };

        self.process_navigator_events();
        outcome
    }

    /// Issue a search for the current input text
    fn search(&mut self) {
        (self.callbacks.on_input)(&self.input);
        self.navigator.set_message(None);

        let token = self.sequencer.issue();
        let query = AutocompleteQuery {
            query: self.input.clone(),
            limit: self.options.limit,
            filters: self.search_filters.clone(),
            options: self.options.client_options(),
        };
        self.send(WorkerRequest::Search { query, token });
    }

    fn send(&self, request: WorkerRequest) {
        if self.request_tx.send(request).is_err() {
            log::error!("Lookup worker is gone, request dropped");
        }
    }

    /// Apply every response the worker has delivered so far
    ///
    /// Call this regularly from the host's event loop. Returns the number
    /// of responses handled.
    pub fn poll_responses(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.response_rx.try_recv() {
                Ok(response) => {
                    self.apply_response(response);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("Lookup worker disconnected");
                    break;
                }
            }
        }
        if handled > 0 {
            self.process_navigator_events();
        }
        handled
    }

    fn apply_response(&mut self, response: WorkerResponse) {
        match response {
            WorkerResponse::KeyCheck { result } => self.apply_key_check(result),
            // Late lookups after detach are dropped
            _ if !self.attached => {}
            WorkerResponse::Suggestions {
                token,
                query,
                result,
            } => {
                if !self.sequencer.accept(token) {
                    log::debug!("Dropping stale response {:?} for {:?}", token, query.query);
                    return;
                }
                match result {
                    Ok(hits) => {
                        (self.callbacks.on_suggestions_retrieved)(&hits, &query);
                        self.navigator.set_suggestions(hits);
                    }
                    Err(e) => {
                        log::debug!("Search for {:?} failed: {}", query.query, e);
                        self.navigator.set_message(Some(SUGGESTIONS_ERROR_MESSAGE));
                        (self.callbacks.on_search_error)(&e);
                    }
                }
            }
            WorkerResponse::Address { result } => match result {
                Ok(Some(address)) => {
                    (self.callbacks.on_address_retrieved)(&address);
                    if self.options.remove_organisation {
                        self.populate_address(&remove_organisation(&address));
                    } else {
                        self.populate_address(&address);
                    }
                }
                Ok(None) => log::debug!("Selected address not found"),
                Err(e) => {
                    log::debug!("Address lookup failed: {}", e);
                    self.navigator.set_message(Some(ADDRESS_ERROR_MESSAGE));
                    (self.callbacks.on_search_error)(&e);
                }
            },
        }
    }

    fn apply_key_check(&mut self, result: Result<KeyStatus, LookupError>) {
        match result {
            Ok(KeyStatus { available: true }) => self.attach(),
            Ok(KeyStatus { available: false }) => {
                log::debug!("API key not available");
                (self.callbacks.on_failed_check)(&KeyCheckFailure::Unavailable);
            }
            Err(e) => {
                log::debug!("Key check failed: {}", e);
                (self.callbacks.on_failed_check)(&KeyCheckFailure::Transport(e));
            }
        }
    }

    /// Turn queued navigator events into callbacks and lookups
    fn process_navigator_events(&mut self) {
        for event in self.navigator.drain_events() {
            match event {
                NavigatorEvent::Opened => (self.callbacks.on_open)(),
                NavigatorEvent::Closed(reason) => (self.callbacks.on_close)(reason),
                NavigatorEvent::Selected(suggestion) => self.select(suggestion),
            }
        }
    }

    fn select(&mut self, suggestion: Suggestion) {
        (self.callbacks.on_address_selected)(&suggestion);
        let options = self.options.client_options();
        let request = match suggestion.umprn {
            Some(id) => WorkerRequest::ResolveUmprn { id, options },
            None => WorkerRequest::ResolveUdprn {
                id: suggestion.udprn,
                options,
            },
        };
        self.send(request);
    }

    /// Write an address into every configured output field
    pub fn populate_address(&mut self, address: &AddressRecord) {
        for (attribute, selectors) in &self.options.output_fields {
            let mut value = address.text(attribute);
            if self.options.titleize_post_town && attribute == "post_town" {
                value = titleize_post_town(&value);
            }
            for selector in selectors.iter() {
                self.form.set_value(selector, &value);
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
