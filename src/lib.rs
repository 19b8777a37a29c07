//! Address autocomplete for the Ideal Postcodes API
//!
//! A headless widget core: the host feeds UI events to a [`Controller`],
//! renders its [`Navigator`] and receives selected addresses through
//! [`FormFields`]. Lookups run on a background worker thread.

pub mod address;
pub mod api;
pub mod config;
pub mod controller;
pub mod debouncer;
pub mod error;
pub mod events;
pub mod format;
pub mod navigator;
pub mod output;
pub mod sequencer;
pub mod worker;


pub use address::{AddressRecord, Suggestion};
pub use api::{AddressApi, IdealPostcodesClient, LookupError, SearchFilters};
pub use config::ControllerOptions;
pub use controller::{Callbacks, Controller, KeyCheckFailure};
pub use error::AutocompleteError;
pub use events::{EventOutcome, Key, MouseButton, MouseTarget, UiEvent};
pub use navigator::Navigator;
pub use output::{FieldValues, FormFields};

/// Create a controller talking to the Ideal Postcodes API
pub fn init<F: FormFields>(
    options: ControllerOptions,
    callbacks: Callbacks,
    form: F,
) -> Result<Controller<F>, AutocompleteError> {
    options.validate()?;
    let client = IdealPostcodesClient::new(options.client_settings())?;
    Controller::new(options, callbacks, form, client)
}
