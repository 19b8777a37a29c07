// Configuration type definitions

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::api::{API_URL, API_VERSION, ClientOptions, ClientSettings, SearchFilters};
use crate::debouncer::DEFAULT_DEBOUNCE;
use crate::format::split_selectors;

/// One or more output field selectors
///
/// Accepts either a comma separated string or an array in TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "SelectorList")]
pub struct Selectors(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectorList {
    Joined(String),
    List(Vec<String>),
}

impl From<SelectorList> for Selectors {
    fn from(list: SelectorList) -> Self {
        match list {
            SelectorList::Joined(joined) => Selectors(split_selectors(&joined)),
            SelectorList::List(list) => Selectors(list),
        }
    }
}

impl From<&str> for Selectors {
    fn from(joined: &str) -> Self {
        Selectors(split_selectors(joined))
    }
}

impl From<Vec<String>> for Selectors {
    fn from(list: Vec<String>) -> Self {
        Selectors(list)
    }
}

impl Selectors {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerOptions {
    pub api_key: String,
    /// Selector of the input the user types into
    pub input_field: Option<String>,
    /// Address attribute to the selectors that receive it
    pub output_fields: BTreeMap<String, Selectors>,
    /// Verify the key before attaching the interface
    pub check_key: bool,
    pub remove_organisation: bool,
    pub titleize_post_town: bool,
    /// Maximum suggestions per search; the API decides when unset
    pub limit: Option<u32>,
    pub licensee: Option<String>,
    pub filter: Vec<String>,
    pub tags: Vec<String>,
    pub search_filters: SearchFilters,
    pub debounce_ms: u64,
    pub timeout_ms: u64,
    pub base_url: String,
    pub tls: bool,
    pub version: String,
    pub strict_authorisation: bool,
    pub cache: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            api_key: String::new(),
            input_field: None,
            output_fields: BTreeMap::new(),
            check_key: false,
            remove_organisation: false,
            titleize_post_town: false,
            limit: None,
            licensee: None,
            filter: Vec::new(),
            tags: Vec::new(),
            search_filters: SearchFilters::default(),
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            timeout_ms: 10_000,
            base_url: API_URL.to_string(),
            tls: true,
            version: API_VERSION.to_string(),
            strict_authorisation: false,
            cache: true,
        }
    }
}

impl ControllerOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        ControllerOptions {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Bind an address attribute to one or more selectors
    pub fn with_output(mut self, attribute: &str, selectors: impl Into<Selectors>) -> Self {
        self.output_fields
            .insert(attribute.to_string(), selectors.into());
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            licensee: self.licensee.clone(),
            filter: self.filter.clone(),
            tags: self.tags.clone(),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            version: self.version.clone(),
            tls: self.tls,
            timeout: self.timeout(),
            strict_authorisation: self.strict_authorisation,
            cache: self.cache,
        }
    }
}
