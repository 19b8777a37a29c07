//! Output field binding
//!
//! Retrieved addresses are written into the host's form through
//! [`FormFields`], one call per configured selector.

use std::collections::HashMap;

/// Writable form fields addressed by selector
pub trait FormFields {
    fn set_value(&mut self, selector: &str, value: &str);
}

/// In-memory form, keyed by selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, selector: &str) -> Option<&str> {
        self.values.get(selector).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl FormFields for FieldValues {
    fn set_value(&mut self, selector: &str, value: &str) {
        self.values.insert(selector.to_string(), value.to_string());
    }
}

impl<F: FormFields + ?Sized> FormFields for &mut F {
    fn set_value(&mut self, selector: &str, value: &str) {
        (**self).set_value(selector, value);
    }
}
