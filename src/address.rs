//! Address data types
//!
//! Suggestions returned by the autocomplete endpoint and the full PAF
//! address records returned by the UDPRN/UMPRN endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every address attribute the API can return, and so every attribute an
/// output field may be bound to.
pub const ADDRESS_ATTRIBUTES: &[&str] = &[
    "postcode",
    "postcode_inward",
    "postcode_outward",
    "post_town",
    "dependant_locality",
    "double_dependant_locality",
    "thoroughfare",
    "dependant_thoroughfare",
    "building_number",
    "building_name",
    "sub_building_name",
    "po_box",
    "department_name",
    "organisation_name",
    "udprn",
    "umprn",
    "postcode_type",
    "su_organisation_indicator",
    "delivery_point_suffix",
    "line_1",
    "line_2",
    "line_3",
    "premise",
    "longitude",
    "latitude",
    "eastings",
    "northings",
    "country",
    "traditional_county",
    "administrative_county",
    "postal_county",
    "county",
    "district",
    "ward",
];

/// Check whether `name` is a known address attribute
pub fn is_address_attribute(name: &str) -> bool {
    ADDRESS_ATTRIBUTES.contains(&name)
}

/// A single address suggestion from the autocomplete API
///
/// e.g. `"9 Lerwick Court, 9 Village Road, Enfield, EN1"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text presented to the user
    pub suggestion: String,
    /// ID of the address on the PAF mainfile
    pub udprn: i64,
    /// ID of the address on the Multiple Residence file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umprn: Option<i64>,
}

impl Suggestion {
    pub fn new(suggestion: impl Into<String>, udprn: i64) -> Self {
        Self {
            suggestion: suggestion.into(),
            udprn,
            umprn: None,
        }
    }

    pub fn with_umprn(mut self, umprn: i64) -> Self {
        self.umprn = Some(umprn);
        self
    }
}

/// Result payload of the autocomplete endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteResult {
    #[serde(default)]
    pub hits: Vec<Suggestion>,
}

/// Key usability payload of the keys endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct KeyStatus {
    pub available: bool,
}

/// A full address record
///
/// Values are passed through to output fields untouched, apart from the
/// post town and organisation handling in [`crate::format`]. Numeric
/// attributes (udprn, latitude, eastings, ...) keep their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressRecord {
    fields: Map<String, Value>,
}

impl AddressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(attribute, text)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self { fields }
    }

    /// Raw JSON value of an attribute
    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.fields.get(attr)
    }

    /// Attribute rendered as text
    ///
    /// Missing and null attributes render as an empty string, numbers and
    /// booleans as their JSON text.
    pub fn text(&self, attr: &str) -> String {
        match self.fields.get(attr) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn set(&mut self, attr: &str, value: impl Into<String>) {
        self.fields
            .insert(attr.to_string(), Value::String(value.into()));
    }

    pub fn line_1(&self) -> String {
        self.text("line_1")
    }

    pub fn line_2(&self) -> String {
        self.text("line_2")
    }

    pub fn line_3(&self) -> String {
        self.text("line_3")
    }

    pub fn post_town(&self) -> String {
        self.text("post_town")
    }

    pub fn organisation_name(&self) -> String {
        self.text("organisation_name")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod address_tests;
