//! Response cache
//!
//! Flat, process-lifetime memoization of successful API responses. Each
//! operation has its own store, keyed by a canonical concatenation of the
//! request parameters that affect the result.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::address::{AddressRecord, Suggestion};

/// Parameters that take part in a cache key, in key order
const CACHE_ARGUMENTS: &[&str] = &[
    "id",
    "postcode",
    "query",
    "limit",
    "page",
    "post_town",
    "postcode_outward",
    "filter",
];

/// Build the canonical cache key for a set of request parameters
///
/// Parameters are emitted as `name=value` joined by `|`, in a fixed order
/// regardless of input order. Parameters outside the key set are ignored.
pub fn cache_key(params: &[(&str, String)]) -> String {
    CACHE_ARGUMENTS
        .iter()
        .filter_map(|arg| {
            params
                .iter()
                .find(|(name, _)| name == arg)
                .map(|(name, value)| format!("{name}={value}"))
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[derive(Debug)]
struct Store<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V: Clone> Store<V> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn insert(&self, key: String, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, value);
    }

    fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }
}

/// Cache of autocomplete and id lookup results
#[derive(Debug)]
pub struct ResponseCache {
    active: AtomicBool,
    autocomplete: Store<Vec<Suggestion>>,
    udprn: Store<AddressRecord>,
    umprn: Store<AddressRecord>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
            autocomplete: Store::new(),
            udprn: Store::new(),
            umprn: Store::new(),
        }
    }

    pub fn enable(&self) {
        self.active.store(true, Ordering::Relaxed);
    }

    pub fn disable(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    pub fn get_autocomplete(&self, key: &str) -> Option<Vec<Suggestion>> {
        self.is_active().then(|| self.autocomplete.get(key)).flatten()
    }

    pub fn put_autocomplete(&self, key: String, hits: Vec<Suggestion>) {
        if self.is_active() {
            self.autocomplete.insert(key, hits);
        }
    }

    pub fn get_udprn(&self, key: &str) -> Option<AddressRecord> {
        self.is_active().then(|| self.udprn.get(key)).flatten()
    }

    pub fn put_udprn(&self, key: String, address: AddressRecord) {
        if self.is_active() {
            self.udprn.insert(key, address);
        }
    }

    pub fn get_umprn(&self, key: &str) -> Option<AddressRecord> {
        self.is_active().then(|| self.umprn.get(key)).flatten()
    }

    pub fn put_umprn(&self, key: String, address: AddressRecord) {
        if self.is_active() {
            self.umprn.insert(key, address);
        }
    }

    /// Total number of cached responses across all stores
    pub fn len(&self) -> usize {
        self.autocomplete.len() + self.udprn.len() + self.umprn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
