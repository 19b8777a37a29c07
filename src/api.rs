//! Address API abstraction
//!
//! Defines the AddressApi trait, the LookupError taxonomy, and the request
//! option types shared by every implementation.

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use crate::address::{AddressRecord, KeyStatus, Suggestion};

pub mod cache;
mod client;

pub use client::{
    API_URL, API_VERSION, ClientSettings, DEFAULT_TIMEOUT, IdealPostcodesClient, parse_response,
};

/// Errors that can occur during address API calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No response arrived within the request timeout
    #[error("Request timed out")]
    Timeout,

    /// The response body could not be parsed
    #[error("Unable to parse JSON response: {0}")]
    Parse(String),

    /// Structured error returned by the API
    #[error("API error ({code}): {message}")]
    Api {
        status: u16,
        code: u32,
        message: String,
    },

    /// The API is rate limiting this client
    #[error("Rate Limit Reached. Please wait a while before you retry your request")]
    RateLimited,

    /// Error status without a structured error body
    #[error("Unknown error occurred when accessing API (status {0})")]
    Generic(u16),

    /// Network failure below the HTTP layer
    #[error("Network error: {0}")]
    Transport(String),
}

/// Options forwarded to the API on every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Sublicensee key
    pub licensee: Option<String>,
    /// Restrict returned attributes
    pub filter: Vec<String>,
    /// Tags attached to the request for usage reporting
    pub tags: Vec<String>,
}

/// Filters narrowing autocomplete results
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub postcode_outward: Vec<String>,
    pub post_town: Vec<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.postcode_outward.is_empty() && self.post_town.is_empty()
    }
}

/// A single autocomplete search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteQuery {
    pub query: String,
    pub limit: Option<u32>,
    pub filters: SearchFilters,
    pub options: ClientOptions,
}

impl AutocompleteQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Remote address lookup service
///
/// Every operation resolves asynchronously. A missing address on the id
/// lookups is an empty success (`Ok(None)`), not an error.
pub trait AddressApi: Send + Sync {
    /// Search for address suggestions matching free text
    fn autocomplete(
        &self,
        query: &AutocompleteQuery,
    ) -> impl Future<Output = Result<Vec<Suggestion>, LookupError>> + Send;

    /// Resolve a suggestion by its UDPRN
    fn resolve_udprn(
        &self,
        id: i64,
        options: &ClientOptions,
    ) -> impl Future<Output = Result<Option<AddressRecord>, LookupError>> + Send;

    /// Resolve a suggestion by its UMPRN
    fn resolve_umprn(
        &self,
        id: i64,
        options: &ClientOptions,
    ) -> impl Future<Output = Result<Option<AddressRecord>, LookupError>> + Send;

    /// Check whether the API key can currently be used
    fn check_key(
        &self,
        options: &ClientOptions,
    ) -> impl Future<Output = Result<KeyStatus, LookupError>> + Send;
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
