//! Ideal Postcodes HTTP client
//!
//! Implements the AddressApi trait over the Ideal Postcodes REST API using
//! reqwest. Successful responses are memoized in a ResponseCache.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::cache::{ResponseCache, cache_key};
use super::{AddressApi, AutocompleteQuery, ClientOptions, LookupError};
use crate::address::{AddressRecord, AutocompleteResult, KeyStatus, Suggestion};

/// Default API host
pub const API_URL: &str = "api.ideal-postcodes.co.uk";

/// Default API version path segment
pub const API_VERSION: &str = "v1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// HTTP status the API uses when rate limiting
const RATE_LIMIT_STATUS: u16 = 503;

/// Connection settings for [`IdealPostcodesClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: String,
    pub version: String,
    pub tls: bool,
    pub timeout: Duration,
    /// Send the key in an Authorization header on autocomplete requests too.
    /// Off by default since the header forces a CORS preflight in browsers.
    pub strict_authorisation: bool,
    pub cache: bool,
}

impl ClientSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_URL.to_string(),
            version: API_VERSION.to_string(),
            tls: true,
            timeout: DEFAULT_TIMEOUT,
            strict_authorisation: false,
            cache: true,
        }
    }
}

/// Ideal Postcodes API client
#[derive(Debug)]
pub struct IdealPostcodesClient {
    http: Client,
    settings: ClientSettings,
    cache: ResponseCache,
}

impl IdealPostcodesClient {
    /// Create a new client
    ///
    /// Fails only if the underlying HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(settings: ClientSettings) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let cache = ResponseCache::new();
        if !settings.cache {
            cache.disable();
        }

        Ok(Self {
            http,
            settings,
            cache,
        })
    }

    /// Base URL of the versioned API, e.g. `https://api.ideal-postcodes.co.uk/v1`
    pub fn api_url(&self) -> String {
        let scheme = if self.settings.tls { "https" } else { "http" };
        format!(
            "{}://{}/{}",
            scheme, self.settings.base_url, self.settings.version
        )
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Authorization header value, e.g. `IDEALPOSTCODES api_key="iddqd"`
    fn authorization(&self) -> String {
        format!("IDEALPOSTCODES api_key=\"{}\"", self.settings.api_key)
    }

    fn options_query(options: &ClientOptions) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !options.filter.is_empty() {
            query.push(("filter", options.filter.join(",")));
        }
        if let Some(licensee) = &options.licensee {
            query.push(("licensee", licensee.clone()));
        }
        if !options.tags.is_empty() {
            query.push(("tags", options.tags.join(",")));
        }
        query
    }

    fn autocomplete_query(query: &AutocompleteQuery) -> Vec<(&'static str, String)> {
        let mut params = Self::options_query(&query.options);
        params.push(("query", query.query.clone()));
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if !query.filters.postcode_outward.is_empty() {
            params.push(("postcode_outward", query.filters.postcode_outward.join(",")));
        }
        if !query.filters.post_town.is_empty() {
            params.push(("post_town", query.filters.post_town.join(",")));
        }
        params
    }

    /// Build the autocomplete request
    pub(crate) fn autocomplete_request(
        &self,
        query: &AutocompleteQuery,
    ) -> Result<Request, LookupError> {
        let mut params = Self::autocomplete_query(query);
        let mut builder = self
            .http
            .get(format!("{}/autocomplete/addresses", self.api_url()))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if self.settings.strict_authorisation {
            builder = builder.header(AUTHORIZATION, self.authorization());
        } else {
            params.push(("api_key", self.settings.api_key.clone()));
        }

        builder
            .query(&params)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))
    }

    /// Build a request for a single resource, authorized by header
    pub(crate) fn resource_request(
        &self,
        path: &str,
        options: &ClientOptions,
    ) -> Result<Request, LookupError> {
        self.http
            .get(format!("{}/{}", self.api_url(), path))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, self.authorization())
            .query(&Self::options_query(options))
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))
    }

    /// Execute a request, returning the status and body text
    async fn send(&self, request: Request) -> Result<(u16, String), LookupError> {
        log::debug!("GET {}", request.url().path());
        let response = self
            .http
            .execute(request)
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok((status, body))
    }

    async fn resolve(
        &self,
        kind: IdKind,
        id: i64,
        options: &ClientOptions,
    ) -> Result<Option<AddressRecord>, LookupError> {
        let mut key_params = vec![("id", id.to_string())];
        if !options.filter.is_empty() {
            key_params.push(("filter", options.filter.join(",")));
        }
        let key = cache_key(&key_params);

        let cached = match kind {
            IdKind::Udprn => self.cache.get_udprn(&key),
            IdKind::Umprn => self.cache.get_umprn(&key),
        };
        if let Some(address) = cached {
            log::debug!("{} cache hit: {}", kind.path(), key);
            return Ok(Some(address));
        }

        let request = self.resource_request(&format!("{}/{}", kind.path(), id), options)?;
        let (status, body) = self.send(request).await?;

        if status == 404 {
            log::debug!("{} {} not found", kind.path(), id);
            return Ok(None);
        }

        let address: AddressRecord = decode(parse_response(status, &body)?)?;
        match kind {
            IdKind::Udprn => self.cache.put_udprn(key, address.clone()),
            IdKind::Umprn => self.cache.put_umprn(key, address.clone()),
        }
        Ok(Some(address))
    }
}

#[derive(Debug, Clone, Copy)]
enum IdKind {
    Udprn,
    Umprn,
}

impl IdKind {
    fn path(self) -> &'static str {
        match self {
            IdKind::Udprn => "udprn",
            IdKind::Umprn => "umprn",
        }
    }
}

fn transport_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Transport(e.to_string())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, LookupError> {
    serde_json::from_value(value).map_err(|e| LookupError::Parse(e.to_string()))
}

/// Interpret an API response
///
/// Returns the `result` member of a successful response (an empty object
/// for blank bodies), or the matching [`LookupError`] otherwise.
pub fn parse_response(status: u16, body: &str) -> Result<Value, LookupError> {
    if status == 200 {
        if body.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        let mut json: Value =
            serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
        return Ok(json
            .get_mut("result")
            .map(Value::take)
            .unwrap_or_else(|| Value::Object(Default::default())));
    }

    if status == RATE_LIMIT_STATUS {
        return Err(LookupError::RateLimited);
    }

    let json: Value = serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
    let code = json.get("code").and_then(Value::as_u64);
    let message = json.get("message").and_then(Value::as_str);
    match (code, message) {
        (Some(code), Some(message)) => Err(LookupError::Api {
            status,
            code: code as u32,
            message: message.to_string(),
        }),
        _ => Err(LookupError::Generic(status)),
    }
}

impl AddressApi for IdealPostcodesClient {
    async fn autocomplete(
        &self,
        query: &AutocompleteQuery,
    ) -> Result<Vec<Suggestion>, LookupError> {
        let key = cache_key(&Self::autocomplete_query(query));
        if let Some(hits) = self.cache.get_autocomplete(&key) {
            log::debug!("autocomplete cache hit: {}", key);
            return Ok(hits);
        }

        let request = self.autocomplete_request(query)?;
        let (status, body) = self.send(request).await?;
        let result: AutocompleteResult = decode(parse_response(status, &body)?)?;

        self.cache.put_autocomplete(key, result.hits.clone());
        Ok(result.hits)
    }

    async fn resolve_udprn(
        &self,
        id: i64,
        options: &ClientOptions,
    ) -> Result<Option<AddressRecord>, LookupError> {
        self.resolve(IdKind::Udprn, id, options).await
    }

    async fn resolve_umprn(
        &self,
        id: i64,
        options: &ClientOptions,
    ) -> Result<Option<AddressRecord>, LookupError> {
        self.resolve(IdKind::Umprn, id, options).await
    }

    async fn check_key(&self, options: &ClientOptions) -> Result<KeyStatus, LookupError> {
        let request = self.resource_request(&format!("keys/{}", self.settings.api_key), options)?;
        let (status, body) = self.send(request).await?;
        decode(parse_response(status, &body)?)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
