//! Immutable description of one REST call

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::http::TransportError;

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Json(Value),
    /// Serialization failed; surfaced when the request is built
    Unencodable(String),
}

/// One logical HTTP call before execution
///
/// Every builder method borrows `self` and returns a new descriptor, so a
/// base endpoint can be shared and specialized without being modified.
///
/// ```
/// use stickyboard_infra::api::Endpoint;
///
/// let base = Endpoint::get("Boards/search");
/// let search = base.with_query("keyword", Some("roadmap"));
/// assert!(base.query().is_empty());
/// assert_eq!(search.query().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    method: Method,
    path: String,
    query: BTreeMap<String, Option<String>>,
    headers: BTreeMap<String, String>,
    body: Option<Body>,
    requires_auth: bool,
}

impl Endpoint {
    /// Authenticated call with no query, headers or body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
            requires_auth: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Copy with `body` serialized as the JSON payload
    #[must_use]
    pub fn with_body<B: Serialize + ?Sized>(&self, body: &B) -> Self {
        let body = serde_json::to_value(body)
            .map_or_else(|e| Body::Unencodable(e.to_string()), Body::Json);
        Self { body: Some(body), ..self.clone() }
    }

    /// Copy with one query parameter set; `None` keeps the key but omits it
    /// from the URL
    #[must_use]
    pub fn with_query(&self, name: impl Into<String>, value: Option<&str>) -> Self {
        let mut next = self.clone();
        next.query.insert(name.into(), value.map(str::to_owned));
        next
    }

    /// Copy with one header set, replacing a previous value
    #[must_use]
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.headers.insert(name.into(), value.into());
        next
    }

    /// Copy with the access-token requirement toggled
    #[must_use]
    pub fn auth(&self, required: bool) -> Self {
        Self { requires_auth: required, ..self.clone() }
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declared query parameters, including absent ones
    #[must_use]
    pub const fn query(&self) -> &BTreeMap<String, Option<String>> {
        &self.query
    }

    /// Parameters that end up in the URL
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// JSON payload, if any
    ///
    /// # Errors
    /// `TransportError::Encode` when the body given to [`Self::with_body`]
    /// could not be serialized.
    pub fn json_body(&self) -> Result<Option<&Value>, TransportError> {
        match &self.body {
            None => Ok(None),
            Some(Body::Json(value)) => Ok(Some(value)),
            Some(Body::Unencodable(reason)) => Err(TransportError::Encode(reason.clone())),
        }
    }
}
