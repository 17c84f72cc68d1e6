//! Outgoing request descriptor.

use super::route::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A fully built request, ready to hand to the executor.
///
/// Constructed fresh for every send and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Unique identifier tagging the executor's log lines for this request.
    pub id: String,

    /// HTTP method.
    pub method: HttpMethod,

    /// Absolute URL without the query string (`base_url + route.path`).
    pub url: String,

    /// URL shown to the user, including the encoded query string when
    /// query parameters are present.
    pub display_url: String,

    /// Request headers, auth headers already merged in.
    pub headers: HashMap<String, String>,

    /// Parsed JSON body.
    pub body: Option<Value>,

    /// Query parameters actually transmitted by the executor.
    pub query_params: BTreeMap<String, String>,
}

impl RequestSpec {
    /// Creates a request with no headers, body or query parameters.
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            method,
            display_url: url.clone(),
            url,
            headers: HashMap::new(),
            body: None,
            query_params: BTreeMap::new(),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}
