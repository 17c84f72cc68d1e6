//! Request construction from a route and the workspace settings.
//!
//! Building is pure: it reads nothing from storage and performs no I/O.
//! The caller resolves the base URL and auth setting first.

use crate::auth::{build_auth_headers, AuthConfig};
use crate::models::{HttpMethod, RequestSpec, Route};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use url::form_urlencoded;

/// Errors raised while turning user input into request parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The body text is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// The headers text is not a JSON object of strings.
    #[error("Invalid headers: {0}")]
    InvalidHeaders(String),
}

/// User-supplied request parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInput {
    /// Explicit headers. These win over auth and default headers.
    pub headers: HashMap<String, String>,
    /// JSON body.
    pub body: Option<Value>,
    /// Query parameters.
    pub query_params: BTreeMap<String, String>,
}

/// Whether requests with `method` carry a body.
pub fn method_accepts_body(method: HttpMethod) -> bool {
    method.accepts_body()
}

/// Builds the request for `route` against `base_url`.
///
/// The URL is the plain concatenation `base_url + route.path`. Headers are
/// the auth headers overlaid by `input.headers`.
///
/// # Examples
///
/// ```
/// use api_tester::auth::AuthConfig;
/// use api_tester::builder::{build_request, RequestInput};
/// use api_tester::models::{HttpMethod, Route};
/// use std::path::PathBuf;
///
/// let route = Route::new(HttpMethod::GET, "/users", PathBuf::new(), None);
/// let auth = AuthConfig::bearer("abc").unwrap();
/// let request = build_request(&route, "http://localhost:3000", &auth, RequestInput::default());
///
/// assert_eq!(request.url, "http://localhost:3000/users");
/// assert_eq!(request.header("authorization"), Some("Bearer abc"));
/// assert!(request.body.is_none());
/// ```
pub fn build_request(
    route: &Route,
    base_url: &str,
    auth: &AuthConfig,
    input: RequestInput,
) -> RequestSpec {
    build_request_with_defaults(route, base_url, auth, &HashMap::new(), input)
}

/// Like [`build_request`], with `defaults` as the lowest header layer.
pub fn build_request_with_defaults(
    route: &Route,
    base_url: &str,
    auth: &AuthConfig,
    defaults: &HashMap<String, String>,
    input: RequestInput,
) -> RequestSpec {
    let url = format!("{}{}", base_url, route.path);
    build_for_url(route.method, url, auth, defaults, input)
}

/// Builds a request for an already-assembled `url`.
///
/// Header layering, lowest first: `defaults`, auth headers, `input.headers`.
/// Names are compared case-insensitively, so a later layer replaces an
/// earlier header regardless of spelling.
pub fn build_for_url(
    method: HttpMethod,
    url: String,
    auth: &AuthConfig,
    defaults: &HashMap<String, String>,
    input: RequestInput,
) -> RequestSpec {
    let mut request = RequestSpec::new(method, url);

    for (name, value) in defaults {
        insert_header(&mut request.headers, name, value);
    }
    for (name, value) in &build_auth_headers(auth) {
        insert_header(&mut request.headers, name, value);
    }
    for (name, value) in &input.headers {
        insert_header(&mut request.headers, name, value);
    }

    if input.body.is_some() && request.content_type().is_none() {
        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
    }
    request.body = input.body;

    if !input.query_params.is_empty() {
        request.display_url = format!(
            "{}?{}",
            request.url,
            encode_query(&input.query_params)
        );
    }
    request.query_params = input.query_params;

    log::debug!("Built {} {}", request.method, request.display_url);
    request
}

fn insert_header(headers: &mut HashMap<String, String>, name: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}

/// Form-urlencodes `params` in key order.
pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Parses body text. Blank text means no body.
pub fn parse_body_input(text: &str) -> Result<Option<Value>, BuildError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| BuildError::InvalidBody(e.to_string()))
}

/// Parses headers text: a JSON object whose values are all strings.
pub fn parse_headers_input(text: &str) -> Result<HashMap<String, String>, BuildError> {
    if text.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| BuildError::InvalidHeaders(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(BuildError::InvalidHeaders(
            "expected a JSON object".to_string(),
        ));
    };

    map.into_iter()
        .map(|(name, value)| match value {
            Value::String(s) => Ok((name, s)),
            other => Err(BuildError::InvalidHeaders(format!(
                "value of `{}` must be a string, got {}",
                name, other
            ))),
        })
        .collect()
}

/// Parses `key=value&key=value` query text.
///
/// Pairs are URL-decoded. A pair with an empty key or value is dropped, and
/// a repeated key keeps its last value.
pub fn parse_query_input(text: &str) -> BTreeMap<String, String> {
    let text = text.trim();
    let text = text.strip_prefix('?').unwrap_or(text);

    form_urlencoded::parse(text.as_bytes())
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
