//! Route data models.
//!
//! A [`Route`] is one HTTP endpoint recovered from a controller file. Routes
//! carry no identity across scans: every refresh discards the previous set
//! and builds a new one.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP methods recognized by the route scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP DELETE method - remove a resource
    DELETE,
}

impl HttpMethod {
    /// All methods in display precedence order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::PATCH,
        HttpMethod::DELETE,
    ];

    /// Returns the upper-case string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// Parses a string into an HttpMethod, ignoring case.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string names one of the five recognized
    /// methods, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "PATCH" => Some(HttpMethod::PATCH),
            "DELETE" => Some(HttpMethod::DELETE),
            _ => None,
        }
    }

    /// Position of this method in the fixed `[GET, POST, PUT, PATCH, DELETE]`
    /// ordering used to break ties between routes with equal paths.
    pub fn precedence(&self) -> usize {
        Self::ALL
            .iter()
            .position(|m| m == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Whether requests with this method carry a body (POST, PUT, PATCH).
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single HTTP route declared in a workspace source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// HTTP method of the route.
    pub method: HttpMethod,

    /// Absolute, slash-normalized path (always starts with `/`).
    pub path: String,

    /// File the route was declared in.
    pub source_file: PathBuf,

    /// Name of the declaring controller class, when one was found.
    pub controller_name: Option<String>,
}

impl Route {
    /// Creates a new route, normalizing the given path.
    pub fn new(
        method: HttpMethod,
        path: &str,
        source_file: PathBuf,
        controller_name: Option<String>,
    ) -> Self {
        Self {
            method,
            path: normalize_path(path),
            source_file,
            controller_name,
        }
    }

    /// First non-empty path segment, used as the route's group name.
    pub fn first_segment(&self) -> Option<&str> {
        self.path.split('/').find(|segment| !segment.is_empty())
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Routes sharing the same first path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGroup {
    /// First path segment, or [`ROOT_GROUP`] for routes at `/`.
    pub name: String,

    /// Routes in the group, sorted by path then method precedence.
    pub routes: Vec<Route>,
}

/// Group name used for routes without any path segment.
pub const ROOT_GROUP: &str = "/";

/// Collapses runs of `/` into a single `/` and guarantees a leading slash.
///
/// ```
/// use api_tester::models::route::normalize_path;
///
/// assert_eq!(normalize_path("//a///b"), "/a/b");
/// assert_eq!(normalize_path("users"), "/users");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');

    for ch in path.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    normalized
}
