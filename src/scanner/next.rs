//! Next.js App Router scanning.
//!
//! Each `app/api/**/route.{ts,js}` file serves the directory it lives in. The
//! methods it handles are the exported functions named after HTTP verbs,
//! `async` or not.
//!
//! Paths keep the `/api` prefix: `app/api/users/route.ts` yields `/api/users`,
//! the URL the handler is served at, not the bare directory `/users`.

use crate::models::{HttpMethod, Route};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// File names recognized as route handlers.
pub const ROUTE_FILE_NAMES: &[&str] = &["route.ts", "route.js"];

static HANDLER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?:async\s+)?function\s+(GET|POST|PUT|PATCH|DELETE)\b")
        .expect("Failed to compile route handler regex")
});

/// Whether `path` names a route handler file.
pub fn is_route_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| ROUTE_FILE_NAMES.contains(&name))
}

/// URL path served by a handler file located at `relative_dir` under `app/api`.
pub fn route_path_for(relative_dir: &Path) -> String {
    let segments: Vec<String> = relative_dir
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .filter(|s| *s != ".")
        .map(|s| s.to_string())
        .collect();

    if segments.is_empty() {
        return "/api".to_string();
    }

    format!("/api/{}", segments.join("/"))
}

/// Parses a handler file into one route per exported verb function.
pub fn parse_next_route(content: &str, route_path: &str, file_path: &Path) -> Vec<Route> {
    let mut routes: Vec<Route> = Vec::new();

    for method in HttpMethod::ALL {
        let exported = HANDLER_REGEX
            .captures_iter(content)
            .any(|caps| caps.get(1).map(|m| m.as_str()) == Some(method.as_str()));

        if exported {
            routes.push(Route::new(method, route_path, file_path.to_path_buf(), None));
        }
    }

    routes
}
