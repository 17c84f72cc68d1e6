//! Presentation of the route catalog as a tree.

use crate::catalog::RouteCatalog;
use crate::models::{HttpMethod, Route};
use std::fmt::Write;

/// Label of a route node, e.g. `GET /users`.
pub fn route_label(route: &Route) -> String {
    route.to_string()
}

/// Hover text of a route node: its source file, and the controller when known.
pub fn route_tooltip(route: &Route) -> String {
    let source = route.source_file.display();
    match &route.controller_name {
        Some(controller) => format!("{}\n{}", source, controller),
        None => source.to_string(),
    }
}

/// Icon name for a method.
pub fn method_icon(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::GET => "arrow-down",
        HttpMethod::POST => "add",
        HttpMethod::PUT => "edit",
        HttpMethod::DELETE => "trash",
        _ => "symbol-method",
    }
}

/// Renders the catalog as an indented text tree.
///
/// ```text
/// users (2)
///   GET /users
///   POST /users
/// ```
pub fn render_tree(catalog: &RouteCatalog) -> String {
    if catalog.is_empty() {
        return "No routes found".to_string();
    }

    let mut output = String::new();
    for group in catalog.groups() {
        let _ = writeln!(output, "{} ({})", group.name, group.routes.len());
        for route in &group.routes {
            let _ = writeln!(output, "  {}", route_label(route));
        }
    }
    output
}
