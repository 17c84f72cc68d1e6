//! Route catalog: the grouped, ordered view of the latest scan.
//!
//! Grouping is a pure function of the route list. Nothing about a group or a
//! route survives a rescan.

use crate::models::{HttpMethod, Route, RouteGroup, ROOT_GROUP};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Groups routes by first path segment.
///
/// Groups come out sorted by name. Within a group routes are sorted by path,
/// then by method precedence `[GET, POST, PUT, PATCH, DELETE]`. The sort is
/// stable, so routes with equal keys keep their scan order.
///
/// # Examples
///
/// ```
/// use api_tester::catalog::build_groups;
/// use api_tester::models::{HttpMethod, Route};
/// use std::path::PathBuf;
///
/// let routes = vec![
///     Route::new(HttpMethod::GET, "/users", PathBuf::new(), None),
///     Route::new(HttpMethod::POST, "/users", PathBuf::new(), None),
///     Route::new(HttpMethod::GET, "/orders/1", PathBuf::new(), None),
/// ];
///
/// let groups = build_groups(&routes);
/// assert_eq!(groups[0].name, "orders");
/// assert_eq!(groups[1].name, "users");
/// assert_eq!(groups[1].routes.len(), 2);
/// ```
pub fn build_groups(routes: &[Route]) -> Vec<RouteGroup> {
    let mut buckets: BTreeMap<String, Vec<Route>> = BTreeMap::new();

    for route in routes {
        let name = route.first_segment().unwrap_or(ROOT_GROUP).to_string();
        buckets.entry(name).or_default().push(route.clone());
    }

    buckets
        .into_iter()
        .map(|(name, mut routes)| {
            routes.sort_by(compare_routes);
            RouteGroup { name, routes }
        })
        .collect()
}

/// Orders two routes by path, then by method precedence.
pub fn compare_routes(a: &Route, b: &Route) -> Ordering {
    a.path
        .cmp(&b.path)
        .then_with(|| a.method.precedence().cmp(&b.method.precedence()))
}

/// Holds the groups produced by the most recent scan.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    groups: Vec<RouteGroup>,
}

impl RouteCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a route list.
    pub fn from_routes(routes: &[Route]) -> Self {
        Self {
            groups: build_groups(routes),
        }
    }

    /// Replaces the catalog contents with a fresh grouping.
    pub fn refresh(&mut self, routes: &[Route]) {
        self.groups = build_groups(routes);
    }

    /// Groups in display order.
    pub fn groups(&self) -> &[RouteGroup] {
        &self.groups
    }

    /// All routes in display order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.groups.iter().flat_map(|g| g.routes.iter())
    }

    /// Finds the first route with the given method and path.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&Route> {
        let path = crate::models::normalize_path(path);
        self.routes().find(|r| r.method == method && r.path == path)
    }

    /// Total number of routes.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.routes.len()).sum()
    }

    /// Whether the last scan found no routes.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
