//! Data models for routes, requests and responses.
//!
//! This module contains the core data structures shared by the scanner, the
//! request builder and the executor.

pub mod request;
pub mod response;
pub mod route;

pub use request::RequestSpec;
pub use response::{HttpResponse, ResponseResult};
pub use route::{normalize_path, HttpMethod, Route, RouteGroup, ROOT_GROUP};
