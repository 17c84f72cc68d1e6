//! API Tester
//!
//! Discovers the HTTP routes declared in a workspace and sends live requests
//! against them.
//!
//! # Architecture
//!
//! - **scanner**: finds NestJS controllers and Next.js route handlers and
//!   extracts their routes lexically
//! - **catalog**: groups routes by first path segment for display
//! - **auth** / **base_url**: workspace settings persisted through **storage**
//! - **builder**: turns a route plus user input into a request
//! - **executor**: sends a request with reqwest and classifies the outcome
//! - **formatter**: renders reports and status lines
//! - **commands**: the command-palette flow
//! - **ui**: the route tree and the interactive request panel
//! - **host**: the traits an interactive front end implements
//!
//! Data flows scanner → catalog → builder (consulting the auth and base URL
//! stores) → executor → formatter.
//!
//! # Settings
//!
//! Everything is stored in the workspace settings file
//! (`.vscode/settings.json`):
//!
//! ```json
//! {
//!   "apiTester.baseUrl": "http://localhost:3000",
//!   "apiTester.auth": { "type": "bearer", "token": "..." },
//!   "apiTester.client": { "timeout": 10000, "frameworks": ["nest", "next"] }
//! }
//! ```

pub mod auth;
pub mod base_url;
pub mod builder;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod executor;
pub mod formatter;
pub mod host;
pub mod models;
pub mod scanner;
pub mod service;
pub mod storage;
pub mod ui;

pub use catalog::RouteCatalog;
pub use commands::{CommandError, CommandOutcome};
pub use models::{HttpMethod, RequestSpec, ResponseResult, Route, RouteGroup};
pub use service::RequestService;
