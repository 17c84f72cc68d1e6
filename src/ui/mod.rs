//! Presentation adapters.
//!
//! - **route_tree**: labels, tooltips and icons for the route catalog
//! - **request_panel**: the interactive request form
//!
//! The command-palette flow lives in [`crate::commands`]. Both paths send
//! through the same [`RequestService`](crate::service::RequestService).

pub mod request_panel;
pub mod route_tree;

pub use request_panel::{FormSubmission, PanelState, PanelView, RequestPanel};
pub use route_tree::{method_icon, render_tree, route_label, route_tooltip};
