//! Command handlers.
//!
//! Each command drives one user action through the host traits. A dismissed
//! prompt ends the command with [`CommandOutcome::Cancelled`] and leaves the
//! stores untouched. Errors are returned to the caller for display.

use crate::auth::{describe, AuthConfig, AuthStore, DEFAULT_API_KEY_HEADER};
use crate::base_url::{validate_base_url, BaseUrlStore};
use crate::builder::{parse_body_input, parse_query_input, BuildError, RequestInput};
use crate::catalog::RouteCatalog;
use crate::config::get_config;
use crate::formatter::{render_report, status_line};
use crate::host::{InputRequest, Output, Prompter};
use crate::models::Route;
use crate::scanner::{scan_workspace, ScanConfig};
use crate::service::RequestService;
use crate::storage::{StorageError, WorkspaceStorage};
use std::path::Path;
use thiserror::Error;

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Persisting a setting failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// User input could not be turned into a request.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The workspace root does not exist.
    #[error("No workspace folder open")]
    NoWorkspace,

    /// No route was given or none could be picked.
    #[error("No route selected")]
    NoRoute,
}

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The action ran to completion.
    Completed,
    /// A prompt was dismissed.
    Cancelled,
}

/// Rescans the workspace and rebuilds the route catalog.
pub fn refresh_routes<O: Output>(
    root: &Path,
    config: &ScanConfig,
    output: &mut O,
) -> Result<RouteCatalog, CommandError> {
    if !root.is_dir() {
        return Err(CommandError::NoWorkspace);
    }

    let routes = scan_workspace(root, config);
    let catalog = RouteCatalog::from_routes(&routes);
    output.info("Routes refreshed!");
    Ok(catalog)
}

/// Lets the user pick a route, group first.
///
/// # Returns
///
/// `Ok(None)` when a prompt is dismissed, `Err(NoRoute)` when the catalog
/// is empty.
pub fn pick_route<P: Prompter>(
    catalog: &RouteCatalog,
    prompter: &mut P,
) -> Result<Option<Route>, CommandError> {
    if catalog.is_empty() {
        return Err(CommandError::NoRoute);
    }

    let groups = catalog.groups();
    let group_labels: Vec<String> = groups
        .iter()
        .map(|g| format!("{} ({})", g.name, g.routes.len()))
        .collect();
    let Some(group_index) = prompter.choose("Select a route group", &group_labels) else {
        return Ok(None);
    };
    let Some(group) = groups.get(group_index) else {
        return Ok(None);
    };

    let route_labels: Vec<String> = group.routes.iter().map(|r| r.to_string()).collect();
    let Some(route_index) = prompter.choose("Select a route", &route_labels) else {
        return Ok(None);
    };

    Ok(group.routes.get(route_index).cloned())
}

/// Sends a request for `route`, prompting for whatever is missing.
///
/// Asks for a base URL when none is stored and saves the answer. Asks for a
/// JSON body when the method carries one, and for query parameters. The
/// report goes to the output pane and the status to a notification.
pub async fn send_request<P: Prompter, O: Output>(
    route: Option<&Route>,
    service: &RequestService,
    prompter: &mut P,
    output: &mut O,
) -> Result<CommandOutcome, CommandError> {
    let route = route.ok_or(CommandError::NoRoute)?;

    let stored_base_url = service.base_url_store().resolve();
    let prompted = stored_base_url.is_none();
    let base_url = match stored_base_url {
        Some(url) => url,
        None => {
            let request = InputRequest::new("Enter API base URL (e.g., http://localhost:3000)")
                .with_default(get_config().default_base_url)
                .with_validator(validate_base_url);

            let Some(url) = valid_base_url(prompter.input(&request)) else {
                output.info("Request cancelled: no base URL configured");
                return Ok(CommandOutcome::Cancelled);
            };
            url
        }
    };

    let body = if route.method.accepts_body() {
        let request = InputRequest::new("Request body (JSON, leave empty for none)")
            .with_placeholder(r#"{"name": "value"}"#);
        let Some(text) = prompter.input(&request) else {
            return Ok(CommandOutcome::Cancelled);
        };
        parse_body_input(&text)?
    } else {
        None
    };

    let request = InputRequest::new("Query parameters (leave empty for none)")
        .with_placeholder("page=1&limit=10");
    let Some(query_text) = prompter.input(&request) else {
        return Ok(CommandOutcome::Cancelled);
    };

    let input = RequestInput {
        body,
        query_params: parse_query_input(&query_text),
        ..Default::default()
    };

    // Persist a prompted base URL only once every prompt has been answered.
    if prompted {
        service.base_url_store().set(&base_url)?;
    }

    let request = service.prepare(route, &base_url, input);

    output.info(&format!(
        "Sending {} request to {}...",
        request.method, request.display_url
    ));

    let result = service.send(&request).await;
    output.display(&render_report(&request, &result));

    if result.is_success() {
        output.info(&status_line(&result));
    } else {
        output.error(&status_line(&result));
    }

    Ok(CommandOutcome::Completed)
}

const AUTH_ACTIONS: [&str; 4] = [
    "Configure Authentication",
    "Edit Current Token",
    "Remove Authentication",
    "Show Current Config",
];

/// Configures, edits, removes or shows the auth setting.
pub fn configure_auth<S, P, O>(
    store: &AuthStore<S>,
    prompter: &mut P,
    output: &mut O,
) -> Result<CommandOutcome, CommandError>
where
    S: WorkspaceStorage,
    P: Prompter,
    O: Output,
{
    let current = store.get();
    let prompt = if current.is_none() {
        "No authentication configured".to_string()
    } else {
        format!("Current: {}", current)
    };

    let Some(action) = prompter.choose(&prompt, &labels(&AUTH_ACTIONS)) else {
        return Ok(CommandOutcome::Cancelled);
    };

    match action {
        0 | 1 => {
            let Some(auth) = prompt_for_auth(prompter) else {
                return Ok(CommandOutcome::Cancelled);
            };
            store.set(&auth)?;
            output.info("✓ Authentication configured!");
        }
        2 => {
            store.set(&AuthConfig::None)?;
            output.info("✓ Authentication removed");
        }
        _ => output.info(&describe(&current)),
    }

    Ok(CommandOutcome::Completed)
}

/// Asks for an auth type and its credentials.
///
/// Returns `None` when any prompt is dismissed or left empty. Choosing
/// "None" yields [`AuthConfig::None`] without further prompts.
pub fn prompt_for_auth<P: Prompter>(prompter: &mut P) -> Option<AuthConfig> {
    let kinds = labels(&["Bearer Token", "API Key (Custom Header)", "None"]);
    let kind = prompter.choose("Select authentication type", &kinds)?;
    if kind == 2 {
        return Some(AuthConfig::None);
    }

    let token_request = InputRequest::new("Enter your token/API key")
        .with_placeholder("Your token here...")
        .password();
    let token = non_empty(prompter.input(&token_request))?;

    if kind == 0 {
        return AuthConfig::bearer(token).ok();
    }

    let header_request = InputRequest::new("Enter header name")
        .with_default(DEFAULT_API_KEY_HEADER)
        .with_placeholder("e.g., X-API-Key, Authorization");
    let header_name = non_empty(prompter.input(&header_request))?;

    AuthConfig::api_key(token, header_name).ok()
}

const BASE_URL_ACTIONS: [&str; 4] = [
    "Set Base URL",
    "Edit Current URL",
    "Remove Base URL",
    "Show Current URL",
];

/// Sets, edits, removes or shows the base URL.
pub fn configure_base_url<S, P, O>(
    store: &BaseUrlStore<S>,
    prompter: &mut P,
    output: &mut O,
) -> Result<CommandOutcome, CommandError>
where
    S: WorkspaceStorage,
    P: Prompter,
    O: Output,
{
    let current = store.resolve();
    let prompt = match &current {
        Some(url) => format!("Current: {}", url),
        None => "No base URL configured".to_string(),
    };

    let Some(action) = prompter.choose(&prompt, &labels(&BASE_URL_ACTIONS)) else {
        return Ok(CommandOutcome::Cancelled);
    };

    match action {
        0 | 1 => {
            let request = InputRequest::new("Enter API base URL")
                .with_default(
                    current
                        .clone()
                        .unwrap_or_else(|| get_config().default_base_url),
                )
                .with_placeholder("http://localhost:3000")
                .with_validator(validate_base_url);

            let Some(url) = valid_base_url(prompter.input(&request)) else {
                return Ok(CommandOutcome::Cancelled);
            };
            store.set(&url)?;
            output.info(&format!("✓ Base URL set to: {}", url));
        }
        2 => {
            store.set("")?;
            output.info("✓ Base URL removed");
        }
        _ => match current {
            Some(url) => output.info(&format!("Current base URL: {}", url)),
            None => output.info("No base URL configured"),
        },
    }

    Ok(CommandOutcome::Completed)
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Trims a base URL answer, treating an empty or unparsable one as dismissed.
fn valid_base_url(answer: Option<String>) -> Option<String> {
    let url = non_empty(answer)?;
    match validate_base_url(&url) {
        Ok(()) => Some(url),
        Err(message) => {
            log::warn!("Rejected base URL {:?}: {}", url, message);
            None
        }
    }
}

/// Trims an answer, treating an empty one as dismissed.
fn non_empty(answer: Option<String>) -> Option<String> {
    answer
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
