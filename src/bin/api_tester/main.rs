//! API Tester command-line entry point.
//!
//! Scans the workspace for routes and drives the interactive commands in the
//! terminal. Reports go to stdout; notifications and logs go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod terminal;

use anyhow::{Context, Result};
use api_tester::commands::{
    configure_auth, configure_base_url, pick_route, refresh_routes, send_request, CommandError,
};
use api_tester::config::load_config;
use api_tester::host::Output;
use api_tester::models::{HttpMethod, Route};
use api_tester::scanner::ScanConfig;
use api_tester::storage::{SettingsFileStorage, SharedStorage};
use api_tester::ui::{render_tree, RequestPanel};
use api_tester::RequestService;
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use terminal::TerminalHost;

#[derive(Parser)]
#[command(name = "api-tester")]
#[command(about = "Discover REST routes in a workspace and send requests against them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace root to scan
    #[arg(short, long, default_value = ".", global = true)]
    workspace: PathBuf,

    /// Settings file (defaults to <workspace>/.vscode/settings.json)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the workspace and list routes by group
    Routes {
        /// Print routes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send a request for a route, prompting for missing details
    Send {
        #[command(flatten)]
        target: RouteTarget,
    },

    /// Open the interactive request form for a route
    Form {
        #[command(flatten)]
        target: RouteTarget,
    },

    /// Configure authentication
    Auth,

    /// Configure the base URL
    BaseUrl,
}

/// Route selection; prompts when omitted.
#[derive(clap::Args)]
struct RouteTarget {
    /// HTTP method of the route
    #[arg(short, long, requires = "path")]
    method: Option<String>,

    /// Path of the route, e.g. /users/:id
    #[arg(short, long, requires = "method")]
    path: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings = cli
        .settings
        .clone()
        .map(SettingsFileStorage::new)
        .unwrap_or_else(|| SettingsFileStorage::for_workspace(&cli.workspace));
    debug!("Using settings file {}", settings.path().display());

    let all_settings = settings
        .load_all()
        .with_context(|| format!("Failed to read {}", settings.path().display()))?;
    let config = load_config(Some(&Value::Object(all_settings)))?;

    let storage: SharedStorage = Arc::new(settings);
    let service = RequestService::new(storage);
    let scan_config = ScanConfig::from_config(&config);
    let mut prompter = TerminalHost::new();
    let mut output = TerminalHost::new();

    let result = match cli.command {
        Commands::Routes { json } => {
            refresh_routes(&cli.workspace, &scan_config, &mut output).and_then(|catalog| {
                if json {
                    let routes: Vec<&Route> = catalog.routes().collect();
                    let text = serde_json::to_string_pretty(&routes).unwrap_or_default();
                    output.display(&text);
                } else {
                    output.display(&render_tree(&catalog));
                }
                Ok(())
            })
        }
        Commands::Send { target } => {
            match select_route(&cli.workspace, &scan_config, &target, &mut prompter) {
                Ok(Some(route)) => send_request(Some(&route), &service, &mut prompter, &mut output)
                    .await
                    .map(|outcome| info!("send finished: {:?}", outcome)),
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            }
        }
        Commands::Form { target } => {
            match select_route(&cli.workspace, &scan_config, &target, &mut prompter) {
                Ok(Some(route)) => {
                    let mut form_host = TerminalHost::new();
                    RequestPanel::open(&route, service.clone())
                        .run(&mut form_host)
                        .await;
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            }
        }
        Commands::Auth => configure_auth(service.auth_store(), &mut prompter, &mut output)
            .map(|outcome| info!("auth finished: {:?}", outcome)),
        Commands::BaseUrl => {
            configure_base_url(service.base_url_store(), &mut prompter, &mut output)
                .map(|outcome| info!("base-url finished: {:?}", outcome))
        }
    };

    match result {
        Err(CommandError::NoWorkspace) => {
            output.info(&CommandError::NoWorkspace.to_string());
            Ok(())
        }
        other => Ok(other?),
    }
}

/// Resolves the route named on the command line, or lets the user pick one.
fn select_route(
    workspace: &Path,
    scan_config: &ScanConfig,
    target: &RouteTarget,
    prompter: &mut TerminalHost,
) -> Result<Option<Route>, CommandError> {
    let mut notices = TerminalHost::new();
    let catalog = refresh_routes(workspace, scan_config, &mut notices)?;

    match (&target.method, &target.path) {
        (Some(method), Some(path)) => {
            let method = HttpMethod::from_str(method).ok_or(CommandError::NoRoute)?;
            catalog
                .find(method, path)
                .cloned()
                .map(Some)
                .ok_or(CommandError::NoRoute)
        }
        _ => pick_route(&catalog, prompter),
    }
}
