//! Workspace route discovery.
//!
//! Walks the workspace, selects controller files by name and hands their text
//! to the framework-specific parsers. Scanning is best effort: unreadable
//! files are skipped with a warning and never fail the scan as a whole.

pub mod nest;
pub mod next;

use crate::config::{ApiTesterConfig, Framework};
use crate::models::Route;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

pub use nest::parse_nest_controller;
pub use next::parse_next_route;

/// Settings controlling which files are scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// File-name suffix of controller files (e.g. `.controller.ts`).
    pub controller_suffix: String,
    /// Directory names never descended into.
    pub exclude_dirs: Vec<String>,
    /// Enabled framework scanners.
    pub frameworks: Vec<Framework>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from_config(&ApiTesterConfig::default())
    }
}

impl ScanConfig {
    /// Builds scan settings from the tool configuration.
    pub fn from_config(config: &ApiTesterConfig) -> Self {
        Self {
            controller_suffix: config.controller_suffix.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
            frameworks: config.frameworks.clone(),
        }
    }

    /// Whether the scanner for `framework` runs.
    pub fn is_enabled(&self, framework: Framework) -> bool {
        self.frameworks.contains(&framework)
    }
}

/// Scans the workspace rooted at `root` for declared routes.
///
/// Routes are returned in file walk order (sorted by file name), and in
/// decorator order within each file. A missing root yields no routes.
pub fn scan_workspace(root: &Path, config: &ScanConfig) -> Vec<Route> {
    let mut routes = Vec::new();

    if config.is_enabled(Framework::Nest) {
        let suffix = config.controller_suffix.clone();
        let controllers = find_files(root, &config.exclude_dirs, move |path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(&suffix))
        });

        for file in controllers {
            if let Some(content) = read_source(&file) {
                routes.extend(parse_nest_controller(&content, &file));
            }
        }
    }

    if config.is_enabled(Framework::Next) {
        let api_root = root.join("app").join("api");
        let handlers = find_files(&api_root, &config.exclude_dirs, next::is_route_file);

        for file in handlers {
            let Some(content) = read_source(&file) else {
                continue;
            };
            let relative_dir = file
                .parent()
                .and_then(|dir| dir.strip_prefix(&api_root).ok())
                .unwrap_or_else(|| Path::new(""));
            let route_path = next::route_path_for(relative_dir);
            routes.extend(parse_next_route(&content, &route_path, &file));
        }
    }

    log::info!("Scanned {}: {} route(s)", root.display(), routes.len());
    routes
}

/// Lists files under `root` accepted by `matches`, pruning excluded directories.
fn find_files<F>(root: &Path, exclude_dirs: &[String], matches: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if !root.is_dir() {
        log::debug!("Skipping scan of missing directory {}", root.display());
        return Vec::new();
    }

    let excluded = exclude_dirs.to_vec();
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
            !(is_dir
                && entry.depth() > 0
                && entry
                    .file_name()
                    .to_str()
                    .map_or(false, |name| excluded.iter().any(|ex| ex == name)))
        });

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                let is_file = entry.file_type().map_or(false, |ft| ft.is_file());
                if is_file && matches(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => log::debug!("Walk error under {}: {}", root.display(), e),
        }
    }

    files
}

/// Reads a source file as UTF-8, logging and skipping failures.
fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::warn!("Skipping unreadable file {}: {}", path.display(), e);
            None
        }
    }
}
