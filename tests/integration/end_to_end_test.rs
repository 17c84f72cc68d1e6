//! End-to-end integration tests for API Tester
//!
//! These tests drive complete workflows: scanning a workspace on disk,
//! grouping its routes, building requests from the stored settings and
//! sending them to a local mock server.

use super::{
    create_workspace, init_test_env, unchanged, write_file, RecordingOutput, ScriptedForm,
    ScriptedPrompter,
};
use api_tester::auth::AuthConfig;
use api_tester::builder::RequestInput;
use api_tester::commands::{configure_auth, configure_base_url, refresh_routes, send_request};
use api_tester::config::Framework;
use api_tester::executor::ExecutionConfig;
use api_tester::formatter::{render_report, status_line};
use api_tester::models::{HttpMethod, ResponseResult, Route};
use api_tester::scanner::{scan_workspace, ScanConfig};
use api_tester::storage::{SettingsFileStorage, SharedStorage};
use api_tester::ui::{PanelView, RequestPanel};
use api_tester::{CommandOutcome, RequestService, RouteCatalog};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERS_CONTROLLER: &str = r#"
import { Controller, Get, Post, Delete, Body, Param } from '@nestjs/common';

@Controller('users')
export class UsersController {
  @Get()
  findAll() {}

  @Get(':id')
  findOne(@Param('id') id: string) {}

  @Post()
  create(@Body() dto: CreateUserDto) {}

  @Delete(':id')
  remove(@Param('id') id: string) {}
}
"#;

const HEALTH_CONTROLLER: &str = r#"
@Controller()
export class HealthController {
  @Get('health')
  check() {}
}
"#;

const ORDERS_ROUTE: &str = r#"
export async function GET(request: Request) {
  return Response.json([]);
}

export function PATCH(request: Request) {
  return Response.json({});
}
"#;

/// Service over a settings file in `root`, with a fixed timeout.
fn file_service(root: &Path, timeout_ms: u64) -> RequestService {
    let storage: SharedStorage = Arc::new(SettingsFileStorage::for_workspace(root));
    RequestService::new(storage).with_execution_config(ExecutionConfig::new(timeout_ms))
}

fn route(method: HttpMethod, path: &str) -> Route {
    Route::new(
        method,
        path,
        PathBuf::from("users.controller.ts"),
        Some("UsersController".to_string()),
    )
}

#[test]
fn test_end_to_end_scan_and_group() {
    init_test_env();
    let workspace = create_workspace(&[
        ("src/users/users.controller.ts", USERS_CONTROLLER),
        ("src/health.controller.ts", HEALTH_CONTROLLER),
        ("src/users/users.service.ts", "export class UsersService {}"),
        ("node_modules/lib/lib.controller.ts", USERS_CONTROLLER),
        ("app/api/orders/[id]/route.ts", ORDERS_ROUTE),
    ]);

    let config = ScanConfig {
        frameworks: vec![Framework::Nest, Framework::Next],
        ..ScanConfig::default()
    };

    // Step 1: Scan the workspace
    let routes = scan_workspace(workspace.path(), &config);
    assert_eq!(routes.len(), 7, "Excluded directories must not be scanned");
    assert!(routes
        .iter()
        .all(|r| !r.source_file.to_string_lossy().contains("node_modules")));

    // Step 2: Group by first segment
    let catalog = RouteCatalog::from_routes(&routes);
    let names: Vec<&str> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["api", "health", "users"]);

    let users = &catalog.groups()[2];
    let listed: Vec<String> = users.routes.iter().map(|r| r.to_string()).collect();
    assert_eq!(
        listed,
        vec!["GET /users", "POST /users", "GET /users/:id", "DELETE /users/:id"]
    );
    assert_eq!(
        users.routes[0].controller_name.as_deref(),
        Some("UsersController")
    );

    // Step 3: Next.js handlers map to /api paths without a controller
    let api = &catalog.groups()[0];
    assert_eq!(api.routes.len(), 2);
    assert_eq!(api.routes[0].path, "/api/orders/[id]");
    assert_eq!(api.routes[0].method, HttpMethod::GET);
    assert_eq!(api.routes[1].method, HttpMethod::PATCH);
    assert_eq!(api.routes[0].controller_name, None);

    // Step 4: Lookup by method and path
    assert!(catalog.find(HttpMethod::DELETE, "/users/:id").is_some());
    assert!(catalog.find(HttpMethod::PUT, "/users/:id").is_none());
}

#[test]
fn test_end_to_end_rescan_reflects_changes() {
    init_test_env();
    let workspace = create_workspace(&[("src/users.controller.ts", USERS_CONTROLLER)]);
    let mut output = RecordingOutput::default();

    let first = refresh_routes(workspace.path(), &ScanConfig::default(), &mut output).unwrap();
    assert_eq!(first.len(), 4);

    fs::remove_file(workspace.path().join("src/users.controller.ts")).unwrap();
    write_file(workspace.path(), "src/health.controller.ts", HEALTH_CONTROLLER);

    let second = refresh_routes(workspace.path(), &ScanConfig::default(), &mut output).unwrap();
    assert_eq!(second.len(), 1);
    assert!(second.find(HttpMethod::GET, "/health").is_some());
    assert_eq!(output.infos, vec!["Routes refreshed!", "Routes refreshed!"]);
}

#[tokio::test]
async fn test_end_to_end_get_request() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/:id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Alice"})))
        .mount(&server)
        .await;

    let workspace = create_workspace(&[]);
    let service = file_service(workspace.path(), 5_000);
    let request = service.prepare(
        &route(HttpMethod::GET, "/users/:id"),
        &server.uri(),
        RequestInput::default(),
    );
    assert_eq!(request.body, None);

    let result = service.send(&request).await;
    match &result {
        ResponseResult::Success(response) => {
            assert_eq!(response.status_code, 200);
            assert_eq!(response.body, json!({"id": 1, "name": "Alice"}));
        }
        other => panic!("Expected success, got {:?}", other),
    }

    let report = render_report(&request, &result);
    assert!(report.starts_with(&format!("GET {}/users/:id\n", server.uri())));
    assert!(report.contains("Status: 200 OK"));
    assert!(report.contains("\"name\": \"Alice\""));
    assert_eq!(status_line(&result), "✓ 200 OK");
}

#[tokio::test]
async fn test_end_to_end_error_status_is_a_response() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let workspace = create_workspace(&[]);
    let service = file_service(workspace.path(), 5_000);
    let request = service.prepare(
        &route(HttpMethod::GET, "/missing"),
        &server.uri(),
        RequestInput::default(),
    );

    let result = service.send(&request).await;
    assert_eq!(result.status(), Some(404));
    assert!(!result.is_success());
    assert!(matches!(result, ResponseResult::Success(_)));
    assert_eq!(status_line(&result), "✗ 404 Not Found");
    assert!(render_report(&request, &result).contains("\"message\": \"Not Found\""));
}

#[tokio::test]
async fn test_end_to_end_post_with_body_query_and_auth() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(query_param("notify", "true"))
        .and(header("Authorization", "Bearer token-abcdefghij"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "Ada"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = create_workspace(&[]);
    let service = file_service(workspace.path(), 5_000);
    service
        .auth_store()
        .set(&AuthConfig::bearer("token-abcdefghij").unwrap())
        .unwrap();

    let mut query_params = BTreeMap::new();
    query_params.insert("notify".to_string(), "true".to_string());
    let input = RequestInput {
        body: Some(json!({"name": "Ada"})),
        query_params,
        ..Default::default()
    };
    let request = service.prepare(&route(HttpMethod::POST, "/users"), &server.uri(), input);
    assert_eq!(
        request.display_url,
        format!("{}/users?notify=true", server.uri())
    );

    let result = service.send(&request).await;
    assert_eq!(result.status(), Some(201));
    assert!(result.is_success());

    let report = render_report(&request, &result);
    assert!(report.contains("  Authorization: Bearer tok..."));
    assert!(!report.contains("token-abcdefghij"));
    assert!(report.contains("Body:\n{\n  \"name\": \"Ada\"\n}"));
}

#[tokio::test]
async fn test_end_to_end_timeout_is_failure() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let workspace = create_workspace(&[]);
    let service = file_service(workspace.path(), 50);
    let request = service.prepare(
        &route(HttpMethod::GET, "/slow"),
        &server.uri(),
        RequestInput::default(),
    );

    let result = service.send(&request).await;
    match &result {
        ResponseResult::Failure {
            error_message,
            partial_status,
            ..
        } => {
            assert_eq!(error_message, "Request timed out");
            assert_eq!(*partial_status, None);
        }
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(status_line(&result), "Request failed: Request timed out");
    assert!(render_report(&request, &result).contains("Error: Request timed out"));
}

#[test]
fn test_end_to_end_settings_persist_across_services() {
    init_test_env();
    let workspace = create_workspace(&[(
        ".vscode/settings.json",
        r#"{ "editor.tabSize": 2 }"#,
    )]);

    let service = file_service(workspace.path(), 1_000);
    let mut output = RecordingOutput::default();

    let mut base_url_prompts = ScriptedPrompter::default()
        .then_choose(Some(0))
        .then_input(Some("http://localhost:4000"));
    configure_base_url(service.base_url_store(), &mut base_url_prompts, &mut output).unwrap();

    let mut auth_prompts = ScriptedPrompter::default()
        .then_choose(Some(0))
        .then_choose(Some(1))
        .then_input(Some("key-123"))
        .then_input(Some("X-Custom-Key"));
    configure_auth(service.auth_store(), &mut auth_prompts, &mut output).unwrap();

    // A fresh service reads what the first one wrote
    let reopened = file_service(workspace.path(), 1_000);
    assert_eq!(
        reopened.base_url_store().resolve().as_deref(),
        Some("http://localhost:4000")
    );
    assert_eq!(
        reopened.auth(),
        AuthConfig::api_key("key-123", "X-Custom-Key").unwrap()
    );

    // Unrelated settings survive and the stored shapes match the file format
    let text = fs::read_to_string(workspace.path().join(".vscode/settings.json")).unwrap();
    let settings: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(settings["editor.tabSize"], json!(2));
    assert_eq!(settings["apiTester.baseUrl"], json!("http://localhost:4000"));
    assert_eq!(
        settings["apiTester.auth"],
        json!({"type": "apiKey", "token": "key-123", "headerName": "X-Custom-Key"})
    );
}

#[tokio::test]
async fn test_end_to_end_declined_base_url_sends_nothing() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let workspace = create_workspace(&[]);
    let service = file_service(workspace.path(), 1_000);
    let mut prompter = ScriptedPrompter::default().then_input(None);
    let mut output = RecordingOutput::default();

    let outcome = send_request(
        Some(&route(HttpMethod::GET, "/users")),
        &service,
        &mut prompter,
        &mut output,
    )
    .await
    .unwrap();

    assert_eq!(outcome, CommandOutcome::Cancelled);
    assert_eq!(service.base_url_store().get(), None);
    assert!(output.displayed.is_empty());
    assert!(!workspace.path().join(".vscode/settings.json").exists());
}

#[tokio::test]
async fn test_end_to_end_send_request_command() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(header("X-API-Key", "key-abcdefghijkl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = create_workspace(&[]);
    let service = file_service(workspace.path(), 5_000);
    service.base_url_store().set(&server.uri()).unwrap();
    service
        .auth_store()
        .set(&AuthConfig::api_key("key-abcdefghijkl", "X-API-Key").unwrap())
        .unwrap();

    let mut prompter = ScriptedPrompter::default().then_input(Some("page=2"));
    let mut output = RecordingOutput::default();

    let outcome = send_request(
        Some(&route(HttpMethod::GET, "/users")),
        &service,
        &mut prompter,
        &mut output,
    )
    .await
    .unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(prompter.prompts, vec!["Query parameters (leave empty for none)"]);
    assert_eq!(
        output.infos,
        vec![
            format!("Sending GET request to {}/users?page=2...", server.uri()),
            "✓ 200 OK".to_string(),
        ]
    );
    assert!(output.errors.is_empty());

    let report = &output.displayed[0];
    assert!(report.contains("  X-API-Key: key-abcdef..."));
    assert!(report.contains("Status: 200 OK"));
    assert!(report.contains("\"id\": 1"));
}

#[tokio::test]
async fn test_end_to_end_request_panel() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Authorization", "Bearer panel-token"))
        .and(body_json(json!({"name": "Ada"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = create_workspace(&[]);
    let service = file_service(workspace.path(), 5_000);
    service.base_url_store().set(&server.uri()).unwrap();
    service
        .auth_store()
        .set(&AuthConfig::bearer("panel-token").unwrap())
        .unwrap();

    let mut panel = RequestPanel::open(&route(HttpMethod::POST, "/users"), service);
    assert_eq!(panel.state().url, format!("{}/users", server.uri()));
    assert_eq!(
        panel.state().controller_name.as_deref(),
        Some("UsersController")
    );
    assert!(panel.state().headers_json.contains("Bearer panel-token"));

    let mut host = ScriptedForm::new()
        .submit(|state| {
            let mut form = unchanged(state);
            form.body_text = "{ not json".to_string();
            form
        })
        .submit(|state| {
            let mut form = unchanged(state);
            form.body_text = r#"{"name": "Ada"}"#.to_string();
            form
        });

    panel.run(&mut host).await;

    assert_eq!(host.rendered.len(), 3, "Form stays open until dismissed");
    assert_eq!(
        host.views[0],
        PanelView::Error {
            message: "Invalid JSON in body".to_string(),
            body: None,
        }
    );
    match &host.views[1] {
        PanelView::Response {
            status,
            success,
            body,
            ..
        } => {
            assert_eq!(*status, 201);
            assert!(*success);
            assert!(body.contains("\"id\": 1"));
        }
        other => panic!("Expected response view, got {:?}", other),
    }
    assert_eq!(host.rendered[2].body_text, r#"{"name": "Ada"}"#);
}
