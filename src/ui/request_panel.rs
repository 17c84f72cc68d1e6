//! Interactive request form.
//!
//! The panel is prefilled from the selected route, the stored base URL and
//! the active auth headers. Every submission is validated, sent through the
//! shared [`RequestService`], and answered with a [`PanelView`]. The form
//! stays open for resubmission until the host dismisses it.

use crate::builder::{parse_body_input, parse_headers_input, RequestInput};
use crate::config::get_config;
use crate::formatter::format_body;
use crate::host::FormHost;
use crate::models::{HttpMethod, ResponseResult, Route};
use crate::service::RequestService;
use std::collections::BTreeMap;

/// Current contents of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    /// Selected method.
    pub method: HttpMethod,
    /// Full request URL, without query string.
    pub url: String,
    /// Declaring controller, shown as a caption.
    pub controller_name: Option<String>,
    /// Query parameter rows.
    pub params: Vec<(String, String)>,
    /// Headers as a JSON object.
    pub headers_json: String,
    /// Body as JSON text. Only sent for methods that carry a body.
    pub body_text: String,
}

/// Values submitted from the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    pub method: HttpMethod,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub headers_json: String,
    pub body_text: String,
}

/// What the form shows after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// A response arrived.
    Response {
        status: u16,
        status_text: String,
        body: String,
        success: bool,
    },
    /// Validation failed or no response arrived.
    Error {
        message: String,
        body: Option<String>,
    },
}

/// The request form bound to one route at a time.
pub struct RequestPanel {
    state: PanelState,
    service: RequestService,
}

impl RequestPanel {
    /// Opens the panel for `route`.
    pub fn open(route: &Route, service: RequestService) -> Self {
        let state = initial_state(route, &service);
        Self { state, service }
    }

    /// Retargets an open panel to another route, discarding edits.
    pub fn load_route(&mut self, route: &Route) {
        self.state = initial_state(route, &self.service);
    }

    /// Current form contents.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Runs the form until the host dismisses it.
    pub async fn run<H: FormHost>(&mut self, host: &mut H) {
        while let Some(submission) = host.render_form(&self.state) {
            let view = self.submit(submission).await;
            host.show_response(&view);
        }
        log::debug!("Request panel closed");
    }

    /// Validates and sends one submission. The submitted values become the
    /// new form contents.
    pub async fn submit(&mut self, submission: FormSubmission) -> PanelView {
        self.state.method = submission.method;
        self.state.url = submission.url;
        self.state.params = submission.params;
        self.state.headers_json = submission.headers_json;
        self.state.body_text = submission.body_text;

        let headers = match parse_headers_input(&self.state.headers_json) {
            Ok(headers) => headers,
            Err(_) => return validation_error("Invalid JSON in headers"),
        };

        let body = if self.state.method.accepts_body() {
            match parse_body_input(&self.state.body_text) {
                Ok(body) => body,
                Err(_) => return validation_error("Invalid JSON in body"),
            }
        } else {
            None
        };

        let input = RequestInput {
            headers,
            body,
            query_params: collect_params(&self.state.params),
        };

        let request = self
            .service
            .prepare_for_url(self.state.method, self.state.url.clone(), input);
        let result = self.service.send(&request).await;

        view_for(result)
    }
}

fn initial_state(route: &Route, service: &RequestService) -> PanelState {
    let base_url = service
        .base_url_store()
        .resolve()
        .unwrap_or_else(|| get_config().default_base_url);

    let auth_headers = service.auth_headers();
    let headers_json = if auth_headers.is_empty() {
        String::new()
    } else {
        let sorted: BTreeMap<_, _> = auth_headers.into_iter().collect();
        serde_json::to_string_pretty(&sorted).unwrap_or_default()
    };

    PanelState {
        method: route.method,
        url: format!("{}{}", base_url, route.path),
        controller_name: route.controller_name.clone(),
        params: Vec::new(),
        headers_json,
        body_text: String::new(),
    }
}

/// Keeps rows with both a key and a value; a repeated key keeps its last value.
fn collect_params(rows: &[(String, String)]) -> BTreeMap<String, String> {
    rows.iter()
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn validation_error(message: &str) -> PanelView {
    PanelView::Error {
        message: message.to_string(),
        body: None,
    }
}

fn view_for(result: ResponseResult) -> PanelView {
    match result {
        ResponseResult::Success(response) => PanelView::Response {
            success: response.is_success(),
            status: response.status_code,
            status_text: response.status_text,
            body: format_body(&response.body),
        },
        ResponseResult::Failure {
            error_message,
            partial_body,
            ..
        } => PanelView::Error {
            message: error_message,
            body: partial_body.as_ref().map(format_body),
        },
    }
}
