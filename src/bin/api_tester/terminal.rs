//! Terminal implementation of the host traits, backed by `inquire`.

use api_tester::builder::{encode_query, parse_query_input};
use api_tester::host::{FormHost, InputRequest, Output, Prompter};
use api_tester::models::HttpMethod;
use api_tester::ui::{FormSubmission, PanelState, PanelView};
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError, Password, PasswordDisplayMode, Select, Text};
use std::collections::BTreeMap;

/// Prompts on stdin, reports on stdout and notifies on stderr.
#[derive(Debug, Default)]
pub struct TerminalHost;

impl TerminalHost {
    pub fn new() -> Self {
        Self
    }
}

/// Maps a prompt result to `None` on dismissal, logging unexpected errors.
fn answered<T>(result: Result<T, InquireError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => None,
        Err(e) => {
            log::warn!("Prompt failed: {}", e);
            None
        }
    }
}

impl Prompter for TerminalHost {
    fn choose(&mut self, prompt: &str, options: &[String]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        answered(Select::new(prompt, options.to_vec()).raw_prompt()).map(|choice| choice.index)
    }

    fn input(&mut self, request: &InputRequest) -> Option<String> {
        if request.password {
            let mut password = Password::new(&request.prompt)
                .without_confirmation()
                .with_display_mode(PasswordDisplayMode::Masked);
            if let Some(placeholder) = &request.placeholder {
                password = password.with_help_message(placeholder);
            }
            return answered(password.prompt());
        }

        let mut text = Text::new(&request.prompt);
        if let Some(default) = &request.default {
            text = text.with_default(default);
        }
        if let Some(placeholder) = &request.placeholder {
            text = text.with_placeholder(placeholder);
        }
        if let Some(validate) = request.validator {
            let validator = move |input: &str| -> Result<Validation, CustomUserError> {
                Ok(match validate(input) {
                    Ok(()) => Validation::Valid,
                    Err(message) => Validation::Invalid(message.into()),
                })
            };
            text = text.with_validator(validator);
        }
        answered(text.prompt())
    }
}

impl Output for TerminalHost {
    fn display(&mut self, text: &str) {
        println!("{}", text);
    }

    fn info(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}

const FORM_ACTIONS: [&str; 7] = [
    "Send Request",
    "Method",
    "URL",
    "Params",
    "Headers",
    "Body",
    "Close",
];

fn print_state(state: &PanelState) {
    eprintln!();
    if let Some(controller) = &state.controller_name {
        eprintln!("{}", controller);
    }
    eprintln!("{} {}", state.method, state.url);
    for (key, value) in &state.params {
        eprintln!("  ? {} = {}", key, value);
    }
    if !state.headers_json.is_empty() {
        eprintln!("Headers:\n{}", state.headers_json);
    }
    if state.method.accepts_body() && !state.body_text.is_empty() {
        eprintln!("Body:\n{}", state.body_text);
    }
}

impl FormHost for TerminalHost {
    fn render_form(&mut self, state: &PanelState) -> Option<FormSubmission> {
        let mut form = FormSubmission {
            method: state.method,
            url: state.url.clone(),
            params: state.params.clone(),
            headers_json: state.headers_json.clone(),
            body_text: state.body_text.clone(),
        };

        loop {
            print_state(&PanelState {
                method: form.method,
                url: form.url.clone(),
                controller_name: state.controller_name.clone(),
                params: form.params.clone(),
                headers_json: form.headers_json.clone(),
                body_text: form.body_text.clone(),
            });

            let actions: Vec<String> = FORM_ACTIONS.iter().map(|s| s.to_string()).collect();
            match self.choose("Request", &actions)? {
                0 => return Some(form),
                1 => {
                    let methods: Vec<String> =
                        HttpMethod::ALL.iter().map(|m| m.to_string()).collect();
                    if let Some(index) = self.choose("Method", &methods) {
                        form.method = HttpMethod::ALL[index];
                    }
                }
                2 => {
                    if let Some(url) = self.input(&InputRequest::new("URL").with_default(&form.url))
                    {
                        form.url = url;
                    }
                }
                3 => {
                    let current: BTreeMap<String, String> = form.params.iter().cloned().collect();
                    let request = InputRequest::new("Query parameters")
                        .with_default(encode_query(&current))
                        .with_placeholder("page=1&limit=10");
                    if let Some(text) = self.input(&request) {
                        form.params = parse_query_input(&text).into_iter().collect();
                    }
                }
                4 => {
                    let request = InputRequest::new("Headers (JSON object)")
                        .with_default(form.headers_json.replace('\n', " "))
                        .with_placeholder(r#"{"Authorization": "Bearer token"}"#);
                    if let Some(text) = self.input(&request) {
                        form.headers_json = text;
                    }
                }
                5 => {
                    let request = InputRequest::new("Body (JSON)")
                        .with_default(&form.body_text)
                        .with_placeholder(r#"{"name": "value"}"#);
                    if let Some(text) = self.input(&request) {
                        form.body_text = text;
                    }
                }
                _ => return None,
            }
        }
    }

    fn show_response(&mut self, view: &PanelView) {
        match view {
            PanelView::Response {
                status,
                status_text,
                body,
                success,
            } => {
                let mark = if *success { "✓" } else { "✗" };
                eprintln!("{} {} {}", mark, status, status_text);
                println!("{}", body);
            }
            PanelView::Error { message, body } => {
                eprintln!("Error: {}", message);
                if let Some(body) = body {
                    println!("{}", body);
                }
            }
        }
    }
}
