//! Integration tests module for API Tester
//!
//! Shared fixtures: temporary workspaces and scripted host doubles.

pub mod end_to_end_test;

use api_tester::host::{FormHost, InputRequest, Output, Prompter};
use api_tester::ui::{FormSubmission, PanelState, PanelView};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary workspace holding `files` (relative path, content).
pub fn create_workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, content) in files {
        write_file(dir.path(), relative, content);
    }
    dir
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    fs::write(&path, content).expect("Failed to write test file");
}

/// Prompter replaying scripted answers; `None` dismisses the prompt.
#[derive(Default)]
pub struct ScriptedPrompter {
    choices: VecDeque<Option<usize>>,
    inputs: VecDeque<Option<String>>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn then_choose(mut self, answer: Option<usize>) -> Self {
        self.choices.push_back(answer);
        self
    }

    pub fn then_input(mut self, answer: Option<&str>) -> Self {
        self.inputs.push_back(answer.map(str::to_string));
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&mut self, prompt: &str, _options: &[String]) -> Option<usize> {
        self.prompts.push(prompt.to_string());
        self.choices.pop_front().flatten()
    }

    fn input(&mut self, request: &InputRequest) -> Option<String> {
        self.prompts.push(request.prompt.clone());
        let answer = self.inputs.pop_front().flatten()?;
        match request.validator {
            Some(validate) if validate(&answer).is_err() => None,
            _ => Some(answer),
        }
    }
}

/// Output recording everything shown.
#[derive(Default)]
pub struct RecordingOutput {
    pub displayed: Vec<String>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl Output for RecordingOutput {
    fn display(&mut self, text: &str) {
        self.displayed.push(text.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Form host that submits a fixed sequence of forms, then closes.
pub struct ScriptedForm {
    edits: VecDeque<Box<dyn FnOnce(&PanelState) -> FormSubmission>>,
    pub rendered: Vec<PanelState>,
    pub views: Vec<PanelView>,
}

impl ScriptedForm {
    pub fn new() -> Self {
        Self {
            edits: VecDeque::new(),
            rendered: Vec::new(),
            views: Vec::new(),
        }
    }

    pub fn submit<F>(mut self, edit: F) -> Self
    where
        F: FnOnce(&PanelState) -> FormSubmission + 'static,
    {
        self.edits.push_back(Box::new(edit));
        self
    }
}

impl FormHost for ScriptedForm {
    fn render_form(&mut self, state: &PanelState) -> Option<FormSubmission> {
        self.rendered.push(state.clone());
        let edit = self.edits.pop_front()?;
        Some(edit(state))
    }

    fn show_response(&mut self, view: &PanelView) {
        self.views.push(view.clone());
    }
}

/// Submission carrying the state's current values.
pub fn unchanged(state: &PanelState) -> FormSubmission {
    FormSubmission {
        method: state.method,
        url: state.url.clone(),
        params: state.params.clone(),
        headers_json: state.headers_json.clone(),
        body_text: state.body_text.clone(),
    }
}
