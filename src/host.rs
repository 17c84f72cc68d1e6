//! Interfaces to the interactive host.
//!
//! Commands and the request panel talk to the user only through these
//! traits. Every prompt may be dismissed, which is reported as `None`; the
//! caller then abandons the action without side effects.

use crate::ui::request_panel::{FormSubmission, PanelState, PanelView};

/// Validates input text, returning the message to show when it is rejected.
pub type Validator = fn(&str) -> Result<(), String>;

/// A free-text input prompt.
#[derive(Debug, Clone, Default)]
pub struct InputRequest {
    /// Prompt text.
    pub prompt: String,
    /// Value the input starts with.
    pub default: Option<String>,
    /// Hint shown when the input is empty.
    pub placeholder: Option<String>,
    /// Mask the typed characters.
    pub password: bool,
    /// Rejects invalid values before they are returned.
    pub validator: Option<Validator>,
}

impl InputRequest {
    /// A plain prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Sets the initial value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the placeholder hint.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Masks the typed characters.
    pub fn password(mut self) -> Self {
        self.password = true;
        self
    }

    /// Attaches a validator.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Picks and text prompts.
pub trait Prompter {
    /// Asks the user to pick one of `options`; returns its index.
    fn choose(&mut self, prompt: &str, options: &[String]) -> Option<usize>;

    /// Asks for free text.
    fn input(&mut self, request: &InputRequest) -> Option<String>;
}

/// Output surfaces: a report pane and notifications.
pub trait Output {
    /// Replaces the report pane contents with `text`.
    fn display(&mut self, text: &str);

    /// Shows an informational notification.
    fn info(&mut self, message: &str);

    /// Shows an error notification.
    fn error(&mut self, message: &str);
}

/// The interactive request form.
pub trait FormHost {
    /// Shows the form for `state` and waits for a submission.
    ///
    /// Returns `None` when the form is closed.
    fn render_form(&mut self, state: &PanelState) -> Option<FormSubmission>;

    /// Shows the outcome of the last submission.
    fn show_response(&mut self, view: &PanelView);
}
