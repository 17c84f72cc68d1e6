//! Text rendering of requests and their outcomes.
//!
//! The report is what the command flow shows in its output pane. Header
//! values that look like credentials are redacted there; the request itself
//! is never modified.

pub mod json;

pub use json::format_body;

use crate::models::{HttpResponse, RequestSpec, ResponseResult};
use std::collections::HashMap;
use std::fmt::Write;
use std::time::Duration;

/// Maximum body length rendered into a report (1MB).
const MAX_BODY_DISPLAY: usize = 1024 * 1024;

/// Characters of a sensitive header value left visible.
const REDACT_VISIBLE_CHARS: usize = 10;

/// Whether a header carries credentials: its lower-cased name contains
/// `auth` or `key`.
pub fn is_sensitive_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("auth") || lower.contains("key")
}

/// Redacts the value of a sensitive header for display.
///
/// # Examples
///
/// ```
/// use api_tester::formatter::redact_header_value;
///
/// assert_eq!(redact_header_value("Authorization", "Bearer abcdefghij"), "Bearer abc...");
/// assert_eq!(redact_header_value("Accept", "application/json"), "application/json");
/// ```
pub fn redact_header_value(name: &str, value: &str) -> String {
    if !is_sensitive_header(name) {
        return value.to_string();
    }

    let visible: String = value.chars().take(REDACT_VISIBLE_CHARS).collect();
    format!("{}...", visible)
}

/// Formats a duration as `567ms` or `1.234s`.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}

/// Formats headers one per line, sorted by name, with sensitive values
/// redacted.
fn format_headers(headers: &HashMap<String, String>) -> String {
    let mut sorted: Vec<_> = headers.iter().collect();
    sorted.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

    let mut output = String::new();
    for (name, value) in sorted {
        let _ = writeln!(output, "  {}: {}", name, redact_header_value(name, value));
    }
    output
}

fn truncated_body(text: String) -> String {
    if text.len() <= MAX_BODY_DISPLAY {
        return text;
    }

    let mut end = MAX_BODY_DISPLAY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\n⚠️  Response truncated (exceeds 1MB limit)", &text[..end])
}

/// Renders the request and its outcome as a plain-text report.
pub fn render_report(request: &RequestSpec, result: &ResponseResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{} {}", request.method, request.display_url);

    if !request.headers.is_empty() {
        output.push_str("Headers:\n");
        output.push_str(&format_headers(&request.headers));
    }

    if let Some(body) = &request.body {
        output.push_str("Body:\n");
        output.push_str(&format_body(body));
        output.push('\n');
    }

    output.push('\n');

    match result {
        ResponseResult::Success(response) => render_response(&mut output, response),
        ResponseResult::Failure {
            error_message,
            partial_status,
            partial_body,
        } => {
            let _ = writeln!(output, "Error: {}", error_message);
            if let Some(status) = partial_status {
                let _ = writeln!(output, "Status: {}", status);
            }
            if let Some(body) = partial_body {
                output.push_str(&truncated_body(format_body(body)));
                output.push('\n');
            }
        }
    }

    output
}

fn render_response(output: &mut String, response: &HttpResponse) {
    let _ = writeln!(
        output,
        "Status: {} {}",
        response.status_code, response.status_text
    );
    let _ = writeln!(output, "Duration: {}", format_duration(response.duration));

    if !response.headers.is_empty() {
        output.push_str("\nResponse Headers:\n");
        output.push_str(&format_headers(&response.headers));
    }

    output.push_str("\nResponse:\n");
    output.push_str(&truncated_body(format_body(&response.body)));
    output.push('\n');
}

/// One-line summary for a notification.
///
/// `✓ 200 OK` for 2xx, `✗ 404 Not Found` for other statuses and
/// `Request failed: <message>` when no response arrived.
pub fn status_line(result: &ResponseResult) -> String {
    match result {
        ResponseResult::Success(response) if response.is_success() => {
            format!("✓ {} {}", response.status_code, response.status_text)
        }
        ResponseResult::Success(response) => {
            format!("✗ {} {}", response.status_code, response.status_text)
        }
        ResponseResult::Failure { error_message, .. } => {
            format!("Request failed: {}", error_message)
        }
    }
}
