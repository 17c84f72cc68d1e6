//! HTTP request executor.
//!
//! Sends one [`RequestSpec`] with reqwest and classifies the outcome. Any
//! response that arrives becomes [`ResponseResult::Success`], whatever its
//! status. Only the absence of a complete response is a failure. Requests
//! are never retried.

pub mod config;
pub mod error;

pub use config::ExecutionConfig;
pub use error::RequestError;

use crate::models::{HttpMethod, HttpResponse, RequestSpec, ResponseResult};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use url::Url;

/// Executes `request` and returns its outcome.
///
/// # Arguments
///
/// * `request` - The request to send; `query_params` are appended to `url`
/// * `config` - Execution settings (timeout)
///
/// # Examples
///
/// ```no_run
/// use api_tester::executor::{execute, ExecutionConfig};
/// use api_tester::models::{HttpMethod, RequestSpec, ResponseResult};
///
/// # async fn example() {
/// let request = RequestSpec::new(HttpMethod::GET, "http://localhost:3000/users".to_string());
/// match execute(&request, &ExecutionConfig::new(5000)).await {
///     ResponseResult::Success(response) => println!("{}", response.status_code),
///     ResponseResult::Failure { error_message, .. } => eprintln!("{}", error_message),
/// }
/// # }
/// ```
pub async fn execute(request: &RequestSpec, config: &ExecutionConfig) -> ResponseResult {
    log::debug!("[{}] Sending {} {}", request.id, request.method, request.display_url);

    let start_time = Instant::now();
    let response = match send(request, config).await {
        Ok(response) => response,
        Err(e) => {
            log::info!(
                "[{}] {} {} failed: {}",
                request.id,
                request.method,
                request.display_url,
                e
            );
            return ResponseResult::failure(e.to_string());
        }
    };

    let status_code = response.status().as_u16();
    let status_text = response
        .status()
        .canonical_reason()
        .unwrap_or("Unknown")
        .to_string();

    let mut headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value_str) = value.to_str() {
            headers.insert(name.as_str().to_string(), value_str.to_string());
        }
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = RequestError::from(e);
            log::info!(
                "[{}] {} {} returned {} but the body could not be read: {}",
                request.id,
                request.method,
                request.display_url,
                status_code,
                err
            );
            return ResponseResult::Failure {
                error_message: err.to_string(),
                partial_status: Some(status_code),
                partial_body: None,
            };
        }
    };

    let duration = start_time.elapsed();
    log::info!(
        "[{}] {} {} -> {} in {}ms",
        request.id,
        request.method,
        request.display_url,
        status_code,
        duration.as_millis()
    );

    ResponseResult::Success(HttpResponse {
        status_code,
        status_text,
        headers,
        body: decode_body(&bytes),
        duration,
    })
}

/// Sends the request and waits for the response head.
async fn send(
    request: &RequestSpec,
    config: &ExecutionConfig,
) -> Result<reqwest::Response, RequestError> {
    let url = Url::parse(&request.url)?;

    let client = reqwest::Client::builder()
        .timeout(config.timeout_duration())
        .build()
        .map_err(|e| RequestError::BuildError(e.to_string()))?;

    let mut req_builder = client.request(to_reqwest_method(request.method), url);

    for (name, value) in &request.headers {
        req_builder = req_builder.header(name.as_str(), value.as_str());
    }

    if !request.query_params.is_empty() {
        req_builder = req_builder.query(&request.query_params);
    }

    if let Some(body) = &request.body {
        req_builder = req_builder.json(body);
    }

    Ok(req_builder.send().await?)
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
    }
}

/// Decodes a body as JSON, falling back to its text.
pub fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
