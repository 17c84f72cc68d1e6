//! Authentication settings for outgoing requests.
//!
//! One [`AuthConfig`] is active per workspace. It is persisted under
//! [`AUTH_KEY`] as a loose record and turned into request headers by
//! [`build_auth_headers`] each time a request is built.

pub mod bearer;
pub mod store;

pub use store::AuthStore;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Settings key holding the persisted auth record.
pub const AUTH_KEY: &str = "apiTester.auth";

/// Header name suggested when configuring API key auth.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Number of token characters left visible by [`mask_token`].
const MASK_VISIBLE_CHARS: usize = 10;

/// Errors raised by the validating [`AuthConfig`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Bearer and API key auth need a token.
    #[error("token must not be empty")]
    EmptyToken,
    /// API key auth needs the header to send the key in.
    #[error("header name must not be empty")]
    EmptyHeaderName,
}

/// Authentication scheme applied to every built request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AuthRecord", into = "AuthRecord")]
pub enum AuthConfig {
    /// No authentication headers.
    #[default]
    None,
    /// `Authorization: Bearer <token>`
    Bearer { token: String },
    /// `<header_name>: <token>`
    ApiKey { token: String, header_name: String },
}

impl AuthConfig {
    /// Bearer auth with a non-empty token.
    pub fn bearer(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(AuthConfig::Bearer { token })
    }

    /// API key auth with a non-empty token and header name.
    pub fn api_key(
        token: impl Into<String>,
        header_name: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let token = token.into();
        let header_name = header_name.into();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        if header_name.trim().is_empty() {
            return Err(AuthError::EmptyHeaderName);
        }
        Ok(AuthConfig::ApiKey { token, header_name })
    }

    /// The persisted `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::ApiKey { .. } => "apiKey",
        }
    }

    /// Whether this is [`AuthConfig::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, AuthConfig::None)
    }

}

impl fmt::Display for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Wire form of [`AuthConfig`]: `{ "type", "token"?, "headerName"? }`.
///
/// Persisted values are read leniently. Unknown types read as `none`, and
/// missing fields read as empty strings, which [`build_auth_headers`] then
/// ignores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
}

impl From<AuthRecord> for AuthConfig {
    fn from(record: AuthRecord) -> Self {
        let token = record.token.unwrap_or_default();
        match record.kind.as_str() {
            "bearer" => AuthConfig::Bearer { token },
            "apiKey" => AuthConfig::ApiKey {
                token,
                header_name: record.header_name.unwrap_or_default(),
            },
            "none" | "" => AuthConfig::None,
            other => {
                log::warn!("Unknown auth type {:?}, treating as none", other);
                AuthConfig::None
            }
        }
    }
}

impl From<AuthConfig> for AuthRecord {
    fn from(config: AuthConfig) -> Self {
        let kind = config.kind().to_string();
        match config {
            AuthConfig::None => AuthRecord {
                kind,
                ..Default::default()
            },
            AuthConfig::Bearer { token } => AuthRecord {
                kind,
                token: Some(token),
                header_name: None,
            },
            AuthConfig::ApiKey { token, header_name } => AuthRecord {
                kind,
                token: Some(token),
                header_name: Some(header_name),
            },
        }
    }
}

/// Computes the headers an auth setting contributes to a request.
///
/// # Returns
///
/// - `{}` for `None` or an empty token
/// - `{"Authorization": "Bearer <token>"}` for bearer auth
/// - `{<header_name>: <token>}` for API key auth with a non-empty header name
/// - `{}` otherwise
///
/// # Examples
///
/// ```
/// use api_tester::auth::{build_auth_headers, AuthConfig};
///
/// let auth = AuthConfig::bearer("abc").unwrap();
/// let headers = build_auth_headers(&auth);
/// assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
///
/// assert!(build_auth_headers(&AuthConfig::None).is_empty());
/// ```
pub fn build_auth_headers(auth: &AuthConfig) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    match auth {
        AuthConfig::None => {}
        AuthConfig::Bearer { token } if !token.is_empty() => {
            headers.insert("Authorization".to_string(), bearer::bearer_token(token));
        }
        AuthConfig::ApiKey { token, header_name }
            if !token.is_empty() && !header_name.is_empty() =>
        {
            headers.insert(header_name.clone(), token.clone());
        }
        _ => {}
    }

    headers
}

/// Shortens a token to its first ten characters followed by `...`.
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(MASK_VISIBLE_CHARS).collect();
    format!("{}...", visible)
}

/// The "show current config" text, with the token masked.
pub fn describe(auth: &AuthConfig) -> String {
    match auth {
        AuthConfig::None => "No authentication configured".to_string(),
        AuthConfig::Bearer { token } => {
            format!("Type: bearer\nToken: {}", masked_or_none(token))
        }
        AuthConfig::ApiKey { token, header_name } => {
            let mut text = format!("Type: apiKey\nToken: {}", masked_or_none(token));
            if !header_name.is_empty() {
                text.push_str(&format!("\nHeader: {}", header_name));
            }
            text
        }
    }
}

fn masked_or_none(token: &str) -> String {
    if token.is_empty() {
        "none".to_string()
    } else {
        mask_token(token)
    }
}
