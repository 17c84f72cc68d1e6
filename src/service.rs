//! The request service shared by the command flow and the request panel.

use crate::auth::{build_auth_headers, AuthConfig, AuthStore};
use crate::base_url::BaseUrlStore;
use crate::builder::{self, RequestInput};
use crate::config::get_config;
use crate::executor::{self, ExecutionConfig};
use crate::models::{HttpMethod, RequestSpec, ResponseResult, Route};
use crate::storage::SharedStorage;
use std::collections::HashMap;

/// Builds and sends requests using the workspace settings.
#[derive(Clone)]
pub struct RequestService {
    auth: AuthStore<SharedStorage>,
    base_url: BaseUrlStore<SharedStorage>,
    execution: Option<ExecutionConfig>,
}

impl RequestService {
    /// Creates a service over the workspace storage.
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            auth: AuthStore::new(storage.clone()),
            base_url: BaseUrlStore::new(storage),
            execution: None,
        }
    }

    /// Uses `config` for every send instead of the global settings.
    pub fn with_execution_config(mut self, config: ExecutionConfig) -> Self {
        self.execution = Some(config);
        self
    }

    /// The auth store.
    pub fn auth_store(&self) -> &AuthStore<SharedStorage> {
        &self.auth
    }

    /// The base URL store.
    pub fn base_url_store(&self) -> &BaseUrlStore<SharedStorage> {
        &self.base_url
    }

    /// The active auth setting.
    pub fn auth(&self) -> AuthConfig {
        self.auth.get()
    }

    /// Headers the active auth setting adds to requests.
    pub fn auth_headers(&self) -> HashMap<String, String> {
        build_auth_headers(&self.auth.get())
    }

    /// Builds the request for `route` against `base_url`.
    pub fn prepare(&self, route: &Route, base_url: &str, input: RequestInput) -> RequestSpec {
        let defaults = get_config().default_headers;
        builder::build_request_with_defaults(route, base_url, &self.auth.get(), &defaults, input)
    }

    /// Builds a request for an explicit URL, as edited in the panel.
    pub fn prepare_for_url(
        &self,
        method: HttpMethod,
        url: String,
        input: RequestInput,
    ) -> RequestSpec {
        let defaults = get_config().default_headers;
        builder::build_for_url(method, url, &self.auth.get(), &defaults, input)
    }

    /// Sends a built request.
    pub async fn send(&self, request: &RequestSpec) -> ResponseResult {
        let config = self.execution.clone().unwrap_or_default();
        executor::execute(request, &config).await
    }
}
