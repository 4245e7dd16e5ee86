//! Authenticated request execution.
//!
//! A [`Client`] owns its configuration (origin and credential) and a shared
//! transport. Each call to [`Client::execute`] is exactly one blocking GET.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::classify::{classify_response, classify_transport};
use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::output::{normalize, Output, OutputShape};
use crate::query::RequestPath;
use crate::ApiError;

/// How a descriptor's path is resolved against the configured origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Root-relative path, prefixed with the base origin.
    Relative,
    /// Full URL, used verbatim.
    Absolute,
}

impl Target {
    pub fn of(path: &str) -> Self {
        if path.starts_with("http://") || path.starts_with("https://") {
            Self::Absolute
        } else {
            Self::Relative
        }
    }
}

/// A fully assembled request: path or URL plus the desired output shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    path: String,
    shape: OutputShape,
}

impl RequestDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            shape: OutputShape::default(),
        }
    }

    pub fn with_shape(mut self, shape: OutputShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn shape(&self) -> OutputShape {
        self.shape
    }

    pub fn target(&self) -> Target {
        Target::of(&self.path)
    }
}

impl From<&str> for RequestDescriptor {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for RequestDescriptor {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&RequestPath> for RequestDescriptor {
    fn from(path: &RequestPath) -> Self {
        Self::new(path.render())
    }
}

impl From<RequestPath> for RequestDescriptor {
    fn from(path: RequestPath) -> Self {
        Self::new(path.render())
    }
}

/// Client session for the economic-data API.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    http_client: Arc<dyn HttpClient>,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Client {
    /// Build with the blocking reqwest transport.
    ///
    /// Must not be called from inside a Tokio runtime: `reqwest::blocking` panics
    /// there. Async applications should call it via `spawn_blocking`, or pass their
    /// own transport to [`Client::with_http_client`].
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Build from environment variables with the production transport.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replace the credential, validating its format first.
    pub fn login(&mut self, credential: &str) -> Result<(), ApiError> {
        let credential = Credential::parse(credential)?;
        debug!(identity = credential.identity(), "credential updated");
        self.config = self.config.clone().with_credential(credential);
        Ok(())
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.config.credential()
    }

    /// Resolve a path against the base origin. Absolute URLs pass through.
    pub fn resolve_url(&self, path: &str) -> String {
        match Target::of(path) {
            Target::Absolute => path.to_owned(),
            Target::Relative if path.starts_with('/') => {
                format!("{}{path}", self.config.base_url())
            }
            Target::Relative => format!("{}/{path}", self.config.base_url()),
        }
    }

    /// Perform the single GET for `descriptor` and return the raw response.
    ///
    /// Transport failures are classified; HTTP statuses are not inspected here.
    pub fn execute(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, ApiError> {
        let url = self.resolve_url(descriptor.path());
        let mut request = HttpRequest::get(&url);
        if let Some(credential) = self.config.credential() {
            request = request.with_header(AUTHORIZATION.as_str(), credential.as_str());
        }

        debug!(
            target_kind = ?descriptor.target(),
            authenticated = request.header(AUTHORIZATION.as_str()).is_some(),
            "sending request"
        );

        let response = self
            .http_client
            .execute(request)
            .map_err(|error| classify_transport(&error))?;

        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }

    /// Execute, classify, and reshape the response.
    pub fn fetch(&self, descriptor: &RequestDescriptor) -> Result<Output, ApiError> {
        let response = self.execute(descriptor)?;
        let body = classify_response(&response)?;
        Ok(normalize(body, descriptor.shape()))
    }

    /// Variant of [`Client::fetch`] taking a string output selector.
    ///
    /// An unknown selector fails before any request is sent.
    pub fn fetch_with(&self, path: impl Into<String>, selector: Option<&str>) -> Result<Output, ApiError> {
        let shape = OutputShape::from_selector(selector)?;
        self.fetch(&RequestDescriptor::new(path).with_shape(shape))
    }
}
