//! Blocking HTTP client shared by the gateway operations.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::gitlab::error::LabError;
use crate::gitlab::server::{ApiEndpoint, ServerHandle};

const USER_AGENT: &str = concat!("lab/", env!("CARGO_PKG_VERSION"));

/// GitLab API client bound to one server.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    server: ServerHandle,
    http: Client,
}

/// Status and body of a completed request.
#[derive(Debug)]
pub(super) struct RawResponse {
    pub(super) status: StatusCode,
    pub(super) body: String,
    pub(super) display_url: String,
}

impl GitLabClient {
    /// Creates a client with no transport timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(server: ServerHandle) -> Result<Self, LabError> {
        Self::with_timeout(server, None)
    }

    /// Creates a client with an optional transport timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn with_timeout(server: ServerHandle, timeout: Option<Duration>) -> Result<Self, LabError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|error| LabError::Configuration {
                message: format!("failed to configure GitLab HTTP client: {error}"),
            })?;
        Ok(Self { server, http })
    }

    /// The server this client talks to.
    #[must_use]
    pub const fn server(&self) -> &ServerHandle {
        &self.server
    }

    pub(super) fn send_empty(
        &self,
        method: Method,
        endpoint: &ApiEndpoint,
    ) -> Result<RawResponse, LabError> {
        let url = endpoint.request_url()?;
        self.dispatch(self.http.request(method, url), endpoint)
    }

    pub(super) fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &ApiEndpoint,
        body: &T,
    ) -> Result<RawResponse, LabError> {
        let url = endpoint.request_url()?;
        self.dispatch(self.http.request(method, url).json(body), endpoint)
    }

    fn dispatch(
        &self,
        request: RequestBuilder,
        endpoint: &ApiEndpoint,
    ) -> Result<RawResponse, LabError> {
        let display_url = endpoint.display_url();
        let built = request
            .build()
            .map_err(|error| transport_error(&display_url, error))?;
        tracing::debug!(method = %built.method(), url = %display_url, "sending GitLab request");

        let response = self
            .http
            .execute(built)
            .map_err(|error| transport_error(&display_url, error))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|error| transport_error(&display_url, error))?;

        tracing::debug!(status = status.as_u16(), url = %display_url, "GitLab responded");
        Ok(RawResponse {
            status,
            body,
            display_url,
        })
    }
}

/// Describes a reqwest failure without the token-bearing request URL.
fn transport_error(display_url: &str, error: reqwest::Error) -> LabError {
    let stripped = error.without_url();
    let mut message = format!("{display_url}: {stripped}");
    let mut source = stripped.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    LabError::Transport { message }
}
