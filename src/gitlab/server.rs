//! Server handle and URL construction.
//!
//! Two URL families are produced for every API endpoint: a request URL used
//! on the wire and a display URL used in logs and error messages. The request
//! URL is assembled from already escaped segments and parsed as a whole, so a
//! `%2F` inside a project segment reaches the server untouched. The display
//! URL never contains the private token.

use url::Url;

use super::error::LabError;
use super::locator::{InternalId, PrivateToken, ProjectPath, escape_segment};
use crate::local::RemoteDescriptor;

/// Versioned API base path.
pub const DEFAULT_API_PATH: &str = "/api/v3";

/// Scheme used when none is configured.
pub const DEFAULT_SCHEME: &str = "http";

const TOKEN_PARAMETER: &str = "private_token";
const TOKEN_MASK: &str = "***";
const DASHBOARD_FEED_PATH: &str = "/dashboard.atom";
const PRIVATE_TOKEN_PAGE: &str = "/profile/account";

/// Hosts that never serve the GitLab API.
const UNSUPPORTED_HOSTS: [&str; 3] = ["github.com", "code.google.com", "bitbucket.org"];

/// Connection details for one GitLab server.
///
/// A handle without a token can only reach unauthenticated endpoints; call
/// [`ServerHandle::with_token`] once credentials are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHandle {
    scheme: String,
    host: String,
    api_path: String,
    token: Option<PrivateToken>,
}

impl ServerHandle {
    /// Creates a handle for `scheme://host` using the default API path.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the scheme or host is blank.
    pub fn new(scheme: &str, host: &str) -> Result<Self, LabError> {
        let trimmed_scheme = scheme.trim();
        let trimmed_host = host.trim().trim_end_matches('/');
        if trimmed_scheme.is_empty() || trimmed_host.is_empty() {
            return Err(LabError::Configuration {
                message: format!("server address is incomplete: {scheme}://{host}"),
            });
        }
        Ok(Self {
            scheme: trimmed_scheme.to_owned(),
            host: trimmed_host.to_owned(),
            api_path: DEFAULT_API_PATH.to_owned(),
            token: None,
        })
    }

    /// Creates a handle for the host a git remote points at.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::UnsupportedHost`] for hosts known not to run
    /// GitLab, or [`LabError::Configuration`] for a blank host.
    pub fn for_remote(remote: &RemoteDescriptor, scheme: &str) -> Result<Self, LabError> {
        let host = remote.host();
        let lowered = host.to_ascii_lowercase();
        if UNSUPPORTED_HOSTS
            .iter()
            .any(|unsupported| lowered.ends_with(unsupported))
        {
            return Err(LabError::UnsupportedHost {
                host: host.to_owned(),
            });
        }
        Self::new(scheme, host)
    }

    /// Creates a handle from a base URL such as `http://127.0.0.1:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the URL has no host.
    pub fn from_base_url(base_url: &str) -> Result<Self, LabError> {
        let parsed = Url::parse(base_url).map_err(|error| LabError::Configuration {
            message: format!("invalid server URL {base_url}: {error}"),
        })?;
        let host = parsed.host_str().ok_or_else(|| LabError::Configuration {
            message: format!("server URL has no host: {base_url}"),
        })?;
        let authority = parsed
            .port()
            .map_or_else(|| host.to_owned(), |port| format!("{host}:{port}"));
        Self::new(parsed.scheme(), &authority)
    }

    /// Replaces the API base path (e.g. `/api/v4`).
    #[must_use]
    pub fn with_api_path(mut self, api_path: &str) -> Self {
        let trimmed = api_path.trim().trim_end_matches('/');
        self.api_path = if trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Returns an authenticated copy of this handle.
    #[must_use]
    pub fn with_token(mut self, token: PrivateToken) -> Self {
        self.token = Some(token);
        self
    }

    /// URL scheme, e.g. `http`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host, optionally with a port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// API base path, e.g. `/api/v3`.
    #[must_use]
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Private token, once credentials are resolved.
    #[must_use]
    pub const fn token(&self) -> Option<&PrivateToken> {
        self.token.as_ref()
    }

    fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Web page of the project.
    #[must_use]
    pub fn project_url(&self, project: &ProjectPath) -> String {
        format!("{}/{}", self.origin(), project.as_str())
    }

    /// Web page of a merge request.
    #[must_use]
    pub fn merge_request_url(&self, project: &ProjectPath, iid: InternalId) -> String {
        format!(
            "{}/{}/merge_requests/{}",
            self.origin(),
            project.as_str(),
            iid.get()
        )
    }

    /// Page where users generate a private token.
    #[must_use]
    pub fn private_token_url(&self) -> String {
        format!("{}{PRIVATE_TOKEN_PAGE}", self.origin())
    }

    /// Authenticated API endpoint built from pre-escaped path segments.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> ApiEndpoint {
        self.build_endpoint(segments, true)
    }

    /// API endpoint that carries no token (the session endpoint).
    #[must_use]
    pub fn unauthenticated_endpoint(&self, segments: &[&str]) -> ApiEndpoint {
        self.build_endpoint(segments, false)
    }

    /// Authenticated dashboard Atom feed, outside the API base path.
    #[must_use]
    pub fn feed_endpoint(&self) -> ApiEndpoint {
        ApiEndpoint {
            origin: self.origin(),
            path: DASHBOARD_FEED_PATH.to_owned(),
            token: self.token.clone(),
            query: Vec::new(),
        }
    }

    fn build_endpoint(&self, segments: &[&str], authenticated: bool) -> ApiEndpoint {
        let path = format!("{}/{}", self.api_path, segments.join("/"));
        ApiEndpoint {
            origin: self.origin(),
            path,
            token: if authenticated {
                self.token.clone()
            } else {
                None
            },
            query: Vec::new(),
        }
    }
}

/// A single API endpoint with its query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    origin: String,
    path: String,
    token: Option<PrivateToken>,
    query: Vec<(String, String)>,
}

impl ApiEndpoint {
    /// Appends a query parameter; the value is escaped when rendered.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    /// URL sent on the wire, token included and path escapes preserved.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] if the assembled URL is invalid.
    pub fn request_url(&self) -> Result<Url, LabError> {
        let token = self.token.as_ref().map(PrivateToken::value);
        let raw = self.render(token);
        Url::parse(&raw).map_err(|error| LabError::Configuration {
            message: format!("invalid request URL {}: {error}", self.display_url()),
        })
    }

    /// URL safe to show to people: the token is replaced by `***`.
    #[must_use]
    pub fn display_url(&self) -> String {
        let mask = self.token.as_ref().map(|_| TOKEN_MASK);
        self.render(mask)
    }

    fn render(&self, token: Option<&str>) -> String {
        let token_pair = token.map(|value| (TOKEN_PARAMETER, value));
        let pairs: Vec<String> = token_pair
            .into_iter()
            .chain(
                self.query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
            .map(|(key, value)| {
                if value == TOKEN_MASK && key == TOKEN_PARAMETER {
                    format!("{key}={value}")
                } else {
                    format!("{key}={}", escape_segment(value))
                }
            })
            .collect();

        if pairs.is_empty() {
            format!("{}{}", self.origin, self.path)
        } else {
            format!("{}{}?{}", self.origin, self.path, pairs.join("&"))
        }
    }
}
