//! Error types exposed by the GitLab client layer.

use std::fmt;

use thiserror::Error;

/// The kind of object a `404 Not Found` (or a local lookup miss) refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// The project addressed by the remote path.
    Project,
    /// A merge request, by internal ID or source branch.
    MergeRequest,
    /// A repository branch.
    Branch,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Project => "project",
            Self::MergeRequest => "merge request",
            Self::Branch => "branch",
        };
        f.write_str(label)
    }
}

/// Errors surfaced while resolving input or communicating with GitLab.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabError {
    /// The git remote URL has no recognisable host and project path.
    #[error("could not parse remote URL: {url}")]
    InvalidRemoteUrl {
        /// The unparseable remote address.
        url: String,
    },

    /// The named git remote is not configured.
    #[error("could not find remote: {name}")]
    UnknownRemote {
        /// Name of the missing remote.
        name: String,
    },

    /// The remote points at a host that is known not to run GitLab.
    #[error("GitLab server on \"{host}\"? I don't think so")]
    UnsupportedHost {
        /// Host parsed from the remote URL.
        host: String,
    },

    /// A local git operation failed.
    #[error("git: {message}")]
    LocalRepository {
        /// Error detail from git or repository discovery.
        message: String,
    },

    /// Networking failed while calling GitLab.
    #[error("network error talking to GitLab: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// GitLab answered with a body that could not be decoded.
    #[error("unexpected response from GitLab: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// GitLab returned a non-success status.
    #[error("GitLab ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message decoded from the response, or the status text.
        message: String,
    },

    /// A project, merge request, or branch does not exist.
    #[error("could not find {kind}: {identifier}")]
    NotFound {
        /// What was being looked up.
        kind: NotFoundKind,
        /// Human-readable identifier, with any token masked.
        identifier: String,
    },

    /// GitLab rejected merge request creation with a `404`, which it also
    /// uses when the source branch already has an open merge request.
    #[error("there already exists a merge request for: {source_branch}")]
    DuplicateMergeRequest {
        /// Source branch of the rejected merge request.
        source_branch: String,
    },

    /// The session endpoint refused the supplied login.
    #[error("GitLab rejected the login: {message}")]
    Authentication {
        /// HTTP status text returned by the session endpoint.
        message: String,
    },

    /// No private token could be obtained from any source.
    #[error(
        "could not get API token, get one from: \"{token_url}\"\n\n\
         export as LAB_PRIVATE_TOKEN or use as flag: --token <token>"
    )]
    MissingToken {
        /// Server page where a private token can be generated.
        token_url: String,
    },

    /// The positional merge request argument is not a number.
    #[error("you did not provide a valid ID: {argument}")]
    InvalidMergeRequestId {
        /// The rejected argument.
        argument: String,
    },

    /// Configuration or the persisted token file could not be used.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
