//! Git remote address parsing.
//!
//! Handles every form `git remote -v` prints: HTTP(S) URLs, `ssh://` URLs and
//! SCP-style `user@host:path` addresses.

use std::fmt;

use super::error::LocalDiscoveryError;
use crate::gitlab::ProjectPath;

/// Host and project path derived from a git remote address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    host: String,
    project: ProjectPath,
}

impl RemoteDescriptor {
    /// Builds a descriptor from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError::InvalidRemoteUrl`] when the host or the
    /// project path is blank.
    pub fn new(host: &str, project: &str) -> Result<Self, LocalDiscoveryError> {
        let invalid = || LocalDiscoveryError::InvalidRemoteUrl {
            url: format!("{host}:{project}"),
        };
        let trimmed_host = host.trim();
        if trimmed_host.is_empty() {
            return Err(invalid());
        }
        let project_path = ProjectPath::new(project).map_err(|_| invalid())?;
        Ok(Self {
            host: trimmed_host.to_owned(),
            project: project_path,
        })
    }

    /// Server host, e.g. `gitlab.example.com`.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Project path on the server, e.g. `group/project`.
    #[must_use]
    pub const fn project(&self) -> &ProjectPath {
        &self.project
    }
}

impl fmt::Display for RemoteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.project)
    }
}

/// Parses a git remote address into host and project path.
///
/// Supported forms include:
/// - `https://gitlab.example.com/group/project.git`
/// - `git@gitlab.example.com:group/project.git`
/// - `ssh://git@gitlab.example.com/group/project.git`
/// - `gitlab.example.com:group/project`
///
/// User info and scheme are dropped, the remainder is split at the first `:`
/// or `/`, and a trailing `.git` is removed from the path.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::InvalidRemoteUrl`] when no separator is
/// present or either side of it is empty.
pub fn parse_remote(remote_addr: &str) -> Result<RemoteDescriptor, LocalDiscoveryError> {
    let invalid = || LocalDiscoveryError::InvalidRemoteUrl {
        url: remote_addr.to_owned(),
    };

    let trimmed = remote_addr.trim();
    let without_user = trimmed.split_once('@').map_or(trimmed, |(_, rest)| rest);
    let without_scheme = without_user
        .split_once("://")
        .map_or(without_user, |(_, rest)| rest);

    let (host, raw_path) = without_scheme
        .split_once([':', '/'])
        .ok_or_else(invalid)?;
    let path = raw_path.strip_suffix(".git").unwrap_or(raw_path);

    RemoteDescriptor::new(host, path).map_err(|_| invalid())
}

/// Finds the URL of `name` in the output of `git remote -v`.
///
/// The first line starting with `name` followed by a tab wins; the
/// ` (fetch)` or ` (push)` suffix is removed.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::UnknownRemote`] when no line names the
/// remote.
pub fn remote_url_from_remote_output(
    name: &str,
    output: &str,
) -> Result<String, LocalDiscoveryError> {
    output
        .lines()
        .find_map(|line| line.strip_prefix(name)?.strip_prefix('\t'))
        .map(|rest| {
            let url = rest
                .strip_suffix(" (fetch)")
                .or_else(|| rest.strip_suffix(" (push)"))
                .unwrap_or(rest);
            url.trim().to_owned()
        })
        .ok_or_else(|| LocalDiscoveryError::UnknownRemote {
            name: name.to_owned(),
        })
}
