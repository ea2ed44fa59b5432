//! Identity wrappers for projects, merge requests, and tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LabError;

/// Escapes a value so it travels as one opaque URL path segment.
///
/// Every reserved character is percent-encoded, including `/`, so
/// `group/project` becomes `group%2Fproject`.
#[must_use]
pub fn escape_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Project path on the GitLab server, e.g. `group/subgroup/project`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectPath(String);

impl ProjectPath {
    /// Wraps a project path, trimming surrounding slashes.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::InvalidRemoteUrl`] when the path is blank.
    pub fn new(value: &str) -> Result<Self, LabError> {
        let trimmed = value.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(LabError::InvalidRemoteUrl {
                url: value.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the unescaped path.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The path escaped as a single segment (`group%2Fproject`).
    #[must_use]
    pub fn escaped(&self) -> String {
        escape_segment(&self.0)
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project-scoped merge request number (the "IID") shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalId(u64);

impl InternalId {
    /// Wraps a raw internal ID.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-wide merge request identifier required by the merge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalId(u64);

impl GlobalId {
    /// Wraps a raw global ID.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Private token wrapper enforcing presence.
///
/// The `Debug` output never contains the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateToken(String);

impl PrivateToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, LabError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LabError::Configuration {
                message: "private token is blank".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps the token when it is non-blank.
    #[must_use]
    pub fn non_blank(token: &str) -> Option<Self> {
        Self::new(token).ok()
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PrivateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateToken(***)")
    }
}

impl AsRef<str> for PrivateToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}
