//! Gateways for talking to the GitLab REST API.
//!
//! The traits are the seams the workflow actions and the credential resolver
//! depend on; [`GitLabClient`] implements all of them over a blocking
//! `reqwest` client. Every request is built from a [`ServerHandle`] so
//! project paths keep their single `%2F` escaping on the wire.
//!
//! [`ServerHandle`]: crate::gitlab::ServerHandle

mod client;
mod error_mapping;
mod feed;
mod merge_requests;
mod session;

pub use client::GitLabClient;

use crate::gitlab::error::LabError;
use crate::gitlab::locator::{GlobalId, PrivateToken, ProjectPath};
use crate::gitlab::models::{ActivityFeed, CreateMergeRequest, MergeRequest};

/// Merge request operations on one project.
#[cfg_attr(test, mockall::automock)]
pub trait MergeRequestGateway {
    /// Opens a merge request.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::DuplicateMergeRequest`] when GitLab answers `404`
    /// (it does so when the source branch already has a merge request), or
    /// [`LabError::Api`] for any other unexpected status.
    fn create_merge_request(
        &self,
        project: &ProjectPath,
        request: &CreateMergeRequest,
    ) -> Result<MergeRequest, LabError>;

    /// Lists merge requests in `state`; an empty state means `opened`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::NotFound`] when the project does not exist,
    /// [`LabError::Api`] for other failures and [`LabError::Decode`] when
    /// the body is not a JSON list of merge requests.
    fn query_merge_requests(
        &self,
        project: &ProjectPath,
        state: &str,
    ) -> Result<Vec<MergeRequest>, LabError>;

    /// Merges a merge request, addressed by its global ID.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::NotFound`] when the merge request does not exist
    /// or [`LabError::Api`] when GitLab refuses the merge.
    fn accept_merge_request(&self, project: &ProjectPath, id: GlobalId) -> Result<(), LabError>;

    /// Deletes a repository branch.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::NotFound`] when the branch does not exist or
    /// [`LabError::Api`] for other failures.
    fn remove_branch(&self, project: &ProjectPath, branch: &str) -> Result<(), LabError>;
}

/// Exchanges a login and password for a private token.
#[cfg_attr(test, mockall::automock)]
pub trait SessionGateway {
    /// Creates a session and returns its private token.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Authentication`] when GitLab rejects the login.
    fn get_session(&self, login: &str, password: &str) -> Result<PrivateToken, LabError>;
}

/// Reads the dashboard activity feed.
#[cfg_attr(test, mockall::automock)]
pub trait FeedGateway {
    /// Fetches and decodes the Atom dashboard feed.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Api`] for error statuses and [`LabError::Decode`]
    /// when the feed is not valid Atom.
    fn dashboard_feed(&self) -> Result<ActivityFeed, LabError>;
}
