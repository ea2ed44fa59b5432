//! Merge request resolution.
//!
//! Users name a merge request either by its project-scoped number or
//! implicitly through the branch they have checked out. Both are resolved
//! against the list GitLab returns, and the first match in response order
//! wins.

use std::fmt;

use super::error::{LabError, NotFoundKind};
use super::gateway::MergeRequestGateway;
use super::locator::{InternalId, ProjectPath};
use super::models::MergeRequest;

/// How the user identified the merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeRequestSelector {
    /// Explicit internal ID (`lab mr browse 12`).
    Id(InternalId),
    /// The merge request whose source branch is this branch.
    Branch(String),
}

impl MergeRequestSelector {
    /// Parses the optional positional argument of a merge request command.
    ///
    /// `current_branch` is only called when no argument was given.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::InvalidMergeRequestId`] for a non-numeric
    /// argument and propagates failures of `current_branch`.
    pub fn from_argument<F>(argument: Option<&str>, current_branch: F) -> Result<Self, LabError>
    where
        F: FnOnce() -> Result<String, LabError>,
    {
        match argument.map(str::trim).filter(|value| !value.is_empty()) {
            Some(raw) => raw
                .parse::<u64>()
                .map(|value| Self::Id(InternalId::new(value)))
                .map_err(|_| LabError::InvalidMergeRequestId {
                    argument: raw.to_owned(),
                }),
            None => current_branch().map(Self::Branch),
        }
    }

    /// Whether the user typed an ID.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Id(_))
    }
}

impl fmt::Display for MergeRequestSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(iid) => write!(f, "#{iid}"),
            Self::Branch(branch) => write!(f, "branch {branch}"),
        }
    }
}

/// Picks the merge request `selector` refers to from `candidates`.
///
/// # Errors
///
/// Returns [`LabError::NotFound`] naming the ID, or the branch and project,
/// when no candidate matches.
pub fn select_merge_request<'a>(
    candidates: &'a [MergeRequest],
    selector: &MergeRequestSelector,
    project: &ProjectPath,
) -> Result<&'a MergeRequest, LabError> {
    let found = match selector {
        MergeRequestSelector::Id(iid) => candidates.iter().find(|candidate| candidate.iid == *iid),
        MergeRequestSelector::Branch(branch) => candidates
            .iter()
            .find(|candidate| candidate.source_branch == *branch),
    };

    found.ok_or_else(|| LabError::NotFound {
        kind: NotFoundKind::MergeRequest,
        identifier: match selector {
            MergeRequestSelector::Id(iid) => format!("#{iid}"),
            MergeRequestSelector::Branch(branch) => {
                format!("branch {branch} on project {project}")
            }
        },
    })
}

/// Fetches candidates through a gateway and selects one.
pub struct MergeRequestIntake<'client, Gateway>
where
    Gateway: MergeRequestGateway + ?Sized,
{
    client: &'client Gateway,
}

impl<'client, Gateway> MergeRequestIntake<'client, Gateway>
where
    Gateway: MergeRequestGateway + ?Sized,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Resolves `selector` among the merge requests in `state`.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures and returns [`LabError::NotFound`] when
    /// nothing matches.
    pub fn resolve(
        &self,
        project: &ProjectPath,
        state: &str,
        selector: &MergeRequestSelector,
    ) -> Result<MergeRequest, LabError> {
        let candidates = self.client.query_merge_requests(project, state)?;
        tracing::debug!(
            count = candidates.len(),
            %selector,
            "resolving merge request"
        );
        select_merge_request(&candidates, selector, project).cloned()
    }
}
