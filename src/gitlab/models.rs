//! Data returned from and sent to the GitLab API.

use serde::{Deserialize, Serialize};

use super::locator::{GlobalId, InternalId};

/// Merge request as returned by `GET /projects/:id/merge_requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Server-wide identifier used by the merge endpoint.
    pub id: GlobalId,
    /// Project-scoped number users type and see.
    pub iid: InternalId,
    /// Merge request title.
    #[serde(default)]
    pub title: String,
    /// Merge request description; GitLab sends `null` when empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Branch the changes come from.
    pub source_branch: String,
    /// Branch the changes go into.
    pub target_branch: String,
    /// Lifecycle state such as `opened`, `merged`, or `closed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Web page of the merge request, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}

/// Payload for `POST /projects/:id/merge_requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMergeRequest {
    /// Branch the changes come from.
    pub source_branch: String,
    /// Branch the changes go into.
    pub target_branch: String,
    /// Merge request title.
    pub title: String,
}

/// Payload for `POST /session`.
#[derive(Debug, Serialize)]
pub(crate) struct SessionRequest<'a> {
    pub(crate) login: &'a str,
    pub(crate) password: &'a str,
}

/// Response from `POST /session`.
#[derive(Debug, Deserialize)]
pub(crate) struct Session {
    pub(crate) private_token: String,
}

/// Dashboard activity feed (`/dashboard.atom`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFeed {
    /// Feed title.
    #[serde(default)]
    pub title: String,
    /// Feed entries in server order.
    #[serde(rename = "entry", default)]
    pub entries: Vec<FeedEntry>,
}

/// Single entry of the dashboard activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Entry identifier.
    #[serde(default)]
    pub id: String,
    /// Entry title.
    #[serde(default)]
    pub title: String,
    /// Entry author.
    #[serde(default)]
    pub author: FeedAuthor,
    /// Last update timestamp (RFC 3339).
    #[serde(default)]
    pub updated: String,
    /// Entry summary, often HTML.
    #[serde(default)]
    pub summary: String,
}

/// Author element of a feed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedAuthor {
    /// Display name of the author.
    #[serde(default)]
    pub name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
