//! GitLab API access: identities, URL construction, gateways, and merge
//! request resolution.

pub mod error;
pub mod gateway;
pub mod intake;
pub mod locator;
pub mod models;
pub mod server;

pub use error::{LabError, NotFoundKind};
pub use gateway::{FeedGateway, GitLabClient, MergeRequestGateway, SessionGateway};
#[cfg(test)]
pub use gateway::{MockFeedGateway, MockMergeRequestGateway, MockSessionGateway};
pub use intake::{MergeRequestIntake, MergeRequestSelector, select_merge_request};
pub use locator::{GlobalId, InternalId, PrivateToken, ProjectPath, escape_segment};
pub use models::{ActivityFeed, CreateMergeRequest, FeedAuthor, FeedEntry, MergeRequest};
pub use server::{ApiEndpoint, DEFAULT_API_PATH, DEFAULT_SCHEME, ServerHandle};
