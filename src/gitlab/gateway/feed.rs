//! Dashboard Atom feed.

use reqwest::Method;

use super::FeedGateway;
use super::client::GitLabClient;
use crate::gitlab::error::LabError;
use crate::gitlab::models::ActivityFeed;

impl FeedGateway for GitLabClient {
    fn dashboard_feed(&self) -> Result<ActivityFeed, LabError> {
        let endpoint = self.server().feed_endpoint();
        let response = self.send_empty(Method::GET, &endpoint)?;

        if response.status.is_client_error() || response.status.is_server_error() {
            return Err(LabError::Api {
                status: response.status.as_u16(),
                message: format!("could not load {}", response.display_url),
            });
        }

        quick_xml::de::from_str(&response.body).map_err(|error| LabError::Decode {
            message: format!("{}: {error}", response.display_url),
        })
    }
}
