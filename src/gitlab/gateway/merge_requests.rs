//! Merge request endpoints.

use reqwest::{Method, StatusCode};

use super::MergeRequestGateway;
use super::client::GitLabClient;
use super::error_mapping::{decode_json, status_error, unexpected_status};
use crate::gitlab::error::{LabError, NotFoundKind};
use crate::gitlab::locator::{GlobalId, ProjectPath, escape_segment};
use crate::gitlab::models::{CreateMergeRequest, MergeRequest};

const DEFAULT_STATE: &str = "opened";

impl MergeRequestGateway for GitLabClient {
    fn create_merge_request(
        &self,
        project: &ProjectPath,
        request: &CreateMergeRequest,
    ) -> Result<MergeRequest, LabError> {
        let escaped = project.escaped();
        let endpoint = self
            .server()
            .endpoint(&["projects", &escaped, "merge_requests"]);
        let response = self.send_json(Method::POST, &endpoint, request)?;

        match response.status {
            StatusCode::CREATED => decode_json(&response),
            StatusCode::NOT_FOUND => Err(LabError::DuplicateMergeRequest {
                source_branch: request.source_branch.clone(),
            }),
            _ => Err(unexpected_status(StatusCode::CREATED, &response)),
        }
    }

    fn query_merge_requests(
        &self,
        project: &ProjectPath,
        state: &str,
    ) -> Result<Vec<MergeRequest>, LabError> {
        let escaped = project.escaped();
        let effective_state = if state.trim().is_empty() {
            DEFAULT_STATE
        } else {
            state.trim()
        };
        let endpoint = self
            .server()
            .endpoint(&["projects", &escaped, "merge_requests"])
            .with_query("state", effective_state);
        let response = self.send_empty(Method::GET, &endpoint)?;

        match response.status {
            StatusCode::OK => decode_json(&response),
            StatusCode::NOT_FOUND => Err(LabError::NotFound {
                kind: NotFoundKind::Project,
                identifier: response.display_url,
            }),
            _ => Err(status_error(&response)),
        }
    }

    fn accept_merge_request(&self, project: &ProjectPath, id: GlobalId) -> Result<(), LabError> {
        let escaped = project.escaped();
        let id_segment = id.to_string();
        let endpoint = self.server().endpoint(&[
            "projects",
            &escaped,
            "merge_request",
            &id_segment,
            "merge",
        ]);
        let response = self.send_empty(Method::PUT, &endpoint)?;

        match response.status {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(LabError::NotFound {
                kind: NotFoundKind::MergeRequest,
                identifier: format!("PUT {}", response.display_url),
            }),
            _ => Err(unexpected_status(StatusCode::OK, &response)),
        }
    }

    fn remove_branch(&self, project: &ProjectPath, branch: &str) -> Result<(), LabError> {
        let escaped = project.escaped();
        let escaped_branch = escape_segment(branch);
        let endpoint = self.server().endpoint(&[
            "projects",
            &escaped,
            "repository",
            "branches",
            &escaped_branch,
        ]);
        let response = self.send_empty(Method::DELETE, &endpoint)?;

        match response.status {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(LabError::NotFound {
                kind: NotFoundKind::Branch,
                identifier: format!("{branch} on project {project}"),
            }),
            _ => Err(unexpected_status(StatusCode::OK, &response)),
        }
    }
}
