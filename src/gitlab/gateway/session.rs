//! Session endpoint used to trade a login for a private token.

use reqwest::{Method, StatusCode};

use super::SessionGateway;
use super::client::GitLabClient;
use super::error_mapping::{decode_json, status_text};
use crate::gitlab::error::LabError;
use crate::gitlab::locator::PrivateToken;
use crate::gitlab::models::{Session, SessionRequest};

impl SessionGateway for GitLabClient {
    fn get_session(&self, login: &str, password: &str) -> Result<PrivateToken, LabError> {
        let endpoint = self.server().unauthenticated_endpoint(&["session"]);
        let payload = SessionRequest { login, password };
        let response = self.send_json(Method::POST, &endpoint, &payload)?;

        if response.status != StatusCode::CREATED {
            return Err(LabError::Authentication {
                message: status_text(response.status),
            });
        }

        let session: Session = decode_json(&response)?;
        PrivateToken::new(&session.private_token).map_err(|_| LabError::Decode {
            message: format!("{}: session carried no private token", response.display_url),
        })
    }
}
