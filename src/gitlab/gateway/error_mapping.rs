//! Response classification helpers shared by the gateway operations.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::RawResponse;
use crate::gitlab::error::LabError;

/// Decodes a JSON body, reporting failures against the masked URL.
pub(super) fn decode_json<T: DeserializeOwned>(response: &RawResponse) -> Result<T, LabError> {
    serde_json::from_str(&response.body).map_err(|error| LabError::Decode {
        message: format!("{}: {error}", response.display_url),
    })
}

/// Error for a status other than `expected`, preferring GitLab's own message.
pub(super) fn unexpected_status(expected: StatusCode, response: &RawResponse) -> LabError {
    let message = envelope_message(&response.body).unwrap_or_else(|| {
        format!(
            "expected status {}, got {}",
            expected.as_u16(),
            response.status.as_u16()
        )
    });
    LabError::Api {
        status: response.status.as_u16(),
        message,
    }
}

/// Error for a failed status, falling back to the status text.
pub(super) fn status_error(response: &RawResponse) -> LabError {
    let message = envelope_message(&response.body).unwrap_or_else(|| status_text(response.status));
    LabError::Api {
        status: response.status.as_u16(),
        message,
    }
}

/// Reason phrase for a status, e.g. `Unauthorized`.
pub(super) fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), str::to_owned)
}

/// Extracts the human message from a GitLab error body.
///
/// GitLab reports errors as `{"message": ...}` or `{"error": ...}`, where the
/// value is a string, a list of strings, or an object mapping fields to
/// lists of problems.
fn envelope_message(body: &str) -> Option<String> {
    let Ok(Value::Object(envelope)) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    ["message", "error"]
        .iter()
        .filter_map(|key| envelope.get(*key))
        .map(flatten_message)
        .find(|parts| !parts.is_empty())
        .map(|parts| parts.join(", "))
}

fn flatten_message(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => vec![text.trim().to_owned()],
        Value::Array(items) => items.iter().flat_map(flatten_message).collect(),
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(field, problems)| {
                flatten_message(problems)
                    .into_iter()
                    .map(move |problem| format!("{field} {problem}"))
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::message_string(r#"{"message":"my error message"}"#, Some("my error message"))]
    #[case::error_list(r#"{"error":["first","second"]}"#, Some("first, second"))]
    #[case::error_string(r#"{"error":"branch is protected"}"#, Some("branch is protected"))]
    #[case::field_errors(
        r#"{"message":{"title":["can't be blank"]}}"#,
        Some("title can't be blank")
    )]
    #[case::empty_list(r#"{"error":[]}"#, None)]
    #[case::not_json("<html>oops</html>", None)]
    #[case::empty_body("", None)]
    fn extracts_envelope_messages(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(envelope_message(body).as_deref(), expected);
    }

    #[rstest]
    fn unexpected_status_falls_back_to_expected_and_actual() {
        let response = RawResponse {
            status: StatusCode::METHOD_NOT_ALLOWED,
            body: String::new(),
            display_url: "http://h/api/v3/x?private_token=***".to_owned(),
        };

        let error = unexpected_status(StatusCode::OK, &response);

        assert_eq!(
            error,
            LabError::Api {
                status: 405,
                message: "expected status 200, got 405".to_owned(),
            }
        );
    }

    #[rstest]
    fn status_error_uses_reason_phrase() {
        let response = RawResponse {
            status: StatusCode::UNAUTHORIZED,
            body: "not json".to_owned(),
            display_url: "http://h".to_owned(),
        };

        assert_eq!(
            status_error(&response),
            LabError::Api {
                status: 401,
                message: "Unauthorized".to_owned(),
            }
        );
    }
}
