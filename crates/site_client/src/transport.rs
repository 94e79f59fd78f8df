use reqwest::{header::CONTENT_TYPE, Response, StatusCode};
use serde_json::Value;

use crate::error::ClientError;

pub const JSON_MEDIA_TYPE: &str = "application/json";

pub fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains(JSON_MEDIA_TYPE))
}

pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

/// Classifies a response and parses its body.
///
/// The content type is checked before anything is read, so an HTML error
/// page never reaches the JSON parser. A JSON body with a non-2xx status is
/// still a failure; its parsed body travels with the error.
pub async fn read_json(endpoint: &str, response: Response) -> Result<Value, ClientError> {
    let status = response.status();

    if !is_json_response(&response) {
        return Err(ClientError::NotJson {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            content_type: response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

    if !status.is_success() {
        return Err(ClientError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            status_text: status_text(status),
            body: serde_json::from_slice(&bytes).ok(),
        });
    }

    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
