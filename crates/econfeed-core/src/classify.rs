//! Mapping of transport failures and HTTP statuses onto [`ApiError`] kinds.

use serde_json::Value;
use tracing::warn;

use crate::http_client::{HttpError, HttpErrorKind, HttpResponse};
use crate::ApiError;

/// Classify a transport failure where no response was received.
pub fn classify_transport(error: &HttpError) -> ApiError {
    let detail = match error.kind() {
        HttpErrorKind::Timeout => "network timeout",
        HttpErrorKind::Connect => "network unreachable (dns or connection refused)",
        HttpErrorKind::Other => "network error",
    };
    let classified = ApiError::transport(format!("{detail}: {}", error.message()));
    warn!(code = classified.code(), error = %error, "transport failure");
    classified
}

/// Classify a completed response by status. 2xx responses pass.
pub fn classify_status(response: &HttpResponse) -> Result<(), ApiError> {
    let status = response.status;
    if response.is_success() {
        return Ok(());
    }

    let remote = remote_message(&response.body);
    let describe = |summary: &str| match &remote {
        Some(message) => format!("{summary} (status {status}): {message}"),
        None => format!("{summary} (status {status})"),
    };

    let error = match status {
        401 | 403 => ApiError::authentication(describe("authentication failed")),
        404 => ApiError::parameters(describe("endpoint not found")),
        400..=499 => ApiError::parameters(describe("invalid request parameters")),
        500.. => ApiError::transport(describe("server error")),
        _ => ApiError::transport(describe("unexpected response status")),
    }
    .with_status(status);

    warn!(status, code = error.code(), "request rejected");
    Err(error)
}

/// Parse a 2xx body, rejecting malformed JSON and empty payloads.
pub fn parse_body(response: &HttpResponse) -> Result<Value, ApiError> {
    let status = response.status;
    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        ApiError::transport(format!(
            "malformed response body (status {status}): {e}"
        ))
        .with_status(status)
    })?;

    if is_empty_payload(&body) {
        return Err(ApiError::empty_result(status));
    }
    Ok(body)
}

/// Full post-response classification: status first, then body.
pub fn classify_response(response: &HttpResponse) -> Result<Value, ApiError> {
    classify_status(response)?;
    parse_body(response)
}

fn is_empty_payload(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::String(text) => text.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Extract `message`/`Message` from a JSON error body, or fall back to short plain text.
fn remote_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => ["message", "Message", "error"]
            .into_iter()
            .find_map(|key| fields.get(key))
            .and_then(|value| match value {
                Value::String(text) => Some(text.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            }),
        Ok(Value::String(text)) if !text.is_empty() => Some(text),
        Ok(_) => None,
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_owned())
        }
    }
}
