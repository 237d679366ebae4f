use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::server::error::ApiError;
use crate::server::AppState;
use crate::service::{EncodedText, HelloMessage};

const EXPECTED_ENCODE_BODY: &str = r#"expected a JSON body of the form {"text": string}"#;

/// `GET /api/hello`
pub async fn hello(State(state): State<AppState>) -> Json<HelloMessage> {
    Json(HelloMessage {
        message: state.greeting().to_string(),
    })
}

/// `POST /api/base64/encode`
pub async fn encode_base64(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<EncodedText>, ApiError> {
    let body = body.map_err(body_rejection)?;
    let text = parse_text(&body)?;

    Ok(Json(EncodedText {
        base64: encode_text(&text),
    }))
}

pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Map a body rejection by its own status. Only non-4xx rejections become
/// server errors.
fn body_rejection(rejection: BytesRejection) -> ApiError {
    let status = rejection.status();
    let message = rejection.body_text();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else if status.is_client_error() {
        ApiError::InvalidBody(message)
    } else {
        ApiError::Internal(format!("Failed to read request body: {}", message))
    }
}

/// Standard (RFC 4648, padded) base64 of the UTF-8 bytes of `text`.
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

fn parse_text(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        ApiError::InvalidBody(format!("Invalid JSON body ({}); {}", e, EXPECTED_ENCODE_BODY))
    })?;

    match value.get("text") {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ApiError::InvalidBody(format!(
            "Field 'text' must be a string; {}",
            EXPECTED_ENCODE_BODY
        ))),
        None => Err(ApiError::InvalidBody(format!(
            "Missing field 'text'; {}",
            EXPECTED_ENCODE_BODY
        ))),
    }
}
