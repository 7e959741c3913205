use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use frostmart_infra::{GatewayError, SubscribeError};

pub fn subscribe_error_to_response(err: SubscribeError) -> axum::response::Response {
    match err {
        SubscribeError::InvalidEmail => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_email",
            "please enter a valid email address",
        ),
        SubscribeError::DuplicateEmail => json_error(
            StatusCode::CONFLICT,
            "duplicate_email",
            "this email is already subscribed",
        ),
        SubscribeError::Storage(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg)
        }
    }
}

/// Map gateway failures to distinct codes so diagnostics can tell a bad
/// credential from a dead endpoint. The status is always 502: the upstream
/// failed, not this service.
pub fn gateway_error_to_response(err: GatewayError) -> axum::response::Response {
    let (code, message) = match err {
        GatewayError::Transport(msg) => ("gateway_transport", msg),
        GatewayError::Rejected(msg) => ("gateway_rejected", msg),
        GatewayError::Configuration(msg) => ("gateway_configuration", msg),
        GatewayError::Authentication(msg) => ("gateway_authentication", msg),
        GatewayError::NotFound(msg) => ("gateway_not_found", msg),
    };
    json_error(StatusCode::BAD_GATEWAY, code, message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
