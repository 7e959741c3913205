//! Email delivery diagnostics.
//!
//! Drives either gateway directly with a test message so an operator can
//! tell a misconfigured credential from a dead endpoint without going
//! through the signup flow. Nothing here touches the store.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;

use frostmart_infra::NotificationGateway;
use frostmart_newsletter::{EmailAddress, SignupSource, Subscription};

use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestGateway {
    #[default]
    Relay,
    Templated,
}

#[derive(Debug, Deserialize)]
pub struct EmailTestRequest {
    pub email: String,
    #[serde(default)]
    pub gateway: TestGateway,
}

pub fn router() -> Router {
    Router::new().route("/email-test", post(email_test))
}

/// POST /diagnostics/email-test - Send a test confirmation
pub async fn email_test(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<EmailTestRequest>,
) -> axum::response::Response {
    let email = match EmailAddress::parse(&body.email) {
        Ok(email) => email,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_email",
                "please enter a valid email address",
            );
        }
    };

    let subscription = Subscription::new(email, SignupSource::new("email-test"));

    let result = match body.gateway {
        TestGateway::Relay => services.relay.send_confirmation(&subscription).await,
        TestGateway::Templated => services.templated.send_confirmation(&subscription).await,
    };

    match result {
        Ok(()) => Json(serde_json::json!({
            "status": "sent",
            "to": subscription.email.as_str(),
        }))
        .into_response(),
        Err(err) => errors::gateway_error_to_response(err),
    }
}
