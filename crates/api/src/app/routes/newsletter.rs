//! Public newsletter signup routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;

use frostmart_newsletter::SignupSource;

use crate::app::dto::SubscriptionView;
use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    /// Surface the form lives on; defaults to the site footer.
    pub source: Option<String>,
}

pub fn router() -> Router {
    Router::new().route("/subscriptions", post(subscribe))
}

/// POST /newsletter/subscriptions - Record a signup
pub async fn subscribe(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<SubscribeRequest>,
) -> axum::response::Response {
    let source = body
        .source
        .map(SignupSource::new)
        .unwrap_or_else(SignupSource::footer);

    match services.service.subscribe(&body.email, source).await {
        Ok(subscription) => (
            StatusCode::CREATED,
            Json(SubscriptionView::from(&subscription)),
        )
            .into_response(),
        Err(err) => errors::subscribe_error_to_response(err),
    }
}
