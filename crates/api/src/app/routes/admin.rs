//! Admin routes for the newsletter read model.
//!
//! Operational visibility only: a snapshot table, a CSV export, and the
//! destructive clear-all gated by an explicit confirmation. There is no
//! authentication on this surface; deploy it behind a trusted boundary.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::app::dto::SubscriptionView;
use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct ClearAllParams {
    /// Clear-all is irreversible; the caller must say so out loud.
    #[serde(default)]
    pub confirm: bool,
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/newsletter/subscriptions",
            get(list_subscriptions).delete(clear_all),
        )
        .route("/newsletter/subscriptions/export", get(export_csv))
}

/// GET /admin/newsletter/subscriptions - Snapshot table
pub async fn list_subscriptions(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    let entries: Vec<SubscriptionView> = services
        .admin
        .snapshot()
        .iter()
        .map(SubscriptionView::from)
        .collect();

    Json(serde_json::json!({
        "total": entries.len(),
        "subscriptions": entries,
    }))
}

/// GET /admin/newsletter/subscriptions/export - CSV download
pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.admin.export_csv() {
        Some(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.filename),
                ),
            ],
            export.content,
        )
            .into_response(),
        // Nothing to export.
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// DELETE /admin/newsletter/subscriptions?confirm=true - Clear all
pub async fn clear_all(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ClearAllParams>,
) -> axum::response::Response {
    match services.admin.clear_all(params.confirm) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::json_error(
            StatusCode::CONFLICT,
            "confirmation_required",
            "clearing all subscriptions cannot be undone; pass confirm=true",
        ),
        Err(err) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
            err.to_string(),
        ),
    }
}
