use axum::Router;

pub mod admin;
pub mod diagnostics;
pub mod newsletter;
pub mod system;

/// Router for everything below the health check.
pub fn router() -> Router {
    Router::new()
        .nest("/newsletter", newsletter::router())
        .nest("/admin", admin::router())
        .nest("/diagnostics", diagnostics::router())
}
