use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/templates", post(handlers::notification::create_template))
        .route("/api/templates/:id", get(handlers::notification::get_template))
        .route(
            "/api/templates/:id/render",
            post(handlers::notification::render_template),
        )
}
