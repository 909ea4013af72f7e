use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/availability", post(handlers::availability::create_slot))
        .route(
            "/api/availability/:id/book",
            post(handlers::availability::book_slot),
        )
        .route(
            "/api/doctors/:doctor_id/availability",
            get(handlers::availability::list_doctor_slots),
        )
}
