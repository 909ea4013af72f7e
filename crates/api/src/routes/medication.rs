use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/patients/:id/medications",
        get(handlers::medication::list_routines).post(handlers::medication::create_routine),
    )
}
