use axum::{routing::get, Router};

use appointment_cell::appointment_routes;
use patient_cell::{patient_routes, user_routes};
use shared_utils::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "CarePulse API is running!" }))
        .nest("/users", user_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}
