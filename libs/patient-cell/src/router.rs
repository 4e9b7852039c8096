use axum::{
    routing::{get, post},
    Router,
};

use shared_utils::state::AppState;

use crate::handlers;

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::create_user))
        .route("/{user_id}", get(handlers::get_user))
        .with_state(state)
}

pub fn patient_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::register_patient))
        .route("/{user_id}", get(handlers::get_patient))
        .with_state(state)
}
