use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::admin::admin_middleware;
use shared_utils::state::AppState;

use crate::handlers;

pub fn appointment_routes(state: AppState) -> Router {
    // Scheduling, cancelling, and the dashboard listing are admin operations.
    let admin_routes = Router::new()
        .route("/", get(handlers::list_recent_appointments))
        .route("/revision", get(handlers::get_dashboard_revision))
        .route("/{appointment_id}", put(handlers::update_appointment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .merge(admin_routes)
        .with_state(state)
}
