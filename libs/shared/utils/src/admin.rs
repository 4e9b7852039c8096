use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_models::error::AppError;

use crate::state::AppState;

pub const ADMIN_PASSKEY_HEADER: &str = "x-admin-passkey";

/// Gate for administrative routes. The passkey is verified server-side
/// against configuration; an unconfigured passkey rejects every request.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(ADMIN_PASSKEY_HEADER)
        .ok_or_else(|| AppError::Auth("Missing admin passkey header".to_string()))?;

    let supplied = header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid admin passkey header".to_string()))?;

    if state.config.admin_passkey.is_empty() {
        return Err(AppError::Auth("Admin access is not configured".to_string()));
    }

    if supplied != state.config.admin_passkey {
        return Err(AppError::Auth("Invalid admin passkey".to_string()));
    }

    Ok(next.run(request).await)
}
