use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::state::AppState;

use crate::models::{
    AppointmentError, AppointmentIntent, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::services::AppointmentWorkflowService;

fn map_workflow_error(error: AppointmentError) -> AppError {
    match error {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::InvalidUpdateIntent(intent) => {
            AppError::BadRequest(format!("Intent '{}' is not a valid update intent", intent))
        }
        AppointmentError::Validation(fields) => AppError::Validation(fields),
        AppointmentError::Gateway(err) => AppError::ExternalService(err.to_string()),
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentWorkflowService::new(&state.config, state.dashboard.clone());

    let appointment = service
        .create_appointment(request)
        .await
        .map_err(map_workflow_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment request created"
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentWorkflowService::new(&state.config, state.dashboard.clone());

    let appointment = service
        .get_appointment(&appointment_id)
        .await
        .map_err(map_workflow_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentWorkflowService::new(&state.config, state.dashboard.clone());

    let message = match request.intent {
        AppointmentIntent::Cancel => "Appointment cancelled",
        _ => "Appointment scheduled",
    };

    let appointment = service
        .update_appointment(&appointment_id, request)
        .await
        .map_err(map_workflow_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": message
    })))
}

#[axum::debug_handler]
pub async fn list_recent_appointments(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentWorkflowService::new(&state.config, state.dashboard.clone());

    let recent = service
        .recent_appointments()
        .await
        .map_err(map_workflow_error)?;

    Ok(Json(json!(recent)))
}

/// Current dashboard cache revision; bumped by every workflow write so the
/// admin view knows when its appointment lists are stale.
#[axum::debug_handler]
pub async fn get_dashboard_revision(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "revision": state.dashboard.current() }))
}
