use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::state::AppState;

use crate::models::{CreateUserRequest, PatientError, RegisterPatientRequest};
use crate::services::PatientRegistrationService;

fn map_patient_error(error: PatientError) -> AppError {
    match error {
        PatientError::NotFound => AppError::NotFound("Record not found".to_string()),
        PatientError::Validation(fields) => AppError::Validation(fields),
        PatientError::Gateway(err) => AppError::ExternalService(err.to_string()),
    }
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistrationService::new(&state.config);

    let user = service.create_user(request).await.map_err(map_patient_error)?;

    Ok(Json(json!(user)))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistrationService::new(&state.config);

    let user = service.get_user(&user_id).await.map_err(|e| match e {
        PatientError::NotFound => AppError::NotFound("User not found".to_string()),
        other => map_patient_error(other),
    })?;

    Ok(Json(json!(user)))
}

#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<AppState>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistrationService::new(&state.config);

    let patient = service
        .register_patient(request)
        .await
        .map_err(map_patient_error)?;

    Ok(Json(json!({
        "success": true,
        "patient": patient,
        "message": "Patient registered successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistrationService::new(&state.config);

    let patient = service
        .get_patient(&user_id)
        .await
        .map_err(map_patient_error)?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    Ok(Json(json!(patient)))
}
