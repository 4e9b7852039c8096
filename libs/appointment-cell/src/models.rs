use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use patient_cell::models::Patient;
use shared_appwrite::GatewayError;
use shared_models::validation::FieldError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// Appointment lifecycle state. Derived deterministically from the workflow
/// action, never chosen by the caller. There is no transition back to
/// `pending` and no delete path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Workflow action over an appointment. A closed enum: unknown wire values
/// are rejected at deserialization instead of falling through to a default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentIntent {
    Create,
    Schedule,
    Cancel,
}

impl fmt::Display for AppointmentIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentIntent::Create => write!(f, "create"),
            AppointmentIntent::Schedule => write!(f, "schedule"),
            AppointmentIntent::Cancel => write!(f, "cancel"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    pub patient: Patient,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub reason: String,
    pub note: Option<String>,
    pub cancellation_reason: Option<String>,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Creation request. Deliberately carries no status field: a new appointment
/// is always persisted as `pending`, whatever the caller sends.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub user_id: String,
    /// Patient document reference.
    pub patient: String,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub note: Option<String>,
}

/// Mutable slice of an appointment for the update path. Reason and note are
/// immutable carry-overs from creation and are not part of this payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub user_id: String,
    pub intent: AppointmentIntent,
    pub appointment: AppointmentUpdate,
}

/// Admissible actions on the update path. `create` is not one of them; the
/// conversion makes that rejection explicit rather than defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Schedule,
    Cancel,
}

impl TryFrom<AppointmentIntent> for UpdateAction {
    type Error = AppointmentError;

    fn try_from(intent: AppointmentIntent) -> Result<Self, Self::Error> {
        match intent {
            AppointmentIntent::Schedule => Ok(UpdateAction::Schedule),
            AppointmentIntent::Cancel => Ok(UpdateAction::Cancel),
            AppointmentIntent::Create => Err(AppointmentError::InvalidUpdateIntent(intent)),
        }
    }
}

impl UpdateAction {
    pub fn resulting_status(self) -> AppointmentStatus {
        match self {
            UpdateAction::Schedule => AppointmentStatus::Scheduled,
            UpdateAction::Cancel => AppointmentStatus::Cancelled,
        }
    }
}

// ==============================================================================
// AGGREGATION MODELS
// ==============================================================================

/// Newest-first appointment listing with per-status counts for the admin
/// dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAppointments {
    pub total_count: u64,
    pub scheduled_count: u64,
    pub pending_count: u64,
    pub cancelled_count: u64,
    pub documents: Vec<Appointment>,
}

impl RecentAppointments {
    /// Fold status counts in a single linear pass, accumulators starting at
    /// zero.
    pub fn tally(total_count: u64, documents: Vec<Appointment>) -> Self {
        let mut scheduled_count = 0;
        let mut pending_count = 0;
        let mut cancelled_count = 0;

        for appointment in &documents {
            match appointment.status {
                AppointmentStatus::Scheduled => scheduled_count += 1,
                AppointmentStatus::Pending => pending_count += 1,
                AppointmentStatus::Cancelled => cancelled_count += 1,
            }
        }

        Self {
            total_count,
            scheduled_count,
            pending_count,
            cancelled_count,
            documents,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Intent '{0}' is not a valid update intent")]
    InvalidUpdateIntent(AppointmentIntent),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}
