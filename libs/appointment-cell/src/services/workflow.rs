use serde_json::json;
use tracing::{info, warn};

use shared_appwrite::{AppwriteClient, DocumentList, GatewayError, Query};
use shared_config::AppConfig;
use shared_utils::format::format_date_time;
use shared_utils::state::DashboardRevision;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, AppointmentUpdate,
    CreateAppointmentRequest, RecentAppointments, UpdateAction, UpdateAppointmentRequest,
};
use crate::validation;

const PRODUCT_NAME: &str = "CarePulse";

/// The appointment lifecycle workflow: each intent produces exactly one
/// resulting status and at most one outbound notification. Persistence and
/// notification are sequential remote effects with independent failure
/// visibility; they are not atomic and not retried.
pub struct AppointmentWorkflowService {
    appwrite: AppwriteClient,
    appointment_collection_id: String,
    dashboard: DashboardRevision,
}

impl AppointmentWorkflowService {
    pub fn new(config: &AppConfig, dashboard: DashboardRevision) -> Self {
        Self {
            appwrite: AppwriteClient::new(config),
            appointment_collection_id: config.appointment_collection_id.clone(),
            dashboard,
        }
    }

    /// Create a new appointment request. The resulting status is fixed to
    /// `pending`; no notification is sent for creation.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        validation::validate_create(&request).map_err(AppointmentError::Validation)?;

        info!(
            "Creating appointment for user {} with Dr. {}",
            request.user_id, request.primary_physician
        );

        let data = json!({
            "userId": request.user_id,
            "patient": request.patient,
            "primaryPhysician": request.primary_physician,
            "schedule": request.schedule,
            "status": AppointmentStatus::Pending,
            "reason": request.reason,
            "note": request.note,
        });

        let appointment: Appointment = self
            .appwrite
            .create_document(&self.appointment_collection_id, data)
            .await?;

        self.dashboard.invalidate();

        Ok(appointment)
    }

    /// Schedule or cancel an existing appointment. The status is derived
    /// from the intent; the persisted update is the primary effect and the
    /// SMS a best-effort courtesy that never fails the operation.
    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let action = UpdateAction::try_from(request.intent)?;
        validation::validate_update(request.intent, &request.appointment)
            .map_err(AppointmentError::Validation)?;

        let status = action.resulting_status();
        info!(
            "Updating appointment {} to {} for user {}",
            appointment_id, status, request.user_id
        );

        let data = json!({
            "primaryPhysician": request.appointment.primary_physician,
            "schedule": request.appointment.schedule,
            "status": status,
            "cancellationReason": request.appointment.cancellation_reason,
        });

        let updated: Appointment = self
            .appwrite
            .update_document(&self.appointment_collection_id, appointment_id, data)
            .await?;

        let message = notification_message(action, &request.appointment);
        if let Err(err) = self
            .appwrite
            .create_sms(&message, std::slice::from_ref(&request.user_id))
            .await
        {
            // The status transition already happened; the missed courtesy
            // message is logged and accepted, not rolled back or retried.
            warn!(
                "SMS notification failed for appointment {}: {}",
                appointment_id, err
            );
        }

        self.dashboard.invalidate();

        Ok(updated)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        self.appwrite
            .get_document(&self.appointment_collection_id, appointment_id)
            .await
            .map_err(|err| match err {
                GatewayError::NotFound => AppointmentError::NotFound,
                other => other.into(),
            })
    }

    /// All appointments, newest first, folded into per-status counts for the
    /// admin dashboard. Every call re-fetches from offset zero; no cursor
    /// state is kept between calls.
    pub async fn recent_appointments(&self) -> Result<RecentAppointments, AppointmentError> {
        let appointments: DocumentList<Appointment> = self
            .appwrite
            .list_documents(
                &self.appointment_collection_id,
                &[Query::order_desc("$createdAt"), Query::offset(0)],
            )
            .await?;

        Ok(RecentAppointments::tally(
            appointments.total,
            appointments.documents,
        ))
    }
}

/// Templated text message for an update action. The cancellation reason is
/// validated before this is reached, so an absent one renders empty rather
/// than panicking.
pub fn notification_message(action: UpdateAction, payload: &AppointmentUpdate) -> String {
    match action {
        UpdateAction::Schedule => format!(
            "Greetings from {}. Your appointment is confirmed for {} with Dr. {}.",
            PRODUCT_NAME,
            format_date_time(&payload.schedule),
            payload.primary_physician
        ),
        UpdateAction::Cancel => format!(
            "Greetings from {}. We regret to inform that your appointment for {} is cancelled. Reason: {}.",
            PRODUCT_NAME,
            format_date_time(&payload.schedule),
            payload.cancellation_reason.as_deref().unwrap_or_default()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn schedule_message_renders_exactly() {
        let payload = AppointmentUpdate {
            primary_physician: "John Green".to_string(),
            schedule: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            cancellation_reason: None,
        };

        assert_eq!(
            notification_message(UpdateAction::Schedule, &payload),
            "Greetings from CarePulse. Your appointment is confirmed for \
             Jun 1, 2024, 10:00 AM with Dr. John Green."
        );
    }

    #[test]
    fn cancel_message_includes_the_reason() {
        let payload = AppointmentUpdate {
            primary_physician: "John Green".to_string(),
            schedule: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            cancellation_reason: Some("Doctor unavailable".to_string()),
        };

        assert_eq!(
            notification_message(UpdateAction::Cancel, &payload),
            "Greetings from CarePulse. We regret to inform that your appointment for \
             Jun 1, 2024, 10:00 AM is cancelled. Reason: Doctor unavailable."
        );
    }
}
