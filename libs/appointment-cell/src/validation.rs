use shared_models::validation::{length_between, FieldError};

use crate::models::{AppointmentIntent, AppointmentUpdate, CreateAppointmentRequest};

const TEXT_MIN: usize = 2;
const TEXT_MAX: usize = 500;

/// Per-intent field requirements. The schedule itself is always required and
/// enforced structurally by the typed request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub reason_required: bool,
    pub cancellation_reason_required: bool,
}

/// Pure, total mapping from intent to validation rules; no side effects, no
/// default branch.
pub fn rules_for(intent: AppointmentIntent) -> FieldRules {
    match intent {
        AppointmentIntent::Create => FieldRules {
            reason_required: true,
            cancellation_reason_required: false,
        },
        AppointmentIntent::Schedule => FieldRules {
            reason_required: false,
            cancellation_reason_required: false,
        },
        AppointmentIntent::Cancel => FieldRules {
            reason_required: false,
            cancellation_reason_required: true,
        },
    }
}

fn check_physician(primary_physician: &str, errors: &mut Vec<FieldError>) {
    if primary_physician.chars().count() < TEXT_MIN {
        errors.push(FieldError::new(
            "primaryPhysician",
            "Select at least one doctor",
        ));
    }
}

pub fn validate_create(request: &CreateAppointmentRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_physician(&request.primary_physician, &mut errors);

    let rules = rules_for(AppointmentIntent::Create);
    if rules.reason_required && !length_between(&request.reason, TEXT_MIN, TEXT_MAX) {
        errors.push(FieldError::new(
            "reason",
            "Reason must be 2-500 characters",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_update(
    intent: AppointmentIntent,
    payload: &AppointmentUpdate,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_physician(&payload.primary_physician, &mut errors);

    let rules = rules_for(intent);
    if rules.cancellation_reason_required {
        match &payload.cancellation_reason {
            Some(reason) if length_between(reason, TEXT_MIN, TEXT_MAX) => {}
            _ => errors.push(FieldError::new(
                "cancellationReason",
                "Reason must be 2-500 characters",
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
