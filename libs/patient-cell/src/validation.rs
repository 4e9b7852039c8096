use shared_models::validation::{is_valid_email, is_valid_phone, length_between, FieldError};

use crate::models::{CreateUserRequest, RegisterPatientRequest};

pub fn validate_create_user(request: &CreateUserRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !length_between(&request.name, 2, 50) {
        errors.push(FieldError::new("name", "Name must be 2-50 characters"));
    }
    if !is_valid_email(&request.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if !is_valid_phone(&request.phone) {
        errors.push(FieldError::new("phone", "Invalid phone number"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Full profile validation. Runs entirely before any network call; a failure
/// here means no upload and no document write has happened.
pub fn validate_registration(request: &RegisterPatientRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !length_between(&request.name, 2, 50) {
        errors.push(FieldError::new("name", "Name must be 2-50 characters"));
    }
    if !is_valid_email(&request.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if !is_valid_phone(&request.phone) {
        errors.push(FieldError::new("phone", "Invalid phone number"));
    }
    if !length_between(&request.address, 5, 500) {
        errors.push(FieldError::new("address", "Address must be 5-500 characters"));
    }
    if !length_between(&request.occupation, 2, 500) {
        errors.push(FieldError::new(
            "occupation",
            "Occupation must be 2-500 characters",
        ));
    }
    if !length_between(&request.emergency_contact_name, 2, 50) {
        errors.push(FieldError::new(
            "emergencyContactName",
            "Contact name must be 2-50 characters",
        ));
    }
    if !is_valid_phone(&request.emergency_contact_number) {
        errors.push(FieldError::new(
            "emergencyContactNumber",
            "Invalid phone number",
        ));
    }
    if !length_between(&request.primary_physician, 2, 50) {
        errors.push(FieldError::new(
            "primaryPhysician",
            "Select at least one doctor",
        ));
    }
    if !length_between(&request.insurance_provider, 2, 50) {
        errors.push(FieldError::new(
            "insuranceProvider",
            "Insurance name must be 2-50 characters",
        ));
    }
    if !length_between(&request.insurance_policy_number, 2, 50) {
        errors.push(FieldError::new(
            "insurancePolicyNumber",
            "Policy number must be 2-50 characters",
        ));
    }

    // Each consent is checked independently so the caller sees every missing one.
    if !request.treatment_consent {
        errors.push(FieldError::new(
            "treatmentConsent",
            "You must consent to treatment in order to proceed",
        ));
    }
    if !request.disclosure_consent {
        errors.push(FieldError::new(
            "disclosureConsent",
            "You must consent to disclosure in order to proceed",
        ));
    }
    if !request.privacy_consent {
        errors.push(FieldError::new(
            "privacyConsent",
            "You must consent to privacy in order to proceed",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::Utc;

    fn valid_registration() -> RegisterPatientRequest {
        RegisterPatientRequest {
            user_id: "user-1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+353861234567".to_string(),
            birth_date: Utc::now(),
            gender: Gender::Female,
            address: "14 Ocean Drive, Galway".to_string(),
            occupation: "Engineer".to_string(),
            emergency_contact_name: "Pat Example".to_string(),
            emergency_contact_number: "+353861234568".to_string(),
            primary_physician: "John Green".to_string(),
            insurance_provider: "BlueCross".to_string(),
            insurance_policy_number: "ABC123456".to_string(),
            allergies: None,
            current_medication: None,
            family_medical_history: None,
            past_medical_history: None,
            identification_type: Some("Passport".to_string()),
            identification_number: Some("P1234567".to_string()),
            identification_document: None,
            treatment_consent: true,
            disclosure_consent: true,
            privacy_consent: true,
        }
    }

    #[test]
    fn accepts_a_complete_profile() {
        assert!(validate_registration(&valid_registration()).is_ok());
    }

    #[test]
    fn each_consent_is_reported_independently() {
        let mut request = valid_registration();
        request.treatment_consent = false;
        request.disclosure_consent = false;
        request.privacy_consent = false;

        let errors = validate_registration(&request).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["treatmentConsent", "disclosureConsent", "privacyConsent"]
        );
    }

    #[test]
    fn rejects_malformed_phone_numbers() {
        let mut request = valid_registration();
        request.phone = "0861234567".to_string();

        let errors = validate_registration(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "phone"));
    }

    #[test]
    fn create_user_collects_all_failures() {
        let request = CreateUserRequest {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            phone: "12345".to_string(),
        };

        let errors = validate_create_user(&request).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
