use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::state::AppState;

pub struct TestConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub patient_collection_id: String,
    pub appointment_collection_id: String,
    pub bucket_id: String,
    pub admin_passkey: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/v1".to_string(),
            project_id: "test-project".to_string(),
            api_key: "test-api-key".to_string(),
            database_id: "test-database".to_string(),
            patient_collection_id: "patients".to_string(),
            appointment_collection_id: "appointments".to_string(),
            bucket_id: "identification".to_string(),
            admin_passkey: "111111".to_string(),
        }
    }
}

impl TestConfig {
    /// Config pointing at a mock server, e.g. a `wiremock::MockServer` uri.
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            appwrite_endpoint: self.endpoint.clone(),
            appwrite_project_id: self.project_id.clone(),
            appwrite_api_key: self.api_key.clone(),
            database_id: self.database_id.clone(),
            patient_collection_id: self.patient_collection_id.clone(),
            appointment_collection_id: self.appointment_collection_id.clone(),
            bucket_id: self.bucket_id.clone(),
            admin_passkey: self.admin_passkey.clone(),
        }
    }

    pub fn to_state(&self) -> AppState {
        AppState::new(self.to_app_config())
    }
}

pub struct MockAppwriteResponses;

impl MockAppwriteResponses {
    pub fn patient_document(user_id: &str, name: &str) -> serde_json::Value {
        json!({
            "$id": Uuid::new_v4().to_string(),
            "$createdAt": "2024-01-01T00:00:00.000+00:00",
            "$collectionId": "patients",
            "userId": user_id,
            "name": name,
            "email": "patient@example.com",
            "phone": "+353861234567",
            "birthDate": "1990-05-14T00:00:00.000+00:00",
            "gender": "female",
            "address": "14 Ocean Drive, Galway",
            "occupation": "Engineer",
            "emergencyContactName": "Pat Example",
            "emergencyContactNumber": "+353861234568",
            "primaryPhysician": "John Green",
            "insuranceProvider": "BlueCross",
            "insurancePolicyNumber": "ABC123456",
            "allergies": null,
            "currentMedication": null,
            "familyMedicalHistory": null,
            "pastMedicalHistory": null,
            "identificationType": "Passport",
            "identificationNumber": "P1234567",
            "identificationDocumentId": null,
            "identificationDocumentUrl": null,
            "privacyConsent": true,
        })
    }

    pub fn appointment_document(
        appointment_id: &str,
        user_id: &str,
        status: &str,
        schedule: &str,
    ) -> serde_json::Value {
        json!({
            "$id": appointment_id,
            "$createdAt": "2024-05-20T09:00:00.000+00:00",
            "$collectionId": "appointments",
            "userId": user_id,
            "patient": Self::patient_document(user_id, "Test Patient"),
            "primaryPhysician": "John Green",
            "schedule": schedule,
            "status": status,
            "reason": "Annual check-up",
            "note": null,
            "cancellationReason": null,
        })
    }

    pub fn user_response(user_id: &str, email: &str, name: &str) -> serde_json::Value {
        json!({
            "$id": user_id,
            "$createdAt": "2024-01-01T00:00:00.000+00:00",
            "name": name,
            "email": email,
            "phone": "+353861234567",
        })
    }

    pub fn stored_file_response(file_id: &str) -> serde_json::Value {
        json!({
            "$id": file_id,
            "bucketId": "identification",
            "name": "passport.png",
        })
    }
}
