use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::json;
use tracing::{info, warn};

use shared_appwrite::{AppwriteClient, GatewayError, Query};
use shared_config::AppConfig;
use shared_models::identity::User;
use shared_models::validation::FieldError;

use crate::models::{CreateUserRequest, Patient, PatientError, RegisterPatientRequest};
use crate::validation;

pub struct PatientRegistrationService {
    appwrite: AppwriteClient,
    patient_collection_id: String,
}

impl PatientRegistrationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appwrite: AppwriteClient::new(config),
            patient_collection_id: config.patient_collection_id.clone(),
        }
    }

    /// Create an identity record. A conflict on the email is recovered
    /// locally: the pre-existing user is looked up and returned instead of
    /// surfacing the conflict to the caller.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, PatientError> {
        validation::validate_create_user(&request).map_err(PatientError::Validation)?;

        match self
            .appwrite
            .create_user::<User>(&request.email, &request.phone, &request.name)
            .await
        {
            Ok(user) => {
                info!("Created user {} for {}", user.id, request.email);
                Ok(user)
            }
            Err(GatewayError::Conflict(_)) => {
                warn!(
                    "User with email {} already exists, returning existing record",
                    request.email
                );
                let existing = self
                    .appwrite
                    .list_users::<User>(&[Query::equal("email", &request.email)])
                    .await?;

                existing.users.into_iter().next().ok_or(PatientError::NotFound)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, PatientError> {
        self.appwrite.get_user(user_id).await.map_err(|err| match err {
            GatewayError::NotFound => PatientError::NotFound,
            other => other.into(),
        })
    }

    /// Validate and persist a patient profile. When an identification
    /// document is supplied it is uploaded first and both the file id and a
    /// constructed view URL are stored on the record; otherwise both fields
    /// persist as null.
    pub async fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<Patient, PatientError> {
        validation::validate_registration(&request).map_err(PatientError::Validation)?;

        let (document_id, document_url) = match &request.identification_document {
            Some(document) => {
                let content = BASE64.decode(&document.content).map_err(|_| {
                    PatientError::Validation(vec![FieldError::new(
                        "identificationDocument",
                        "Document content must be valid base64",
                    )])
                })?;

                let stored = self
                    .appwrite
                    .create_file(&document.file_name, content)
                    .await?;
                let url = self.appwrite.file_view_url(&stored.id);
                info!("Stored identification document {} for {}", stored.id, request.user_id);

                (Some(stored.id), Some(url))
            }
            None => (None, None),
        };

        let data = json!({
            "userId": request.user_id,
            "name": request.name,
            "email": request.email,
            "phone": request.phone,
            "birthDate": request.birth_date,
            "gender": request.gender,
            "address": request.address,
            "occupation": request.occupation,
            "emergencyContactName": request.emergency_contact_name,
            "emergencyContactNumber": request.emergency_contact_number,
            "primaryPhysician": request.primary_physician,
            "insuranceProvider": request.insurance_provider,
            "insurancePolicyNumber": request.insurance_policy_number,
            "allergies": request.allergies,
            "currentMedication": request.current_medication,
            "familyMedicalHistory": request.family_medical_history,
            "pastMedicalHistory": request.past_medical_history,
            "identificationType": request.identification_type,
            "identificationNumber": request.identification_number,
            "identificationDocumentId": document_id,
            "identificationDocumentUrl": document_url,
            "privacyConsent": request.privacy_consent,
        });

        let patient: Patient = self
            .appwrite
            .create_document(&self.patient_collection_id, data)
            .await?;

        info!("Registered patient {} for user {}", patient.id, patient.user_id);
        Ok(patient)
    }

    /// Fetch the patient profile linked to a user identity. Absence is a
    /// valid outcome, not an error.
    pub async fn get_patient(&self, user_id: &str) -> Result<Option<Patient>, PatientError> {
        let patients = self
            .appwrite
            .list_documents::<Patient>(
                &self.patient_collection_id,
                &[Query::equal("userId", user_id), Query::offset(0)],
            )
            .await?;

        Ok(patients.documents.into_iter().next())
    }
}
