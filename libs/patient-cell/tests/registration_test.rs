use assert_matches::assert_matches;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::{
    CreateUserRequest, Gender, IdentificationDocument, PatientError, RegisterPatientRequest,
};
use patient_cell::services::PatientRegistrationService;
use shared_utils::test_utils::{MockAppwriteResponses, TestConfig};

const PATIENTS_PATH: &str = "/databases/test-database/collections/patients/documents";
const FILES_PATH: &str = "/storage/buckets/identification/files";

fn service_for(server: &MockServer) -> PatientRegistrationService {
    let config = TestConfig::with_endpoint(&server.uri()).to_app_config();
    PatientRegistrationService::new(&config)
}

fn registration(identification_document: Option<IdentificationDocument>) -> RegisterPatientRequest {
    RegisterPatientRequest {
        user_id: "user-1".to_string(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+353861234567".to_string(),
        birth_date: Utc.with_ymd_and_hms(1990, 5, 14, 0, 0, 0).unwrap(),
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
        identification_document,
        treatment_consent: true,
        disclosure_consent: true,
        privacy_consent: true,
    }
}

#[tokio::test]
async fn duplicate_email_returns_the_existing_user() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "A user with the same email already exists in the current project.",
            "code": 409,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "users": [MockAppwriteResponses::user_response(
                "existing-user",
                "ada@example.com",
                "Ada Lovelace",
            )],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = service
        .create_user(CreateUserRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+353861234567".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, "existing-user");
}

#[tokio::test]
async fn registering_without_a_document_stores_null_references() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path(PATIENTS_PATH))
        .and(body_partial_json(json!({
            "data": {
                "identificationDocumentId": null,
                "identificationDocumentUrl": null,
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockAppwriteResponses::patient_document("user-1", "Ada Lovelace")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let patient = service.register_patient(registration(None)).await.unwrap();

    assert_eq!(patient.user_id, "user-1");
    assert!(patient.identification_document_id.is_none());
    assert!(patient.identification_document_url.is_none());
}

#[tokio::test]
async fn registering_with_a_document_uploads_it_first() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockAppwriteResponses::stored_file_response("file-1")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(PATIENTS_PATH))
        .and(body_partial_json(json!({
            "data": {
                "identificationDocumentId": "file-1",
                "identificationDocumentUrl": format!(
                    "{}/storage/buckets/identification/files/file-1/view?project=test-project",
                    mock_server.uri()
                ),
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockAppwriteResponses::patient_document("user-1", "Ada Lovelace")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let document = IdentificationDocument {
        file_name: "passport.png".to_string(),
        content: BASE64.encode(b"fake-image-bytes"),
    };

    let patient = service
        .register_patient(registration(Some(document)))
        .await
        .unwrap();

    assert_eq!(patient.user_id, "user-1");
}

#[tokio::test]
async fn missing_consents_abort_before_any_network_call() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    let mut request = registration(None);
    request.treatment_consent = false;
    request.disclosure_consent = false;
    request.privacy_consent = false;

    let result = service.register_patient(request).await;

    let errors = match result {
        Err(PatientError::Validation(errors)) => errors,
        other => panic!("expected validation failure, got {:?}", other.map(|p| p.id)),
    };
    assert_eq!(errors.len(), 3);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn absent_patient_is_a_valid_outcome() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path(PATIENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "total": 0, "documents": [] })),
        )
        .mount(&mock_server)
        .await;

    let patient = service.get_patient("nobody").await.unwrap();

    assert!(patient.is_none());
}

#[tokio::test]
async fn get_user_maps_gateway_absence_to_not_found() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "User with the requested ID could not be found.",
            "code": 404,
        })))
        .mount(&mock_server)
        .await;

    let result = service.get_user("missing").await;

    assert_matches!(result, Err(PatientError::NotFound));
}
