use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    multipart, Client, Method, RequestBuilder,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::query::Query;

/// Sentinel id telling the hosted backend to generate the identifier
/// server-side.
pub const UNIQUE_ID: &str = "unique()";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("resource not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Paged document listing as returned by the store: the server-side total
/// plus the current page of documents.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserList<T> {
    pub total: u64,
    pub users: Vec<T>,
}

/// Reference to an uploaded file in the storage bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: String,
}

/// Thin client over the hosted backend's REST surface: structured documents,
/// file storage, user identity, and SMS messaging. Constructed explicitly
/// from config and injected where needed; there is no global instance.
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    bucket_id: String,
}

impl AppwriteClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.appwrite_endpoint.clone(),
            project_id: config.appwrite_project_id.clone(),
            api_key: config.appwrite_api_key.clone(),
            database_id: config.database_id.clone(),
            bucket_id: config.bucket_id.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(&self.project_id).unwrap_or(HeaderValue::from_static("")),
        );
        headers.insert(
            "X-Appwrite-Key",
            HeaderValue::from_str(&self.api_key).unwrap_or(HeaderValue::from_static("")),
        );

        headers
    }

    async fn send<T>(&self, req: RequestBuilder) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.message)
                .unwrap_or(error_text);

            return Err(match status.as_u16() {
                404 => GatewayError::NotFound,
                409 => GatewayError::Conflict(message),
                401 | 403 => GatewayError::Auth(message),
                code => GatewayError::Api {
                    status: code,
                    message,
                },
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint, path);
        debug!("Making request to {}", url);

        let mut headers = self.get_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        self.send(req).await
    }

    fn query_string(queries: &[Query]) -> String {
        queries
            .iter()
            .map(|q| format!("queries[]={}", urlencoding::encode(&q.to_json())))
            .collect::<Vec<_>>()
            .join("&")
    }

    // ----- documents -------------------------------------------------------

    pub async fn create_document<T>(
        &self,
        collection_id: &str,
        data: Value,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, collection_id
        );

        self.request(
            Method::POST,
            &path,
            Some(json!({ "documentId": UNIQUE_ID, "data": data })),
        )
        .await
    }

    pub async fn get_document<T>(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            self.database_id, collection_id, document_id
        );

        self.request(Method::GET, &path, None).await
    }

    pub async fn update_document<T>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            self.database_id, collection_id, document_id
        );

        self.request(Method::PATCH, &path, Some(json!({ "data": data })))
            .await
    }

    pub async fn list_documents<T>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<T>, GatewayError>
    where
        T: DeserializeOwned,
    {
        let mut path = format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, collection_id
        );
        if !queries.is_empty() {
            path = format!("{}?{}", path, Self::query_string(queries));
        }

        self.request(Method::GET, &path, None).await
    }

    // ----- file storage ----------------------------------------------------

    pub async fn create_file(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<StoredFile, GatewayError> {
        let url = format!("{}/storage/buckets/{}/files", self.endpoint, self.bucket_id);
        debug!("Uploading file {} to {}", file_name, url);

        let form = multipart::Form::new().text("fileId", UNIQUE_ID).part(
            "file",
            multipart::Part::bytes(content).file_name(file_name.to_string()),
        );

        let req = self
            .client
            .post(&url)
            .headers(self.get_headers())
            .multipart(form);

        self.send(req).await
    }

    /// Public view URL for an uploaded file, as stored on the patient record.
    pub fn file_view_url(&self, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.endpoint, self.bucket_id, file_id, self.project_id
        )
    }

    // ----- user identity ---------------------------------------------------

    pub async fn create_user<T>(
        &self,
        email: &str,
        phone: &str,
        name: &str,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        self.request(
            Method::POST,
            "/users",
            Some(json!({
                "userId": UNIQUE_ID,
                "email": email,
                "phone": phone,
                "name": name,
            })),
        )
        .await
    }

    pub async fn get_user<T>(&self, user_id: &str) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let path = format!("/users/{}", user_id);
        self.request(Method::GET, &path, None).await
    }

    pub async fn list_users<T>(&self, queries: &[Query]) -> Result<UserList<T>, GatewayError>
    where
        T: DeserializeOwned,
    {
        let mut path = "/users".to_string();
        if !queries.is_empty() {
            path = format!("{}?{}", path, Self::query_string(queries));
        }

        self.request(Method::GET, &path, None).await
    }

    // ----- messaging -------------------------------------------------------

    /// Send a text message to the given user ids. Topics (groups) are unused
    /// by the appointment workflow and always sent empty.
    pub async fn create_sms(
        &self,
        content: &str,
        recipients: &[String],
    ) -> Result<(), GatewayError> {
        self.request::<Value>(
            Method::POST,
            "/messaging/messages/sms",
            Some(json!({
                "messageId": UNIQUE_ID,
                "content": content,
                "topics": [],
                "users": recipients,
            })),
        )
        .await?;

        Ok(())
    }

    pub fn get_endpoint(&self) -> &str {
        &self.endpoint
    }
}
