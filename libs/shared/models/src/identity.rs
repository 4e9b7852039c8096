use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record owned by the hosted backend. One user maps 1:1 to a
/// patient profile via the patient's `userId` attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "$createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
