use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pending user-to-company ask; mirrors `Invitation` in the opposite
/// direction with the same uniqueness and lifecycle rules.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct JoinRequest {
    pub id: String,
    pub company_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl JoinRequest {
    pub fn new(company_id: &str, user_id: &str) -> Self {
        JoinRequest {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
