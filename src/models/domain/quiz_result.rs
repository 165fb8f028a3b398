use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only attempt record; prior attempts are never overwritten so the
/// rating history stays intact.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub company_id: String,
    pub score: i64,
    pub timestamp: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(user_id: &str, quiz_id: &str, company_id: &str, score: i64) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            company_id: company_id.to_string(),
            score,
            timestamp: Utc::now(),
        }
    }
}
