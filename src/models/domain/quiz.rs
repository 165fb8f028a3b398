use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quiz is stored as a single document: questions and their answer
/// options are embedded rather than kept in separate collections.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Retake cooldown in days; `None` means the quiz can always be retaken.
    pub frequency_days: Option<i64>,
    pub company_id: String,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub answers: Vec<Answer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    pub id: String,
    pub answer_text: String,
    pub is_correct: bool,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: Option<String>,
        frequency_days: Option<i64>,
        company_id: &str,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description,
            frequency_days,
            company_id: company_id.to_string(),
            questions: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_mut(&mut self, question_id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == question_id)
    }
}

impl Question {
    pub fn new(question_text: &str) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            question_text: question_text.to_string(),
            answers: Vec::new(),
        }
    }
}

impl Answer {
    pub fn new(answer_text: &str, is_correct: bool) -> Self {
        Answer {
            id: Uuid::new_v4().to_string(),
            answer_text: answer_text.to_string(),
            is_correct,
        }
    }
}
