use once_cell::sync::Lazy;
use serde::Deserialize;
use validator::Validate;

static USERNAME_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl SignUpRequest {
    /// Usernames are restricted to alphanumerics and underscores.
    pub fn username_is_valid(&self) -> bool {
        USERNAME_REGEX.is_match(&self.username)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Partial profile update; a `None` field is left unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,

    pub disabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 500))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub visibility: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub frequency_days: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub frequency_days: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerInput {
    #[validate(length(min = 1, max = 500))]
    pub answer_text: String,

    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub answer_text: Option<String>,

    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer_id: String,
}
