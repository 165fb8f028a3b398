use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Company not found")]
    CompanyNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Invitation not found")]
    InvitationNotFound,

    #[error("Request not found")]
    RequestNotFound,

    #[error("Quiz not found")]
    QuizNotFound,

    #[error("Question not found")]
    QuestionNotFound,

    #[error("Answer not found")]
    AnswerNotFound,

    #[error("The user is already a member of this company")]
    AlreadyMember,

    #[error("An invitation has already been sent to this user for this company")]
    InvitationAlreadySent,

    #[error("A request has already been sent to this company")]
    RequestAlreadySent,

    #[error("This question already has answers")]
    HasAlreadyAnswers,

    #[error("You are not the owner of this company")]
    NotOwnerCompany,

    #[error("This invitation is not for you")]
    InvitationOwnership,

    #[error("This request is not yours")]
    RequestOwnership,

    #[error("You do not have permission to do this")]
    NotPermission,

    #[error("Quiz does not belong to this company")]
    QuizNotBelongsToCompany,

    #[error("At least two answers are required")]
    ValuesError,

    #[error("You have already passed this quiz. You can retake it in {0} days")]
    RemainingDays(i64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::CompanyNotFound
            | AppError::UserNotFound
            | AppError::InvitationNotFound
            | AppError::RequestNotFound
            | AppError::QuizNotFound
            | AppError::QuestionNotFound
            | AppError::AnswerNotFound => "NOT_FOUND",
            AppError::AlreadyMember
            | AppError::InvitationAlreadySent
            | AppError::RequestAlreadySent
            | AppError::HasAlreadyAnswers => "CONFLICT",
            AppError::NotOwnerCompany
            | AppError::InvitationOwnership
            | AppError::RequestOwnership
            | AppError::NotPermission
            | AppError::QuizNotBelongsToCompany => "FORBIDDEN",
            AppError::ValuesError | AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::RemainingDays(_) => "RETRY_LATER",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.error_code() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "CONFLICT" => StatusCode::CONFLICT,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "VALIDATION_ERROR" | "RETRY_LATER" => StatusCode::BAD_REQUEST,
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
