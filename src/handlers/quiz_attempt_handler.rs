use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{request::SubmittedAnswer, response::RatingResponse},
};

#[post("/api/companies/{company_id}/quizzes/{quiz_id}/attempts")]
pub async fn take_quiz(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    answers: web::Json<Vec<SubmittedAnswer>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, quiz_id) = path.into_inner();
    let result = state
        .quiz_attempt_service
        .take_quiz(&auth.0.sub, &company_id, &quiz_id, &answers)
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[get("/api/companies/{company_id}/rating")]
pub async fn company_rating(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let rating = state
        .quiz_attempt_service
        .average_score(&auth.0.sub, &company_id)
        .await?;
    Ok(HttpResponse::Ok().json(RatingResponse { rating }))
}

#[get("/api/rating")]
pub async fn system_rating(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let rating = state.quiz_attempt_service.system_rating(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(RatingResponse { rating }))
}
