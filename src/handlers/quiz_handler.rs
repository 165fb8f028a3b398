use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{
            AnswerInput, CreateQuestionRequest, CreateQuizRequest, UpdateAnswerRequest,
            UpdateQuestionRequest, UpdateQuizRequest,
        },
        response::PageResponse,
    },
    pagination::Page,
};

#[get("/api/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    page: web::Query<Page>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quizzes, total) = state.quiz_service.list_quizzes(*page).await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(quizzes, total, page.page)))
}

#[get("/api/companies/{company_id}/quizzes")]
pub async fn list_company_quizzes(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    page: web::Query<Page>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quizzes, total) = state
        .quiz_service
        .list_by_company(&company_id, *page)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(quizzes, total, page.page)))
}

#[get("/api/quizzes/{quiz_id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/companies/{company_id}/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .create_quiz(&auth.0.sub, &company_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[patch("/api/quizzes/{quiz_id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz(&auth.0.sub, &quiz_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/api/quizzes/{quiz_id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.delete_quiz(&auth.0.sub, &quiz_id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/quizzes/{quiz_id}/questions")]
pub async fn create_question(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<CreateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .quiz_service
        .create_question(&auth.0.sub, &quiz_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[patch("/api/questions/{question_id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    question_id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .quiz_service
        .update_question(&auth.0.sub, &question_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/api/questions/{question_id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    question_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .quiz_service
        .delete_question(&auth.0.sub, &question_id)
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/api/questions/{question_id}/answers")]
pub async fn create_answers(
    state: web::Data<AppState>,
    question_id: web::Path<String>,
    request: web::Json<Vec<AnswerInput>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let answers = state
        .quiz_service
        .create_answers(&auth.0.sub, &question_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(answers))
}

#[patch("/api/answers/{answer_id}")]
pub async fn update_answer(
    state: web::Data<AppState>,
    answer_id: web::Path<String>,
    request: web::Json<UpdateAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let answer = state
        .quiz_service
        .update_answer(&auth.0.sub, &answer_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(answer))
}

#[delete("/api/answers/{answer_id}")]
pub async fn delete_answer(
    state: web::Data<AppState>,
    answer_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let answer = state
        .quiz_service
        .delete_answer(&auth.0.sub, &answer_id)
        .await?;
    Ok(HttpResponse::Ok().json(answer))
}
