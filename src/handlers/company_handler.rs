use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateCompanyRequest, UpdateCompanyRequest},
        response::PageResponse,
    },
    pagination::Page,
};

#[get("/api/companies")]
pub async fn list_companies(
    state: web::Data<AppState>,
    page: web::Query<Page>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (companies, total) = state.company_service.list_own(&auth.0.sub, *page).await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(companies, total, page.page)))
}

#[get("/api/companies/{id}")]
pub async fn get_company(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let company = state.company_service.get_own(&auth.0.sub, &id).await?;
    Ok(HttpResponse::Ok().json(company))
}

#[post("/api/companies")]
pub async fn create_company(
    state: web::Data<AppState>,
    request: web::Json<CreateCompanyRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let company = state
        .company_service
        .create_company(&auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(company))
}

#[patch("/api/companies/{id}")]
pub async fn update_company(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCompanyRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let company = state
        .company_service
        .update_company(&auth.0.sub, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(company))
}

#[delete("/api/companies/{id}")]
pub async fn delete_company(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let company = state
        .company_service
        .delete_company(&auth.0.sub, &id)
        .await?;
    Ok(HttpResponse::Ok().json(company))
}
