use actix_web::{delete, get, patch, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::UpdateUserRequest,
        response::{PageResponse, UserDto},
    },
    pagination::Page,
};

#[get("/api/users")]
pub async fn list_users(
    state: web::Data<AppState>,
    page: web::Query<Page>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (users, total) = state.user_service.list_users(*page).await?;
    let items: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(HttpResponse::Ok().json(PageResponse::new(items, total, page.page)))
}

#[get("/api/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[patch("/api/users/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    // Profile edits are self-service only
    if auth.0.sub != *id {
        return Err(AppError::NotPermission);
    }

    let user = state
        .user_service
        .update_user(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[delete("/api/users/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    if auth.0.sub != *id {
        return Err(AppError::NotPermission);
    }

    state.user_service.delete_user(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
