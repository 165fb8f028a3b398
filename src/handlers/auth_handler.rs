use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RefreshTokenRequest, SignUpRequest},
        response::{AuthResponse, RefreshTokenResponse, UserDto},
    },
};

#[post("/api/auth/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.sign_up(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.login(&request).await?;

    let token = state.jwt_service.create_token(&user)?;
    let refresh_token_value = state.jwt_service.create_refresh_token(&user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        refresh_token: refresh_token_value,
        username: user.username,
        email: user.email,
    }))
}

#[post("/api/auth/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let refresh_claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;

    let user = state
        .user_service
        .get_user(&refresh_claims.sub)
        .await
        .map_err(|_| {
            AppError::Unauthorized("User associated with refresh token not found".to_string())
        })?;

    let new_token = state.jwt_service.create_token(&user)?;
    let new_refresh_token = state.jwt_service.create_refresh_token(&user.id)?;

    log::info!("Token refreshed for user: {}", user.username);

    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        token: new_token,
        refresh_token: new_refresh_token,
    }))
}

#[get("/api/auth/me")]
pub async fn me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}
