use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::response::{ActionMessage, PageResponse},
    pagination::Page,
};

// ----- owner: invitations -----

#[post("/api/actions/companies/{company_id}/invite/{user_id}")]
pub async fn send_invitation(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, user_id) = path.into_inner();
    state
        .membership_service
        .send_invitation(&auth.0.sub, &user_id, &company_id)
        .await?;
    Ok(HttpResponse::Created().json(ActionMessage::new("Invitation sent successfully")))
}

#[delete("/api/actions/invitations/{invitation_id}")]
pub async fn cancel_invitation(
    state: web::Data<AppState>,
    invitation_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .cancel_invitation(&auth.0.sub, &invitation_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("Invitation canceled successfully")))
}

// ----- invitee: invitations -----

#[post("/api/actions/invitations/{invitation_id}/accept")]
pub async fn accept_invitation(
    state: web::Data<AppState>,
    invitation_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .accept_invitation(&auth.0.sub, &invitation_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("Invitation accepted successfully")))
}

#[delete("/api/actions/invitations/{invitation_id}/reject")]
pub async fn reject_invitation(
    state: web::Data<AppState>,
    invitation_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .reject_invitation(&auth.0.sub, &invitation_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("Invitation rejected successfully")))
}

// ----- user: join requests -----

#[post("/api/actions/companies/{company_id}/request")]
pub async fn send_request(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .send_request(&auth.0.sub, &company_id)
        .await?;
    Ok(HttpResponse::Created().json(ActionMessage::new("Request sent successfully")))
}

#[delete("/api/actions/requests/{request_id}")]
pub async fn cancel_request(
    state: web::Data<AppState>,
    request_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .cancel_request(&auth.0.sub, &request_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("Request canceled successfully")))
}

// ----- owner: join requests -----

#[post("/api/actions/requests/{request_id}/accept")]
pub async fn accept_request(
    state: web::Data<AppState>,
    request_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .accept_request(&auth.0.sub, &request_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("Request accepted successfully")))
}

#[delete("/api/actions/requests/{request_id}/reject")]
pub async fn reject_request(
    state: web::Data<AppState>,
    request_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .reject_request(&auth.0.sub, &request_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("Request rejected successfully")))
}

// ----- membership maintenance -----

#[delete("/api/actions/companies/{company_id}/members/{user_id}")]
pub async fn remove_user(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, user_id) = path.into_inner();
    state
        .membership_service
        .remove_user(&auth.0.sub, &user_id, &company_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("User removed from company")))
}

#[delete("/api/actions/companies/{company_id}/leave")]
pub async fn leave_company(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .membership_service
        .leave_company(&auth.0.sub, &company_id)
        .await?;
    Ok(HttpResponse::Ok().json(ActionMessage::new("You left the company")))
}

#[patch("/api/actions/companies/{company_id}/admins/{user_id}")]
pub async fn add_admin(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, user_id) = path.into_inner();
    let member = state
        .membership_service
        .add_admin(&auth.0.sub, &user_id, &company_id)
        .await?;
    Ok(HttpResponse::Ok().json(member))
}

#[delete("/api/actions/companies/{company_id}/admins/{user_id}")]
pub async fn remove_admin(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, user_id) = path.into_inner();
    let member = state
        .membership_service
        .remove_admin(&auth.0.sub, &user_id, &company_id)
        .await?;
    Ok(HttpResponse::Ok().json(member))
}

// ----- list views -----

#[get("/api/actions/requests")]
pub async fn my_requests(
    state: web::Data<AppState>,
    page: web::Query<Page>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (requests, total) = state
        .membership_service
        .my_requests(&auth.0.sub, *page)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(requests, total, page.page)))
}

#[get("/api/actions/invitations")]
pub async fn my_invitations(
    state: web::Data<AppState>,
    page: web::Query<Page>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (invitations, total) = state
        .membership_service
        .my_invitations(&auth.0.sub, *page)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(invitations, total, page.page)))
}

#[get("/api/actions/invitations/sent")]
pub async fn owner_invitations(
    state: web::Data<AppState>,
    page: web::Query<Page>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (invitations, total) = state
        .membership_service
        .owner_invitations(&auth.0.sub, *page)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(invitations, total, page.page)))
}

#[get("/api/actions/companies/{company_id}/requests")]
pub async fn requests_in_company(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    page: web::Query<Page>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (requests, total) = state
        .membership_service
        .requests_in_company(&auth.0.sub, &company_id, *page)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(requests, total, page.page)))
}

#[get("/api/actions/companies/{company_id}/members")]
pub async fn users_in_company(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    page: web::Query<Page>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (members, total) = state
        .membership_service
        .users_in_company(&company_id, *page)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(members, total, page.page)))
}

#[get("/api/actions/companies/{company_id}/admins")]
pub async fn admins_in_company(
    state: web::Data<AppState>,
    company_id: web::Path<String>,
    page: web::Query<Page>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (admins, total) = state
        .membership_service
        .admins_in_company(&company_id, *page)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(admins, total, page.page)))
}
