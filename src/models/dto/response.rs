use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{CompanyMember, User};

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub active: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            email: user.email,
            age: user.age,
            description: user.description,
            active: user.active,
            disabled: user.disabled,
            created_at: user.created_at,
        }
    }
}

/// Member row joined with the user's public profile, for member/admin lists.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyMemberDto {
    pub user: UserDto,
    pub is_administrator: bool,
}

impl CompanyMemberDto {
    pub fn new(member: &CompanyMember, user: User) -> Self {
        CompanyMemberDto {
            user: user.into(),
            is_administrator: member.is_administrator,
        }
    }
}

/// Human-readable outcome of a membership workflow action.
#[derive(Debug, Serialize)]
pub struct ActionMessage {
    pub message: String,
}

impl ActionMessage {
    pub fn new(message: &str) -> Self {
        ActionMessage {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub rating: f64,
}

/// One page of a list endpoint, with the overall total for the filter.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64) -> Self {
        PageResponse {
            items,
            total,
            page: page.max(1),
        }
    }
}
