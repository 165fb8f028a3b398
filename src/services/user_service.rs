use std::sync::Arc;
use validator::Validate;

use crate::{
    auth::password,
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::request::{LoginRequest, SignUpRequest, UpdateUserRequest},
    },
    pagination::Page,
    repositories::UserRepository,
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<User> {
        request.validate()?;
        if !request.username_is_valid() {
            return Err(AppError::ValidationError(
                "Username must be alphanumeric with underscores".to_string(),
            ));
        }

        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::ValidationError(
                "Username is already taken".to_string(),
            ));
        }
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ValidationError(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = password::hash_password(&request.password)?;
        let mut user = User::new(&request.username, &request.email, &password_hash);
        user.age = request.age;
        user.description = request.description;

        let created = self.users.create(user).await?;
        log::info!("New user signed up: {}", created.username);
        Ok(created)
    }

    /// Verifies credentials and returns the user; the handler issues tokens.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<User> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Incorrect username or password".to_string())
            })?;

        if !password::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Incorrect username or password".to_string(),
            ));
        }

        if user.disabled {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn list_users(&self, page: Page) -> AppResult<(Vec<User>, i64)> {
        self.users.list(page.offset(), page.limit()).await
    }

    pub async fn update_user(&self, id: &str, patch: UpdateUserRequest) -> AppResult<User> {
        patch.validate()?;

        let mut user = self.get_user(id).await?;

        if let Some(age) = patch.age {
            user.age = Some(age);
        }
        if let Some(description) = patch.description {
            user.description = Some(description);
        }
        if let Some(new_password) = patch.password {
            user.password_hash = password::hash_password(&new_password)?;
        }
        if let Some(disabled) = patch.disabled {
            user.disabled = disabled;
        }

        self.users.update(user).await
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        if !self.users.delete(id).await? {
            return Err(AppError::UserNotFound);
        }
        log::info!("User deleted: {}", id);
        Ok(())
    }
}
