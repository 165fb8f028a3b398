use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub username: String,
    pub email: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,        // user id
    pub token_type: String, // "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl RefreshClaims {
    pub fn new(user_id: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            token_type: "refresh".to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user = User::test_user("johndoe");
        let claims = Claims::new(&user, 24);

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "johndoe");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_claims_creation() {
        let refresh_claims = RefreshClaims::new("user-1", 168);

        assert_eq!(refresh_claims.sub, "user-1");
        assert_eq!(refresh_claims.token_type, "refresh");
        assert!(refresh_claims.exp > refresh_claims.iat);
    }
}
