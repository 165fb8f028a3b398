pub mod auth_handler;
pub mod company_action_handler;
pub mod company_handler;
pub mod health_handler;
pub mod quiz_attempt_handler;
pub mod quiz_handler;
pub mod user_handler;
