pub mod company_service;
pub mod membership_service;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod user_service;

pub use company_service::CompanyService;
pub use membership_service::MembershipService;
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use user_service::UserService;
