pub mod company;
pub mod invitation;
pub mod join_request;
pub mod membership;
pub mod quiz;
pub mod quiz_result;
pub mod user;

pub use company::Company;
pub use invitation::Invitation;
pub use join_request::JoinRequest;
pub use membership::CompanyMember;
pub use quiz::{Answer, Question, Quiz};
pub use quiz_result::QuizResult;
pub use user::User;
