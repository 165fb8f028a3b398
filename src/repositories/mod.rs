pub mod company_repository;
pub mod invitation_repository;
pub mod join_request_repository;
pub mod membership_repository;
pub mod quiz_repository;
pub mod quiz_result_repository;
pub mod user_repository;

pub use company_repository::{CompanyRepository, MongoCompanyRepository};
pub use invitation_repository::{InvitationRepository, MongoInvitationRepository};
pub use join_request_repository::{JoinRequestRepository, MongoJoinRequestRepository};
pub use membership_repository::{MembershipRepository, MongoMembershipRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_result_repository::{MongoQuizResultRepository, QuizResultRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
