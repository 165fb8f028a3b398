use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoCompanyRepository, MongoInvitationRepository, MongoJoinRequestRepository,
        MongoMembershipRepository, MongoQuizRepository, MongoQuizResultRepository,
        MongoUserRepository,
    },
    services::{
        CompanyService, MembershipService, QuizAttemptService, QuizService, UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub company_service: Arc<CompanyService>,
    pub membership_service: Arc<MembershipService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    pub db: Database,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let company_repository = Arc::new(MongoCompanyRepository::new(&db));
        company_repository.ensure_indexes().await?;

        let membership_repository = Arc::new(MongoMembershipRepository::new(&db));
        membership_repository.ensure_indexes().await?;

        let invitation_repository = Arc::new(MongoInvitationRepository::new(&db));
        invitation_repository.ensure_indexes().await?;

        let join_request_repository = Arc::new(MongoJoinRequestRepository::new(&db));
        join_request_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let quiz_result_repository = Arc::new(MongoQuizResultRepository::new(&db));
        quiz_result_repository.ensure_indexes().await?;

        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let company_service = Arc::new(CompanyService::new(company_repository.clone()));
        let membership_service = Arc::new(MembershipService::new(
            company_repository.clone(),
            user_repository.clone(),
            membership_repository.clone(),
            invitation_repository,
            join_request_repository,
        ));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            company_repository.clone(),
            membership_repository,
        ));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(
            quiz_repository,
            company_repository,
            quiz_result_repository,
        ));

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.jwt_refresh_expiration_hours,
        ));

        Ok(Self {
            user_service,
            company_service,
            membership_service,
            quiz_service,
            quiz_attempt_service,
            jwt_service,
            config: Arc::new(config),
            db,
        })
    }
}
