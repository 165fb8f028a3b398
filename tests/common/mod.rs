#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quorum_server::{
    errors::{AppError, AppResult},
    models::domain::{Company, CompanyMember, Invitation, JoinRequest, Quiz, QuizResult, User},
    repositories::{
        CompanyRepository, InvitationRepository, JoinRequestRepository, MembershipRepository,
        QuizRepository, QuizResultRepository, UserRepository,
    },
    services::{CompanyService, MembershipService, QuizAttemptService, QuizService, UserService},
};

fn page_slice<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    let start = offset.max(0) as usize;
    let end = (start + limit.max(0) as usize).min(items.len());
    if start >= items.len() {
        vec![]
    } else {
        items[start..end].to_vec()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::DatabaseError(
                "duplicate key: username".to_string(),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::DatabaseError("duplicate key: email".to_string()));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let users = self.users.read().await;
        let mut items: Vec<_> = users.values().cloned().collect();
        items.sort_by(|a, b| a.username.cmp(&b.username));
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.users.write().await.remove(id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: RwLock<HashMap<String, Company>>,
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn create(&self, company: Company) -> AppResult<Company> {
        self.companies
            .write()
            .await
            .insert(company.id.clone(), company.clone());
        Ok(company)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Company>> {
        Ok(self.companies.read().await.get(id).cloned())
    }

    async fn find_by_id_and_owner(
        &self,
        id: &str,
        owner_id: &str,
    ) -> AppResult<Option<Company>> {
        Ok(self
            .companies
            .read()
            .await
            .get(id)
            .filter(|c| c.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Company>, i64)> {
        let companies = self.companies.read().await;
        let mut items: Vec<_> = companies
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn find_all_by_owner(&self, owner_id: &str) -> AppResult<Vec<Company>> {
        Ok(self
            .companies
            .read()
            .await
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, company: Company) -> AppResult<Company> {
        self.companies
            .write()
            .await
            .insert(company.id.clone(), company.clone());
        Ok(company)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.companies.write().await.remove(id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryMembershipRepository {
    members: RwLock<Vec<CompanyMember>>,
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn create(&self, member: CompanyMember) -> AppResult<CompanyMember> {
        let mut members = self.members.write().await;
        // Mirrors the unique (company_id, user_id) index
        if members
            .iter()
            .any(|m| m.company_id == member.company_id && m.user_id == member.user_id)
        {
            return Err(AppError::DatabaseError(
                "duplicate key: company_id, user_id".to_string(),
            ));
        }
        members.push(member.clone());
        Ok(member)
    }

    async fn find(&self, company_id: &str, user_id: &str) -> AppResult<Option<CompanyMember>> {
        Ok(self
            .members
            .read()
            .await
            .iter()
            .find(|m| m.company_id == company_id && m.user_id == user_id)
            .cloned())
    }

    async fn list_members(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CompanyMember>, i64)> {
        let members = self.members.read().await;
        let mut items: Vec<_> = members
            .iter()
            .filter(|m| m.company_id == company_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn list_admins(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CompanyMember>, i64)> {
        let members = self.members.read().await;
        let mut items: Vec<_> = members
            .iter()
            .filter(|m| m.company_id == company_id && m.is_administrator)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn set_administrator(
        &self,
        company_id: &str,
        user_id: &str,
        is_administrator: bool,
    ) -> AppResult<Option<CompanyMember>> {
        let mut members = self.members.write().await;
        let member = members
            .iter_mut()
            .find(|m| m.company_id == company_id && m.user_id == user_id);
        match member {
            Some(member) => {
                member.is_administrator = is_administrator;
                Ok(Some(member.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, company_id: &str, user_id: &str) -> AppResult<bool> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|m| !(m.company_id == company_id && m.user_id == user_id));
        Ok(members.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryInvitationRepository {
    invitations: RwLock<Vec<Invitation>>,
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn create(&self, invitation: Invitation) -> AppResult<Invitation> {
        let mut invitations = self.invitations.write().await;
        if invitations
            .iter()
            .any(|i| i.company_id == invitation.company_id && i.user_id == invitation.user_id)
        {
            return Err(AppError::DatabaseError(
                "duplicate key: company_id, user_id".to_string(),
            ));
        }
        invitations.push(invitation.clone());
        Ok(invitation)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Invitation>> {
        Ok(self
            .invitations
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn find_by_pair(
        &self,
        company_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Invitation>> {
        Ok(self
            .invitations
            .read()
            .await
            .iter()
            .find(|i| i.company_id == company_id && i.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Invitation>, i64)> {
        let invitations = self.invitations.read().await;
        let items: Vec<_> = invitations
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn list_by_companies(
        &self,
        company_ids: &[String],
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Invitation>, i64)> {
        let invitations = self.invitations.read().await;
        let items: Vec<_> = invitations
            .iter()
            .filter(|i| company_ids.contains(&i.company_id))
            .cloned()
            .collect();
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut invitations = self.invitations.write().await;
        let before = invitations.len();
        invitations.retain(|i| i.id != id);
        Ok(invitations.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryJoinRequestRepository {
    requests: RwLock<Vec<JoinRequest>>,
}

#[async_trait]
impl JoinRequestRepository for InMemoryJoinRequestRepository {
    async fn create(&self, request: JoinRequest) -> AppResult<JoinRequest> {
        let mut requests = self.requests.write().await;
        if requests
            .iter()
            .any(|r| r.company_id == request.company_id && r.user_id == request.user_id)
        {
            return Err(AppError::DatabaseError(
                "duplicate key: company_id, user_id".to_string(),
            ));
        }
        requests.push(request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<JoinRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_pair(
        &self,
        company_id: &str,
        user_id: &str,
    ) -> AppResult<Option<JoinRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.company_id == company_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<JoinRequest>, i64)> {
        let requests = self.requests.read().await;
        let items: Vec<_> = requests
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn list_by_company(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<JoinRequest>, i64)> {
        let requests = self.requests.read().await;
        let items: Vec<_> = requests
            .iter()
            .filter(|r| r.company_id == company_id)
            .cloned()
            .collect();
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|r| r.id != id);
        Ok(requests.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes
            .write()
            .await
            .insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn find_by_question_id(&self, question_id: &str) -> AppResult<Option<Quiz>> {
        Ok(self
            .quizzes
            .read()
            .await
            .values()
            .find(|q| q.questions.iter().any(|question| question.id == question_id))
            .cloned())
    }

    async fn find_by_answer_id(&self, answer_id: &str) -> AppResult<Option<Quiz>> {
        Ok(self
            .quizzes
            .read()
            .await
            .values()
            .find(|q| {
                q.questions
                    .iter()
                    .any(|question| question.answers.iter().any(|a| a.id == answer_id))
            })
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn list_by_company(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.company_id == company_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        let total = items.len() as i64;
        Ok((page_slice(&items, offset, limit), total))
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes
            .write()
            .await
            .insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.quizzes.write().await.remove(id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryQuizResultRepository {
    results: RwLock<Vec<QuizResult>>,
}

#[async_trait]
impl QuizResultRepository for InMemoryQuizResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_latest(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<QuizResult>> {
        Ok(self
            .results
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id && r.quiz_id == quiz_id)
            .max_by_key(|r| r.timestamp)
            .cloned())
    }

    async fn list_by_user_and_company(
        &self,
        user_id: &str,
        company_id: &str,
    ) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .iter()
            .filter(|r| r.user_id == user_id && r.company_id == company_id)
            .cloned()
            .collect();
        items.sort_by_key(|r| r.timestamp);
        Ok(items)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|r| r.timestamp);
        Ok(items)
    }
}

/// All services wired to shared in-memory repositories.
pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub companies: Arc<InMemoryCompanyRepository>,
    pub members: Arc<InMemoryMembershipRepository>,
    pub invitations: Arc<InMemoryInvitationRepository>,
    pub requests: Arc<InMemoryJoinRequestRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub results: Arc<InMemoryQuizResultRepository>,
    pub user_service: UserService,
    pub company_service: CompanyService,
    pub membership_service: MembershipService,
    pub quiz_service: QuizService,
    pub attempt_service: QuizAttemptService,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let companies = Arc::new(InMemoryCompanyRepository::default());
        let members = Arc::new(InMemoryMembershipRepository::default());
        let invitations = Arc::new(InMemoryInvitationRepository::default());
        let requests = Arc::new(InMemoryJoinRequestRepository::default());
        let quizzes = Arc::new(InMemoryQuizRepository::default());
        let results = Arc::new(InMemoryQuizResultRepository::default());

        let user_service = UserService::new(users.clone());
        let company_service = CompanyService::new(companies.clone());
        let membership_service = MembershipService::new(
            companies.clone(),
            users.clone(),
            members.clone(),
            invitations.clone(),
            requests.clone(),
        );
        let quiz_service = QuizService::new(quizzes.clone(), companies.clone(), members.clone());
        let attempt_service =
            QuizAttemptService::new(quizzes.clone(), companies.clone(), results.clone());

        Self {
            users,
            companies,
            members,
            invitations,
            requests,
            quizzes,
            results,
            user_service,
            company_service,
            membership_service,
            quiz_service,
            attempt_service,
        }
    }

    pub async fn seed_user(&self, username: &str) -> User {
        let user = User::new(
            username,
            &format!("{}@example.com", username),
            "$argon2id$test-hash",
        );
        self.users.create(user).await.expect("seed user")
    }

    pub async fn seed_company(&self, name: &str, owner_id: &str) -> Company {
        let company = Company::new(name, "a test company", owner_id);
        self.companies.create(company).await.expect("seed company")
    }

    pub async fn seed_member(&self, company_id: &str, user_id: &str) -> CompanyMember {
        self.members
            .create(CompanyMember::new(company_id, user_id))
            .await
            .expect("seed member")
    }
}
