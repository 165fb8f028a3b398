use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{CompanyMember, Invitation, JoinRequest},
        dto::response::CompanyMemberDto,
    },
    pagination::Page,
    repositories::{
        CompanyRepository, InvitationRepository, JoinRequestRepository, MembershipRepository,
        UserRepository,
    },
};

/// Membership workflow engine.
///
/// Each (company, user) pair moves through two independent pending states:
/// an owner-initiated invitation or a user-initiated join request. Either
/// pending row converts into a member row on accept, or disappears on
/// cancel/reject. A consumed row never blocks a later invitation or request
/// for the same pair; only *pending* rows are checked for uniqueness.
pub struct MembershipService {
    companies: Arc<dyn CompanyRepository>,
    users: Arc<dyn UserRepository>,
    members: Arc<dyn MembershipRepository>,
    invitations: Arc<dyn InvitationRepository>,
    requests: Arc<dyn JoinRequestRepository>,
}

impl MembershipService {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        users: Arc<dyn UserRepository>,
        members: Arc<dyn MembershipRepository>,
        invitations: Arc<dyn InvitationRepository>,
        requests: Arc<dyn JoinRequestRepository>,
    ) -> Self {
        Self {
            companies,
            users,
            members,
            invitations,
            requests,
        }
    }

    // ----- owner-initiated flow -----

    /// Owner invites a user into their company.
    ///
    /// Note: inviting yourself is not rejected here; the ownership lookup
    /// only proves the caller owns the company, not that the invitee is
    /// someone else.
    pub async fn send_invitation(
        &self,
        owner_id: &str,
        user_id: &str,
        company_id: &str,
    ) -> AppResult<Invitation> {
        let company = self
            .companies
            .find_by_id_and_owner(company_id, owner_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if self.members.find(company_id, user_id).await?.is_some() {
            return Err(AppError::AlreadyMember);
        }

        if self
            .invitations
            .find_by_pair(company_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::InvitationAlreadySent);
        }

        let invitation = self
            .invitations
            .create(Invitation::new(company_id, user_id))
            .await?;
        log::info!(
            "Invitation sent: user {} to company {}",
            user_id,
            company.id
        );
        Ok(invitation)
    }

    pub async fn cancel_invitation(&self, owner_id: &str, invitation_id: &str) -> AppResult<()> {
        let invitation = self
            .invitations
            .find_by_id(invitation_id)
            .await?
            .ok_or(AppError::InvitationNotFound)?;

        self.ensure_company_owner(&invitation.company_id, owner_id)
            .await?;

        self.invitations.delete(invitation_id).await?;
        Ok(())
    }

    /// Invitee accepts: the invitation row is consumed and a member row
    /// appears, as one logical step. The delete is the linearization point;
    /// a racing second accept finds the row already gone and fails instead
    /// of inserting a duplicate member.
    pub async fn accept_invitation(
        &self,
        user_id: &str,
        invitation_id: &str,
    ) -> AppResult<CompanyMember> {
        let invitation = self
            .invitations
            .find_by_id(invitation_id)
            .await?
            .ok_or(AppError::InvitationNotFound)?;

        if invitation.user_id != user_id {
            return Err(AppError::InvitationOwnership);
        }

        // Re-check right before insert; the unique pair index backstops this.
        if self
            .members
            .find(&invitation.company_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyMember);
        }

        if !self.invitations.delete(invitation_id).await? {
            return Err(AppError::InvitationNotFound);
        }

        let member = self
            .members
            .create(CompanyMember::new(&invitation.company_id, user_id))
            .await?;
        log::info!(
            "Invitation accepted: user {} joined company {}",
            user_id,
            invitation.company_id
        );
        Ok(member)
    }

    pub async fn reject_invitation(&self, user_id: &str, invitation_id: &str) -> AppResult<()> {
        let invitation = self
            .invitations
            .find_by_id(invitation_id)
            .await?
            .ok_or(AppError::InvitationNotFound)?;

        if invitation.user_id != user_id {
            return Err(AppError::InvitationOwnership);
        }

        self.invitations.delete(invitation_id).await?;
        Ok(())
    }

    // ----- user-initiated flow -----

    /// User asks to join a company. A request to the caller's own company
    /// surfaces as not-found, not as a distinct error.
    pub async fn send_request(&self, user_id: &str, company_id: &str) -> AppResult<JoinRequest> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .filter(|c| c.owner_id != user_id)
            .ok_or(AppError::CompanyNotFound)?;

        if self.members.find(company_id, user_id).await?.is_some() {
            return Err(AppError::AlreadyMember);
        }

        if self
            .requests
            .find_by_pair(company_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::RequestAlreadySent);
        }

        let request = self
            .requests
            .create(JoinRequest::new(company_id, user_id))
            .await?;
        log::info!("Join request sent: user {} to company {}", user_id, company.id);
        Ok(request)
    }

    pub async fn cancel_request(&self, user_id: &str, request_id: &str) -> AppResult<()> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(AppError::RequestNotFound)?;

        if request.user_id != user_id {
            return Err(AppError::RequestOwnership);
        }

        self.requests.delete(request_id).await?;
        Ok(())
    }

    /// Owner accepts a join request; mirrors `accept_invitation`.
    pub async fn accept_request(
        &self,
        owner_id: &str,
        request_id: &str,
    ) -> AppResult<CompanyMember> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(AppError::RequestNotFound)?;

        self.ensure_company_owner(&request.company_id, owner_id)
            .await?;

        if self
            .members
            .find(&request.company_id, &request.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyMember);
        }

        if !self.requests.delete(request_id).await? {
            return Err(AppError::RequestNotFound);
        }

        let member = self
            .members
            .create(CompanyMember::new(&request.company_id, &request.user_id))
            .await?;
        log::info!(
            "Request accepted: user {} joined company {}",
            request.user_id,
            request.company_id
        );
        Ok(member)
    }

    pub async fn reject_request(&self, owner_id: &str, request_id: &str) -> AppResult<()> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(AppError::RequestNotFound)?;

        self.ensure_company_owner(&request.company_id, owner_id)
            .await?;

        self.requests.delete(request_id).await?;
        Ok(())
    }

    // ----- membership maintenance -----

    pub async fn remove_user(
        &self,
        owner_id: &str,
        user_id: &str,
        company_id: &str,
    ) -> AppResult<()> {
        self.ensure_company_owner(company_id, owner_id).await?;

        if !self.members.delete(company_id, user_id).await? {
            return Err(AppError::UserNotFound);
        }
        log::info!("User {} removed from company {}", user_id, company_id);
        Ok(())
    }

    /// The owner holds no member row, so an owner "leaving" their own
    /// company falls out as not-found.
    pub async fn leave_company(&self, user_id: &str, company_id: &str) -> AppResult<()> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if !self.members.delete(company_id, user_id).await? {
            return Err(AppError::UserNotFound);
        }
        log::info!("User {} left company {}", user_id, company_id);
        Ok(())
    }

    pub async fn add_admin(
        &self,
        owner_id: &str,
        user_id: &str,
        company_id: &str,
    ) -> AppResult<CompanyMember> {
        self.set_admin_flag(owner_id, user_id, company_id, true).await
    }

    pub async fn remove_admin(
        &self,
        owner_id: &str,
        user_id: &str,
        company_id: &str,
    ) -> AppResult<CompanyMember> {
        self.set_admin_flag(owner_id, user_id, company_id, false)
            .await
    }

    async fn set_admin_flag(
        &self,
        owner_id: &str,
        user_id: &str,
        company_id: &str,
        is_administrator: bool,
    ) -> AppResult<CompanyMember> {
        self.ensure_company_owner(company_id, owner_id).await?;

        self.members
            .set_administrator(company_id, user_id, is_administrator)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // ----- list views -----

    pub async fn my_requests(
        &self,
        user_id: &str,
        page: Page,
    ) -> AppResult<(Vec<JoinRequest>, i64)> {
        self.requests
            .list_by_user(user_id, page.offset(), page.limit())
            .await
    }

    pub async fn my_invitations(
        &self,
        user_id: &str,
        page: Page,
    ) -> AppResult<(Vec<Invitation>, i64)> {
        self.invitations
            .list_by_user(user_id, page.offset(), page.limit())
            .await
    }

    /// Invitations outstanding across every company the caller owns.
    pub async fn owner_invitations(
        &self,
        owner_id: &str,
        page: Page,
    ) -> AppResult<(Vec<Invitation>, i64)> {
        let companies = self.companies.find_all_by_owner(owner_id).await?;
        let company_ids: Vec<String> = companies.into_iter().map(|c| c.id).collect();

        if company_ids.is_empty() {
            return Ok((Vec::new(), 0));
        }

        self.invitations
            .list_by_companies(&company_ids, page.offset(), page.limit())
            .await
    }

    pub async fn requests_in_company(
        &self,
        owner_id: &str,
        company_id: &str,
        page: Page,
    ) -> AppResult<(Vec<JoinRequest>, i64)> {
        self.ensure_company_owner(company_id, owner_id).await?;

        self.requests
            .list_by_company(company_id, page.offset(), page.limit())
            .await
    }

    pub async fn users_in_company(
        &self,
        company_id: &str,
        page: Page,
    ) -> AppResult<(Vec<CompanyMemberDto>, i64)> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        let (members, total) = self
            .members
            .list_members(company_id, page.offset(), page.limit())
            .await?;

        self.join_member_users(members, total).await
    }

    pub async fn admins_in_company(
        &self,
        company_id: &str,
        page: Page,
    ) -> AppResult<(Vec<CompanyMemberDto>, i64)> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        let (admins, total) = self
            .members
            .list_admins(company_id, page.offset(), page.limit())
            .await?;

        self.join_member_users(admins, total).await
    }

    // ----- helpers -----

    async fn ensure_company_owner(&self, company_id: &str, owner_id: &str) -> AppResult<()> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if company.owner_id != owner_id {
            return Err(AppError::NotOwnerCompany);
        }
        Ok(())
    }

    async fn join_member_users(
        &self,
        members: Vec<CompanyMember>,
        total: i64,
    ) -> AppResult<(Vec<CompanyMemberDto>, i64)> {
        let mut dtos = Vec::with_capacity(members.len());
        for member in &members {
            if let Some(user) = self.users.find_by_id(&member.user_id).await? {
                dtos.push(CompanyMemberDto::new(member, user));
            }
        }
        Ok((dtos, total))
    }
}
