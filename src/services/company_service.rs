use std::sync::Arc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Company,
        dto::request::{CreateCompanyRequest, UpdateCompanyRequest},
    },
    pagination::Page,
    repositories::CompanyRepository,
};

pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
}

impl CompanyService {
    pub fn new(companies: Arc<dyn CompanyRepository>) -> Self {
        Self { companies }
    }

    pub async fn list_own(&self, owner_id: &str, page: Page) -> AppResult<(Vec<Company>, i64)> {
        self.companies
            .list_by_owner(owner_id, page.offset(), page.limit())
            .await
    }

    pub async fn get_own(&self, owner_id: &str, company_id: &str) -> AppResult<Company> {
        self.companies
            .find_by_id_and_owner(company_id, owner_id)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn create_company(
        &self,
        owner_id: &str,
        request: CreateCompanyRequest,
    ) -> AppResult<Company> {
        request.validate()?;

        let company = Company::new(&request.name, &request.description, owner_id);
        let created = self.companies.create(company).await?;
        log::info!("Company created: {} (owner {})", created.name, owner_id);
        Ok(created)
    }

    pub async fn update_company(
        &self,
        owner_id: &str,
        company_id: &str,
        patch: UpdateCompanyRequest,
    ) -> AppResult<Company> {
        patch.validate()?;

        let mut company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if company.owner_id != owner_id {
            return Err(AppError::NotOwnerCompany);
        }

        if let Some(name) = patch.name {
            company.name = name;
        }
        if let Some(description) = patch.description {
            company.description = description;
        }
        if let Some(visibility) = patch.visibility {
            company.visibility = visibility;
        }

        self.companies.update(company).await
    }

    pub async fn delete_company(&self, owner_id: &str, company_id: &str) -> AppResult<Company> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if company.owner_id != owner_id {
            return Err(AppError::NotOwnerCompany);
        }

        self.companies.delete(company_id).await?;
        log::info!("Company deleted: {}", company_id);
        Ok(company)
    }
}
