use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::CompanyMember};

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn create(&self, member: CompanyMember) -> AppResult<CompanyMember>;
    /// Direct indexed lookup of the (company, user) pair.
    async fn find(&self, company_id: &str, user_id: &str) -> AppResult<Option<CompanyMember>>;
    async fn list_members(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CompanyMember>, i64)>;
    async fn list_admins(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CompanyMember>, i64)>;
    async fn set_administrator(
        &self,
        company_id: &str,
        user_id: &str,
        is_administrator: bool,
    ) -> AppResult<Option<CompanyMember>>;
    async fn delete(&self, company_id: &str, user_id: &str) -> AppResult<bool>;
}

pub struct MongoMembershipRepository {
    collection: Collection<CompanyMember>,
}

impl MongoMembershipRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("company_members");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for company_members collection");

        // The unique pair index also backstops racing duplicate inserts.
        let pair_index = IndexModel::builder()
            .keys(doc! { "company_id": 1, "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("company_user_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(pair_index).await?;

        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for MongoMembershipRepository {
    async fn create(&self, member: CompanyMember) -> AppResult<CompanyMember> {
        self.collection.insert_one(&member).await?;
        Ok(member)
    }

    async fn find(&self, company_id: &str, user_id: &str) -> AppResult<Option<CompanyMember>> {
        let member = self
            .collection
            .find_one(doc! { "company_id": company_id, "user_id": user_id })
            .await?;
        Ok(member)
    }

    async fn list_members(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CompanyMember>, i64)> {
        let filter = doc! { "company_id": company_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let members = self
            .collection
            .find(filter)
            .sort(doc! { "user_id": 1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((members, total))
    }

    async fn list_admins(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CompanyMember>, i64)> {
        let filter = doc! { "company_id": company_id, "is_administrator": true };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let admins = self
            .collection
            .find(filter)
            .sort(doc! { "user_id": 1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((admins, total))
    }

    async fn set_administrator(
        &self,
        company_id: &str,
        user_id: &str,
        is_administrator: bool,
    ) -> AppResult<Option<CompanyMember>> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "company_id": company_id, "user_id": user_id },
                doc! { "$set": { "is_administrator": is_administrator } },
            )
            .return_document(mongodb::options::ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, company_id: &str, user_id: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "company_id": company_id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
