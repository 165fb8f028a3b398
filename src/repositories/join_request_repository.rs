use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::JoinRequest};

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    async fn create(&self, request: JoinRequest) -> AppResult<JoinRequest>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<JoinRequest>>;
    /// Pending request for the (company, user) pair, if any.
    async fn find_by_pair(&self, company_id: &str, user_id: &str)
        -> AppResult<Option<JoinRequest>>;
    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<JoinRequest>, i64)>;
    async fn list_by_company(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<JoinRequest>, i64)>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

pub struct MongoJoinRequestRepository {
    collection: Collection<JoinRequest>,
}

impl MongoJoinRequestRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("join_requests");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for join_requests collection");

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
impl JoinRequestRepository for MongoJoinRequestRepository {
    async fn create(&self, request: JoinRequest) -> AppResult<JoinRequest> {
        self.collection.insert_one(&request).await?;
        Ok(request)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<JoinRequest>> {
        let request = self.collection.find_one(doc! { "id": id }).await?;
        Ok(request)
    }

    async fn find_by_pair(
        &self,
        company_id: &str,
        user_id: &str,
    ) -> AppResult<Option<JoinRequest>> {
        let request = self
            .collection
            .find_one(doc! { "company_id": company_id, "user_id": user_id })
            .await?;
        Ok(request)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<JoinRequest>, i64)> {
        let filter = doc! { "user_id": user_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let requests = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((requests, total))
    }

    async fn list_by_company(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<JoinRequest>, i64)> {
        let filter = doc! { "company_id": company_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let requests = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((requests, total))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
