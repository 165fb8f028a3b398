use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Invitation};

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, invitation: Invitation) -> AppResult<Invitation>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Invitation>>;
    /// Pending invitation for the (company, user) pair, if any.
    async fn find_by_pair(&self, company_id: &str, user_id: &str)
        -> AppResult<Option<Invitation>>;
    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Invitation>, i64)>;
    async fn list_by_companies(
        &self,
        company_ids: &[String],
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Invitation>, i64)>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

pub struct MongoInvitationRepository {
    collection: Collection<Invitation>,
}

impl MongoInvitationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("invitations");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for invitations collection");

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
impl InvitationRepository for MongoInvitationRepository {
    async fn create(&self, invitation: Invitation) -> AppResult<Invitation> {
        self.collection.insert_one(&invitation).await?;
        Ok(invitation)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Invitation>> {
        let invitation = self.collection.find_one(doc! { "id": id }).await?;
        Ok(invitation)
    }

    async fn find_by_pair(
        &self,
        company_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Invitation>> {
        let invitation = self
            .collection
            .find_one(doc! { "company_id": company_id, "user_id": user_id })
            .await?;
        Ok(invitation)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Invitation>, i64)> {
        let filter = doc! { "user_id": user_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let invitations = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((invitations, total))
    }

    async fn list_by_companies(
        &self,
        company_ids: &[String],
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Invitation>, i64)> {
        let filter = doc! { "company_id": { "$in": company_ids } };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let invitations = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((invitations, total))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
