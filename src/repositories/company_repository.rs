use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Company};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: Company) -> AppResult<Company>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Company>>;
    /// Owner-scoped lookup: returns the company only when `owner_id` matches.
    async fn find_by_id_and_owner(&self, id: &str, owner_id: &str)
        -> AppResult<Option<Company>>;
    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Company>, i64)>;
    async fn find_all_by_owner(&self, owner_id: &str) -> AppResult<Vec<Company>>;
    async fn update(&self, company: Company) -> AppResult<Company>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

pub struct MongoCompanyRepository {
    collection: Collection<Company>,
}

impl MongoCompanyRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("companies");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for companies collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(IndexOptions::builder().name("owner_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_index).await?;

        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for MongoCompanyRepository {
    async fn create(&self, company: Company) -> AppResult<Company> {
        self.collection.insert_one(&company).await?;
        Ok(company)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Company>> {
        let company = self.collection.find_one(doc! { "id": id }).await?;
        Ok(company)
    }

    async fn find_by_id_and_owner(
        &self,
        id: &str,
        owner_id: &str,
    ) -> AppResult<Option<Company>> {
        let company = self
            .collection
            .find_one(doc! { "id": id, "owner_id": owner_id })
            .await?;
        Ok(company)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Company>, i64)> {
        let filter = doc! { "owner_id": owner_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let companies = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((companies, total))
    }

    async fn find_all_by_owner(&self, owner_id: &str) -> AppResult<Vec<Company>> {
        let companies = self
            .collection
            .find(doc! { "owner_id": owner_id })
            .await?
            .try_collect()
            .await?;
        Ok(companies)
    }

    async fn update(&self, company: Company) -> AppResult<Company> {
        self.collection
            .replace_one(doc! { "id": &company.id }, &company)
            .await?;
        Ok(company)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
