use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuizResult};

#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult>;
    /// The user's most recent attempt at a quiz, for cooldown checks.
    async fn find_latest(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<QuizResult>>;
    /// Attempt history in chronological order, company-scoped.
    async fn list_by_user_and_company(
        &self,
        user_id: &str,
        company_id: &str,
    ) -> AppResult<Vec<QuizResult>>;
    /// Attempt history in chronological order, across all companies.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>>;
}

pub struct MongoQuizResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoQuizResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_results");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_results collection");

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1, "timestamp": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_quiz_timestamp".to_string())
                    .build(),
            )
            .build();

        let user_company_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "company_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_company".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_quiz_index).await?;
        self.collection.create_index(user_company_index).await?;

        Ok(())
    }
}

#[async_trait]
impl QuizResultRepository for MongoQuizResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn find_latest(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<QuizResult>> {
        let result = self
            .collection
            .find_one(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .sort(doc! { "timestamp": -1 })
            .await?;
        Ok(result)
    }

    async fn list_by_user_and_company(
        &self,
        user_id: &str,
        company_id: &str,
    ) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! { "user_id": user_id, "company_id": company_id })
            .sort(doc! { "timestamp": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "timestamp": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }
}
