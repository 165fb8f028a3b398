use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Resolve the quiz containing the given embedded question.
    async fn find_by_question_id(&self, question_id: &str) -> AppResult<Option<Quiz>>;
    /// Resolve the quiz containing the given embedded answer.
    async fn find_by_answer_id(&self, answer_id: &str) -> AppResult<Option<Quiz>>;
    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)>;
    async fn list_by_company(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)>;
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let company_index = IndexModel::builder()
            .keys(doc! { "company_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("company_id".to_string())
                    .build(),
            )
            .build();

        let question_index = IndexModel::builder()
            .keys(doc! { "questions.id": 1 })
            .options(
                IndexOptions::builder()
                    .name("question_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(company_index).await?;
        self.collection.create_index(question_index).await?;

        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_question_id(&self, question_id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "questions.id": question_id })
            .await?;
        Ok(quiz)
    }

    async fn find_by_answer_id(&self, answer_id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "questions.answers.id": answer_id })
            .await?;
        Ok(quiz)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        use futures::TryStreamExt;
        use mongodb::options::FindOptions;

        let total = self.collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .sort(doc! { "created_at": 1 })
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;

        Ok((quizzes, total))
    }

    async fn list_by_company(
        &self,
        company_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        use futures::TryStreamExt;
        use mongodb::options::FindOptions;

        let filter = doc! { "company_id": company_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .sort(doc! { "created_at": 1 })
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;

        Ok((quizzes, total))
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection
            .replace_one(doc! { "id": &quiz.id }, &quiz)
            .await?;
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
