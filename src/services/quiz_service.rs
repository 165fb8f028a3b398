use std::sync::Arc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Answer, Question, Quiz},
        dto::request::{
            AnswerInput, CreateQuestionRequest, CreateQuizRequest, UpdateAnswerRequest,
            UpdateQuestionRequest, UpdateQuizRequest,
        },
    },
    pagination::Page,
    repositories::{CompanyRepository, MembershipRepository, QuizRepository},
};

/// Quiz authoring engine: CRUD over quizzes, their embedded questions and
/// answer sets, gated by the owner-or-admin rule of the quiz's company.
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    companies: Arc<dyn CompanyRepository>,
    members: Arc<dyn MembershipRepository>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        companies: Arc<dyn CompanyRepository>,
        members: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            quizzes,
            companies,
            members,
        }
    }

    // ----- reads -----

    pub async fn list_quizzes(&self, page: Page) -> AppResult<(Vec<Quiz>, i64)> {
        self.quizzes.list(page.offset(), page.limit()).await
    }

    pub async fn list_by_company(
        &self,
        company_id: &str,
        page: Page,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        self.quizzes
            .list_by_company(company_id, page.offset(), page.limit())
            .await
    }

    pub async fn get_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or(AppError::QuizNotFound)
    }

    // ----- quiz CRUD -----

    pub async fn create_quiz(
        &self,
        user_id: &str,
        company_id: &str,
        request: CreateQuizRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;
        self.ensure_can_author(company_id, user_id).await?;

        let quiz = Quiz::new(
            &request.title,
            request.description,
            request.frequency_days,
            company_id,
        );
        let created = self.quizzes.create(quiz).await?;
        log::info!("Quiz created: {} in company {}", created.id, company_id);
        Ok(created)
    }

    pub async fn update_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
        patch: UpdateQuizRequest,
    ) -> AppResult<Quiz> {
        patch.validate()?;

        let mut quiz = self.get_quiz(quiz_id).await?;
        self.ensure_can_author(&quiz.company_id, user_id).await?;

        if let Some(title) = patch.title {
            quiz.title = title;
        }
        if let Some(description) = patch.description {
            quiz.description = Some(description);
        }
        if let Some(frequency_days) = patch.frequency_days {
            quiz.frequency_days = Some(frequency_days);
        }

        self.quizzes.update(quiz).await
    }

    pub async fn delete_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<Quiz> {
        let quiz = self.get_quiz(quiz_id).await?;
        self.ensure_can_author(&quiz.company_id, user_id).await?;

        self.quizzes.delete(quiz_id).await?;
        log::info!("Quiz deleted: {}", quiz_id);
        Ok(quiz)
    }

    // ----- question CRUD -----

    pub async fn create_question(
        &self,
        user_id: &str,
        quiz_id: &str,
        request: CreateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;

        let mut quiz = self.get_quiz(quiz_id).await?;
        self.ensure_can_author(&quiz.company_id, user_id).await?;

        let question = Question::new(&request.question_text);
        quiz.questions.push(question.clone());
        self.quizzes.update(quiz).await?;
        Ok(question)
    }

    pub async fn update_question(
        &self,
        user_id: &str,
        question_id: &str,
        patch: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        patch.validate()?;

        let mut quiz = self
            .quizzes
            .find_by_question_id(question_id)
            .await?
            .ok_or(AppError::QuestionNotFound)?;
        self.ensure_can_author(&quiz.company_id, user_id).await?;

        let question = quiz
            .question_mut(question_id)
            .ok_or(AppError::QuestionNotFound)?;
        if let Some(question_text) = patch.question_text {
            question.question_text = question_text;
        }
        let updated = question.clone();

        self.quizzes.update(quiz).await?;
        Ok(updated)
    }

    pub async fn delete_question(&self, user_id: &str, question_id: &str) -> AppResult<Question> {
        let mut quiz = self
            .quizzes
            .find_by_question_id(question_id)
            .await?
            .ok_or(AppError::QuestionNotFound)?;
        self.ensure_can_author(&quiz.company_id, user_id).await?;

        let position = quiz
            .questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or(AppError::QuestionNotFound)?;
        let removed = quiz.questions.remove(position);

        self.quizzes.update(quiz).await?;
        Ok(removed)
    }

    // ----- answer CRUD -----

    /// Populates a question's answer set in one batch. The set is immutable
    /// once non-empty and must hold at least two answers with exactly one
    /// marked correct.
    pub async fn create_answers(
        &self,
        user_id: &str,
        question_id: &str,
        answers: Vec<AnswerInput>,
    ) -> AppResult<Vec<Answer>> {
        for answer in &answers {
            answer.validate()?;
        }

        let mut quiz = self
            .quizzes
            .find_by_question_id(question_id)
            .await?
            .ok_or(AppError::QuestionNotFound)?;

        let question = quiz
            .question(question_id)
            .ok_or(AppError::QuestionNotFound)?;
        if !question.answers.is_empty() {
            return Err(AppError::HasAlreadyAnswers);
        }

        self.ensure_can_author(&quiz.company_id, user_id).await?;

        if answers.len() < 2 {
            return Err(AppError::ValuesError);
        }

        let correct_count = answers.iter().filter(|a| a.is_correct).count();
        if correct_count != 1 {
            return Err(AppError::ValidationError(
                "Exactly one correct answer is required".to_string(),
            ));
        }

        let new_answers: Vec<Answer> = answers
            .iter()
            .map(|a| Answer::new(&a.answer_text, a.is_correct))
            .collect();

        let question = quiz
            .question_mut(question_id)
            .ok_or(AppError::QuestionNotFound)?;
        question.answers = new_answers.clone();

        self.quizzes.update(quiz).await?;
        Ok(new_answers)
    }

    pub async fn update_answer(
        &self,
        user_id: &str,
        answer_id: &str,
        patch: UpdateAnswerRequest,
    ) -> AppResult<Answer> {
        patch.validate()?;

        let mut quiz = self
            .quizzes
            .find_by_answer_id(answer_id)
            .await?
            .ok_or(AppError::AnswerNotFound)?;
        self.ensure_can_author(&quiz.company_id, user_id).await?;

        let answer = quiz
            .questions
            .iter_mut()
            .flat_map(|q| q.answers.iter_mut())
            .find(|a| a.id == answer_id)
            .ok_or(AppError::AnswerNotFound)?;

        if let Some(answer_text) = patch.answer_text {
            answer.answer_text = answer_text;
        }
        if let Some(is_correct) = patch.is_correct {
            answer.is_correct = is_correct;
        }
        let updated = answer.clone();

        self.quizzes.update(quiz).await?;
        Ok(updated)
    }

    pub async fn delete_answer(&self, user_id: &str, answer_id: &str) -> AppResult<Answer> {
        let mut quiz = self
            .quizzes
            .find_by_answer_id(answer_id)
            .await?
            .ok_or(AppError::AnswerNotFound)?;
        self.ensure_can_author(&quiz.company_id, user_id).await?;

        let mut removed = None;
        for question in quiz.questions.iter_mut() {
            if let Some(position) = question.answers.iter().position(|a| a.id == answer_id) {
                removed = Some(question.answers.remove(position));
                break;
            }
        }
        let removed = removed.ok_or(AppError::AnswerNotFound)?;

        self.quizzes.update(quiz).await?;
        Ok(removed)
    }

    // ----- helpers -----

    /// Owner-or-admin gate: the company owner always passes; anyone else
    /// needs a member row with the administrator flag set.
    async fn ensure_can_author(&self, company_id: &str, user_id: &str) -> AppResult<()> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if company.owner_id == user_id {
            return Ok(());
        }

        match self.members.find(company_id, user_id).await? {
            Some(member) if member.is_administrator => Ok(()),
            _ => Err(AppError::NotPermission),
        }
    }
}
