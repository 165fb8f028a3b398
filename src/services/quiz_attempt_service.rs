use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizResult},
        dto::request::SubmittedAnswer,
    },
    repositories::{CompanyRepository, QuizRepository, QuizResultRepository},
};

/// Scoring and rating engine: grades a submission, enforces the retake
/// cooldown, and folds attempt history into a percentage rating.
pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    companies: Arc<dyn CompanyRepository>,
    results: Arc<dyn QuizResultRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        companies: Arc<dyn CompanyRepository>,
        results: Arc<dyn QuizResultRepository>,
    ) -> Self {
        Self {
            quizzes,
            companies,
            results,
        }
    }

    /// Grades one submission and appends a result row. Prior results are
    /// never touched; retakes are only blocked while the quiz's cooldown
    /// window is still open.
    pub async fn take_quiz(
        &self,
        user_id: &str,
        company_id: &str,
        quiz_id: &str,
        answers: &[SubmittedAnswer],
    ) -> AppResult<QuizResult> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or(AppError::QuizNotFound)?;

        if quiz.company_id != company_id {
            return Err(AppError::QuizNotBelongsToCompany);
        }

        if let Some(frequency_days) = quiz.frequency_days {
            if let Some(last) = self.results.find_latest(user_id, quiz_id).await? {
                let remaining = Self::remaining_days(last.timestamp, frequency_days, Utc::now());
                if remaining > 0 {
                    return Err(AppError::RemainingDays(remaining));
                }
            }
        }

        let score = Self::score_submission(&quiz, answers);
        let result = self
            .results
            .create(QuizResult::new(user_id, quiz_id, company_id, score))
            .await?;
        log::info!(
            "Quiz {} taken by user {}: score {}/{}",
            quiz_id,
            user_id,
            score,
            quiz.questions.len()
        );
        Ok(result)
    }

    /// Percentage rating over the user's attempts within one company.
    pub async fn average_score(&self, user_id: &str, company_id: &str) -> AppResult<f64> {
        let results = self
            .results
            .list_by_user_and_company(user_id, company_id)
            .await?;
        let attempts = self.attempts_with_question_counts(results).await?;
        Ok(Self::cumulative_rating(&attempts))
    }

    /// Same fold as `average_score`, across every company.
    pub async fn system_rating(&self, user_id: &str) -> AppResult<f64> {
        let results = self.results.list_by_user(user_id).await?;
        let attempts = self.attempts_with_question_counts(results).await?;
        Ok(Self::cumulative_rating(&attempts))
    }

    /// Days left until the quiz may be retaken; elapsed time is floored at
    /// day granularity.
    pub fn remaining_days(
        last_attempt: DateTime<Utc>,
        frequency_days: i64,
        now: DateTime<Utc>,
    ) -> i64 {
        let elapsed_days = (now - last_attempt).num_days();
        frequency_days - elapsed_days
    }

    /// One point per submitted (question, answer) pair whose answer belongs
    /// to that question and is marked correct.
    pub fn score_submission(quiz: &Quiz, submitted: &[SubmittedAnswer]) -> i64 {
        let mut score = 0;
        for answer in submitted {
            let Some(question) = quiz.question(&answer.question_id) else {
                continue;
            };
            if question
                .answers
                .iter()
                .any(|a| a.id == answer.answer_id && a.is_correct)
            {
                score += 1;
            }
        }
        score
    }

    /// Cumulative weighted rating over (score, question_count) attempts in
    /// retrieval order: running totals are accumulated attempt by attempt
    /// and the ratio recomputed after each addition; only the final value is
    /// rounded and surfaced.
    pub fn cumulative_rating(attempts: &[(i64, usize)]) -> f64 {
        match attempts {
            [] => 0.0,
            [(score, question_count)] => {
                if *question_count == 0 {
                    return 0.0;
                }
                Self::round_percent(*score as f64 / *question_count as f64)
            }
            _ => {
                let mut sum_score: i64 = 0;
                let mut sum_questions: usize = 0;
                let mut ratio = 0.0;

                for (score, question_count) in attempts {
                    sum_score += score;
                    sum_questions += question_count;
                    if sum_questions > 0 {
                        ratio = sum_score as f64 / sum_questions as f64;
                    }
                }

                Self::round_percent(ratio)
            }
        }
    }

    fn round_percent(ratio: f64) -> f64 {
        (ratio * 100.0 * 10.0).round() / 10.0
    }

    /// Pairs each result with its quiz's current question count. Results
    /// whose quiz no longer exists contribute nothing to the rating.
    async fn attempts_with_question_counts(
        &self,
        results: Vec<QuizResult>,
    ) -> AppResult<Vec<(i64, usize)>> {
        let mut attempts = Vec::with_capacity(results.len());
        for result in results {
            if let Some(quiz) = self.quizzes.find_by_id(&result.quiz_id).await? {
                attempts.push((result.score, quiz.questions.len()));
            }
        }
        Ok(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Answer, Question};
    use chrono::Duration;

    fn quiz_with_questions(pairs: &[(&str, &str)]) -> Quiz {
        // Each pair is (question_id, correct_answer_id); a wrong option is
        // added alongside every correct one.
        let mut quiz = Quiz::new("Sample", None, Some(7), "c-1");
        for (question_id, correct_id) in pairs {
            let mut question = Question::new("?");
            question.id = question_id.to_string();
            let mut correct = Answer::new("right", true);
            correct.id = correct_id.to_string();
            let wrong = Answer::new("wrong", false);
            question.answers = vec![correct, wrong];
            quiz.questions.push(question);
        }
        quiz
    }

    #[test]
    fn test_all_correct_scores_question_count() {
        let quiz = quiz_with_questions(&[("q1", "a1"), ("q2", "a2"), ("q3", "a3")]);
        let submitted = vec![
            SubmittedAnswer {
                question_id: "q1".to_string(),
                answer_id: "a1".to_string(),
            },
            SubmittedAnswer {
                question_id: "q2".to_string(),
                answer_id: "a2".to_string(),
            },
            SubmittedAnswer {
                question_id: "q3".to_string(),
                answer_id: "a3".to_string(),
            },
        ];

        assert_eq!(QuizAttemptService::score_submission(&quiz, &submitted), 3);
    }

    #[test]
    fn test_none_correct_scores_zero() {
        let quiz = quiz_with_questions(&[("q1", "a1"), ("q2", "a2")]);
        let wrong_ids: Vec<String> = quiz
            .questions
            .iter()
            .map(|q| {
                q.answers
                    .iter()
                    .find(|a| !a.is_correct)
                    .map(|a| a.id.clone())
                    .unwrap()
            })
            .collect();

        let submitted: Vec<SubmittedAnswer> = quiz
            .questions
            .iter()
            .zip(wrong_ids)
            .map(|(q, answer_id)| SubmittedAnswer {
                question_id: q.id.clone(),
                answer_id,
            })
            .collect();

        assert_eq!(QuizAttemptService::score_submission(&quiz, &submitted), 0);
    }

    #[test]
    fn test_answer_from_other_question_does_not_count() {
        let quiz = quiz_with_questions(&[("q1", "a1"), ("q2", "a2")]);
        // a2 is correct, but for q2, not q1
        let submitted = vec![SubmittedAnswer {
            question_id: "q1".to_string(),
            answer_id: "a2".to_string(),
        }];

        assert_eq!(QuizAttemptService::score_submission(&quiz, &submitted), 0);
    }

    #[test]
    fn test_remaining_days_mid_cooldown() {
        let now = Utc::now();
        let last = now - Duration::days(3);
        assert_eq!(QuizAttemptService::remaining_days(last, 7, now), 4);
    }

    #[test]
    fn test_remaining_days_after_cooldown() {
        let now = Utc::now();
        let last = now - Duration::days(8);
        assert!(QuizAttemptService::remaining_days(last, 7, now) <= 0);
    }

    #[test]
    fn test_partial_day_floors_to_whole_days() {
        let now = Utc::now();
        let last = now - Duration::hours(26); // one day and two hours
        assert_eq!(QuizAttemptService::remaining_days(last, 7, now), 6);
    }

    #[test]
    fn test_rating_empty_history_is_zero() {
        assert_eq!(QuizAttemptService::cumulative_rating(&[]), 0.0);
    }

    #[test]
    fn test_rating_single_attempt() {
        assert_eq!(QuizAttemptService::cumulative_rating(&[(3, 5)]), 60.0);
    }

    #[test]
    fn test_rating_two_attempts_weighted() {
        // (2+3)/(4+6) = 0.5
        assert_eq!(QuizAttemptService::cumulative_rating(&[(2, 4), (3, 6)]), 50.0);
    }

    #[test]
    fn test_rating_weights_by_question_count_not_attempt() {
        // A plain average of 50% and 100% would be 75; the fold weights by
        // question count: (1+10)/(2+10) = 91.7
        let rating = QuizAttemptService::cumulative_rating(&[(1, 2), (10, 10)]);
        assert_eq!(rating, 91.7);
    }

    #[test]
    fn test_rating_zero_question_counts_do_not_divide_by_zero() {
        assert_eq!(QuizAttemptService::cumulative_rating(&[(0, 0)]), 0.0);
        assert_eq!(QuizAttemptService::cumulative_rating(&[(0, 0), (0, 0)]), 0.0);
    }
}
