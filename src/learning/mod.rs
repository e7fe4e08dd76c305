//! Learner surface: progress, quizzes, certificates, badges, and streaks.

pub mod models;
pub mod scoring;

use crate::client::Kukekodes;
use crate::common::{ApiError, Paginated};
use crate::courses::CourseQuery;
use crate::http::RequestSpec;

use std::collections::HashMap;

pub use models::{
    Badge, BadgeAward, Certificate, CourseProgress, Dashboard, LessonProgress, Quiz, QuizAnswer,
    QuizAttempt, QuizQuestion, QuizScore, Streak, UserProgress,
};
pub use scoring::{course_progress_percent, is_lesson_complete, score_quiz};

use models::{MarkLessonComplete, QuizAttemptRequest};

impl Kukekodes {
    /// The authenticated learner's whole progress record.
    pub async fn user_progress(&self) -> Result<UserProgress, ApiError> {
        self.executor.request(RequestSpec::get("/progress")).await
    }

    pub async fn mark_lesson_complete(&self, lesson_id: &str) -> Result<LessonProgress, ApiError> {
        let payload = MarkLessonComplete {
            lesson_id: lesson_id.to_string(),
            completed: true,
        };
        self.executor
            .request(RequestSpec::post("/progress").json(&payload)?)
            .await
    }

    pub async fn quizzes(&self) -> Result<Paginated<Quiz>, ApiError> {
        self.executor
            .request(RequestSpec::get("/quizzes").public())
            .await
    }

    pub async fn quiz(&self, id: &str) -> Result<Quiz, ApiError> {
        self.executor
            .request(RequestSpec::get(format!("/quizzes/{}", id)).public())
            .await
    }

    pub async fn submit_quiz_attempt(
        &self,
        quiz_id: &str,
        answers: HashMap<String, String>,
    ) -> Result<QuizAttempt, ApiError> {
        let payload = QuizAttemptRequest {
            quiz_id: quiz_id.to_string(),
            answers,
        };
        self.executor
            .request(RequestSpec::post("/quiz-attempts").json(&payload)?)
            .await
    }

    pub async fn certificates(&self) -> Result<Paginated<Certificate>, ApiError> {
        self.executor.request(RequestSpec::get("/certificates")).await
    }

    pub async fn badges(&self) -> Result<Paginated<Badge>, ApiError> {
        self.executor
            .request(RequestSpec::get("/badges").public())
            .await
    }

    /// Badges awarded to the authenticated learner.
    pub async fn badge_awards(&self) -> Result<Paginated<BadgeAward>, ApiError> {
        self.executor.request(RequestSpec::get("/badge-awards")).await
    }

    pub async fn streaks(&self) -> Result<Paginated<Streak>, ApiError> {
        self.executor.request(RequestSpec::get("/streaks")).await
    }

    /// One concurrent sweep of everything the dashboard renders. The calls
    /// are independent; whichever finishes last bounds the wall time.
    pub async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        let course_query = CourseQuery::default();
        let (courses, progress, streaks) = futures::try_join!(
            self.courses(&course_query),
            self.user_progress(),
            self.streaks(),
        )?;
        Ok(Dashboard {
            courses: courses.data,
            progress,
            streaks: streaks.data,
        })
    }
}
