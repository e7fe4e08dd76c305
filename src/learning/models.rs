//! Learner-facing data: progress, quizzes, certificates, badges, streaks

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::courses::Course;

#[derive(Debug, Clone, Deserialize)]
pub struct LessonProgress {
    pub lesson_id: String,
    pub completed: bool,
    #[serde(default)]
    pub watched_seconds: u32,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseProgress {
    pub course_id: String,
    #[serde(default)]
    pub lesson_progress: Vec<LessonProgress>,
    pub started_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

/// The whole progress record for the authenticated learner.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    #[serde(default)]
    pub courses: Vec<CourseProgress>,
}

#[derive(Debug, Serialize)]
pub struct MarkLessonComplete {
    pub lesson_id: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    /// Percent required to pass.
    pub passing_score: f64,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question_text: String,
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizAnswer {
    pub id: String,
    pub answer_text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Attempt payload: chosen answer id per question id.
#[derive(Debug, Serialize)]
pub struct QuizAttemptRequest {
    pub quiz_id: String,
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub score: f64,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Local scoring result, shown before the server confirms the attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub percent: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub course_id: String,
    pub course_title: String,
    pub issued_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BadgeAward {
    pub id: String,
    pub badge: Badge,
    pub awarded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Streak {
    pub current_days: u32,
    pub longest_days: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

/// Everything the dashboard shows, fetched in one concurrent sweep.
#[derive(Debug)]
pub struct Dashboard {
    pub courses: Vec<Course>,
    pub progress: UserProgress,
    pub streaks: Vec<Streak>,
}
