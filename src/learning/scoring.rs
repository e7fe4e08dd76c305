// src/learning/scoring.rs
//! Pure client-side scoring: quiz attempts and course completion

use std::collections::HashMap;

use super::models::{Quiz, QuizScore, UserProgress};
use crate::courses::Course;

/// Scores an attempt locally for immediate feedback, before the backend has
/// confirmed the submission. A question with no selected answer counts as
/// wrong; a quiz with no questions cannot be passed.
pub fn score_quiz(quiz: &Quiz, selected: &HashMap<String, String>) -> QuizScore {
    let total = quiz.questions.len();
    let correct = quiz
        .questions
        .iter()
        .filter(|question| {
            let choice = selected.get(&question.id);
            let right = question.answers.iter().find(|a| a.is_correct);
            matches!((choice, right), (Some(choice), Some(right)) if *choice == right.id)
        })
        .count();

    let percent = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    };

    QuizScore {
        correct,
        total,
        percent,
        passed: total > 0 && percent >= quiz.passing_score,
    }
}

/// Completed lessons over total lessons, rounded to a whole percent.
/// Unknown courses and courses with no lessons read as 0.
pub fn course_progress_percent(course: &Course, progress: &UserProgress) -> u8 {
    let total = course.lesson_count();
    if total == 0 {
        return 0;
    }

    let Some(course_progress) = progress.courses.iter().find(|c| c.course_id == course.id) else {
        return 0;
    };

    let completed = course_progress
        .lesson_progress
        .iter()
        .filter(|l| l.completed)
        .count()
        .min(total);

    ((completed as f64 / total as f64) * 100.0).round() as u8
}

pub fn is_lesson_complete(progress: &UserProgress, course_id: &str, lesson_id: &str) -> bool {
    progress
        .courses
        .iter()
        .find(|c| c.course_id == course_id)
        .and_then(|c| c.lesson_progress.iter().find(|l| l.lesson_id == lesson_id))
        .map(|l| l.completed)
        .unwrap_or(false)
}
