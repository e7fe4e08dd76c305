//! Course catalog data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty tier; wire names are capitalized, matching the variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub level: CourseLevel,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseModule {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub youtube_url: String,
    /// Minutes.
    pub duration: u32,
    pub order: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Partial update; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<CourseLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewModule {
    pub course_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLesson {
    pub module_id: String,
    pub title: String,
    pub description: String,
    pub youtube_url: String,
    pub duration: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LessonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Catalog list filters, rendered into the query string.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    pub level: Option<CourseLevel>,
    pub search: Option<String>,
    pub page: Option<u32>,
}

impl CourseQuery {
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(level) = &self.level {
            params.push(format!("level={}", level.as_str()));
        }
        if let Some(search) = &self.search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        if let Some(page) = self.page {
            params.push(format!("page={}", page));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}
