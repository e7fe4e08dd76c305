//! Course catalog surface: courses, modules, and lessons.
//!
//! Reads are open; writes ride the session's bearer token. Every method is a
//! mechanical endpoint mapping over the request executor.

pub mod models;

use crate::client::Kukekodes;
use crate::common::{ApiError, Paginated};
use crate::http::{FormField, RequestSpec};

pub use models::{
    Course, CourseLevel, CourseModule, CourseQuery, CourseUpdate, Lesson, LessonUpdate,
    ModuleUpdate, NewCourse, NewLesson, NewModule,
};

impl Kukekodes {
    pub async fn courses(&self, query: &CourseQuery) -> Result<Paginated<Course>, ApiError> {
        let endpoint = format!("/courses{}", query.to_query_string());
        self.executor.request(RequestSpec::get(endpoint).public()).await
    }

    pub async fn course(&self, id: &str) -> Result<Course, ApiError> {
        self.executor
            .request(RequestSpec::get(format!("/courses/{}", id)).public())
            .await
    }

    pub async fn create_course(&self, course: &NewCourse) -> Result<Course, ApiError> {
        self.executor
            .request(RequestSpec::post("/courses").json(course)?)
            .await
    }

    /// Create with a thumbnail upload; goes out as multipart instead of JSON.
    pub async fn create_course_with_thumbnail(
        &self,
        course: &NewCourse,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Course, ApiError> {
        let mut fields = vec![
            FormField::text("title", course.title.clone()),
            FormField::text("description", course.description.clone()),
            FormField::text("level", course.level.as_str()),
            FormField::file("thumbnail", file_name, bytes),
        ];
        if let Some(url) = &course.thumbnail {
            fields.push(FormField::text("thumbnail_url", url.clone()));
        }
        self.executor
            .request(RequestSpec::post("/courses").multipart(fields))
            .await
    }

    pub async fn update_course(&self, id: &str, update: &CourseUpdate) -> Result<Course, ApiError> {
        self.executor
            .request(RequestSpec::patch(format!("/courses/{}", id)).json(update)?)
            .await
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), ApiError> {
        self.executor
            .request(RequestSpec::delete(format!("/courses/{}", id)))
            .await
    }

    pub async fn create_module(&self, module: &NewModule) -> Result<CourseModule, ApiError> {
        self.executor
            .request(RequestSpec::post("/modules").json(module)?)
            .await
    }

    pub async fn update_module(
        &self,
        id: &str,
        update: &ModuleUpdate,
    ) -> Result<CourseModule, ApiError> {
        self.executor
            .request(RequestSpec::patch(format!("/modules/{}", id)).json(update)?)
            .await
    }

    pub async fn delete_module(&self, id: &str) -> Result<(), ApiError> {
        self.executor
            .request(RequestSpec::delete(format!("/modules/{}", id)))
            .await
    }

    /// Lessons, optionally narrowed to one course.
    pub async fn lessons(&self, course_id: Option<&str>) -> Result<Paginated<Lesson>, ApiError> {
        let endpoint = match course_id {
            Some(id) => format!("/lessons?course={}", urlencoding::encode(id)),
            None => "/lessons".to_string(),
        };
        self.executor.request(RequestSpec::get(endpoint).public()).await
    }

    pub async fn lesson(&self, id: &str) -> Result<Lesson, ApiError> {
        self.executor
            .request(RequestSpec::get(format!("/lessons/{}", id)).public())
            .await
    }

    pub async fn create_lesson(&self, lesson: &NewLesson) -> Result<Lesson, ApiError> {
        self.executor
            .request(RequestSpec::post("/lessons").json(lesson)?)
            .await
    }

    pub async fn update_lesson(&self, id: &str, update: &LessonUpdate) -> Result<Lesson, ApiError> {
        self.executor
            .request(RequestSpec::patch(format!("/lessons/{}", id)).json(update)?)
            .await
    }

    pub async fn delete_lesson(&self, id: &str) -> Result<(), ApiError> {
        self.executor
            .request(RequestSpec::delete(format!("/lessons/{}", id)))
            .await
    }
}
