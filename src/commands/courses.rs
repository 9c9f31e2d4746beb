//! Course Catalog Commands

use super::{segment, HttpBackend};
use crate::error::Result;
use crate::models::{CourseListResponse, EnrollmentResponse};

pub(super) async fn list(backend: &HttpBackend) -> Result<CourseListResponse> {
    backend.get_json("/updateCourses").await
}

/// Current `enrolled/total` of one course
pub(super) async fn enrollment(backend: &HttpBackend, course_id: &str) -> Result<EnrollmentResponse> {
    backend.get_json(&format!("/enrollment/{}", segment(course_id))).await
}
