//! Frontend Models
//!
//! Data structures matching the enrollment backend's JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One enrolled class as shown in the classes table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub course_id: String,
    pub teacher: String,
    pub time: String,
    pub status: String,
}

impl ClassRecord {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.course_id.clone(),
            self.teacher.clone(),
            self.time.clone(),
            self.status.clone(),
        ]
    }
}

/// One offered course with its enrollment text (`"current/total"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCatalogEntry {
    pub course_id: String,
    pub enrollment: String,
}

/// Response of `/updateClasses/{start,add,drop}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClassListResponse {
    pub classes: Vec<String>,
    #[serde(default)]
    pub class_professor: HashMap<String, String>,
    #[serde(default)]
    pub class_time: HashMap<String, String>,
    #[serde(default)]
    pub class_status: HashMap<String, String>,
}

impl ClassListResponse {
    /// Records in list order; missing map entries become empty cells
    pub fn records(&self) -> Vec<ClassRecord> {
        let lookup = |map: &HashMap<String, String>, id: &str| map.get(id).cloned().unwrap_or_default();
        self.classes
            .iter()
            .map(|id| ClassRecord {
                course_id: id.clone(),
                teacher: lookup(&self.class_professor, id),
                time: lookup(&self.class_time, id),
                status: lookup(&self.class_status, id),
            })
            .collect()
    }
}

/// Response of `/updateCourses`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CourseListResponse {
    pub classes: Vec<String>,
    #[serde(default)]
    pub enrollment: HashMap<String, String>,
}

impl CourseListResponse {
    pub fn entries(&self) -> Vec<CourseCatalogEntry> {
        self.classes
            .iter()
            .map(|id| CourseCatalogEntry {
                course_id: id.clone(),
                enrollment: self.enrollment.get(id).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// Response of `/enrollment/:classId`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnrollmentResponse {
    pub class_id_format: String,
    pub class_enrollment: String,
}

/// Response of `/update_grade/:className/:studentName`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradeUpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    #[serde(default, deserialize_with = "grade_text")]
    pub grade: String,
}

/// Response of `/roster/:className`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterResponse {
    pub class_name: String,
    #[serde(default)]
    pub students: Vec<RosterEntry>,
}

/// Grades arrive as numbers or strings; both display as text
fn grade_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Error body the backend sends with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ========================
// Request bodies
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddClassRequest<'a> {
    pub class_name: &'a str,
    pub grade: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropClassRequest<'a> {
    pub class_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeUpdateRequest {
    pub new_grade: f64,
}
