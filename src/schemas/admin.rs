use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseUpdate {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssignmentCreate {
    #[validate(length(min = 1, message = "prof_id must not be empty"))]
    pub(crate) prof_id: String,
    pub(crate) subject_id: i64,
    #[validate(range(min = 1, message = "semester must be positive"))]
    pub(crate) semester: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentUpdate {
    #[serde(default)]
    pub(crate) prof_id: Option<String>,
    #[serde(default)]
    pub(crate) subject_id: Option<i64>,
    #[serde(default)]
    pub(crate) semester: Option<i32>,
}

/// Enroll a student into a semester's subject set. `student_id` is the key
/// older admin clients send for the registration number.
#[derive(Debug, Deserialize, Validate)]
pub(crate) struct EnrollmentCreate {
    #[serde(alias = "student_id")]
    #[validate(length(min = 1, message = "reg_no must not be empty"))]
    pub(crate) reg_no: String,
    #[serde(default)]
    pub(crate) subject_ids: Vec<i64>,
    #[validate(range(min = 1, message = "semester must be positive"))]
    pub(crate) semester: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollmentUpdate {
    pub(crate) subject_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct BacklogDerive {
    #[validate(length(min = 1, message = "reg_no must not be empty"))]
    pub(crate) reg_no: String,
    #[validate(range(min = 2, message = "semester must have a prior semester"))]
    pub(crate) semester: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct BacklogDerived {
    pub(crate) message: String,
    pub(crate) reg_no: String,
    pub(crate) semester: i32,
    pub(crate) backlog_subjects: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct EligibleStudentsQuery {
    pub(crate) subject_id: i64,
    #[validate(range(min = 1, message = "semester must be positive"))]
    pub(crate) semester: i32,
    #[validate(length(min = 1, message = "prof_id must not be empty"))]
    pub(crate) prof_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibleStudents {
    pub(crate) students: Vec<String>,
}
