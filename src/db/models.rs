use serde::{Deserialize, Serialize};

use crate::db::types::{ExamType, Grade, RegistrationStatus, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Subject {
    pub(crate) subject_id: i64,
    pub(crate) name: String,
    pub(crate) semester: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Course {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProfessorCourse {
    pub(crate) id: i64,
    pub(crate) prof_id: String,
    pub(crate) subject_id: i64,
    pub(crate) semester: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StudentCourse {
    pub(crate) id: i64,
    pub(crate) reg_no: String,
    pub(crate) semester: i32,
    #[serde(default)]
    pub(crate) subject_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Exam {
    pub(crate) id: i64,
    pub(crate) subject_id: i64,
    pub(crate) prof_id: String,
    pub(crate) exam_type: ExamType,
    pub(crate) semester: i32,
    pub(crate) max_marks: i32,
    pub(crate) exam_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExamResult {
    pub(crate) subject_id: i64,
    pub(crate) prof_id: String,
    pub(crate) reg_no: String,
    pub(crate) midsem_marks: f64,
    pub(crate) endsem_marks: f64,
    pub(crate) classtest_marks: f64,
    pub(crate) grade: Grade,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BacklogRecord {
    pub(crate) reg_no: String,
    pub(crate) semester: i32,
    #[serde(default)]
    pub(crate) subject_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExamRegistration {
    pub(crate) id: i64,
    pub(crate) reg_no: String,
    pub(crate) semester: i32,
    #[serde(default)]
    pub(crate) subjects: Vec<i64>,
    #[serde(default)]
    pub(crate) elective_subjects: Vec<i64>,
    #[serde(default)]
    pub(crate) backlog_subjects: Vec<i64>,
    pub(crate) registration_date: String,
    #[serde(default = "default_registration_status")]
    pub(crate) status: RegistrationStatus,
}

fn default_registration_status() -> RegistrationStatus {
    RegistrationStatus::Registered
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AttendanceMark {
    pub(crate) reg_no: String,
    pub(crate) subject_id: i64,
    pub(crate) attendance_count: i32,
}
