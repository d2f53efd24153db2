use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::Exam;
use crate::db::types::ExamType;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ExamCreate {
    pub(crate) subject_id: i64,
    #[validate(length(min = 1, message = "prof_id must not be empty"))]
    pub(crate) prof_id: String,
    pub(crate) exam_type: ExamType,
    #[validate(range(min = 1, message = "semester must be positive"))]
    pub(crate) semester: i32,
    #[validate(range(min = 1, message = "max_marks must be positive"))]
    pub(crate) max_marks: i32,
    #[validate(length(min = 1, message = "exam_date must not be empty"))]
    pub(crate) exam_date: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExamUpdate {
    #[serde(default)]
    pub(crate) prof_id: Option<String>,
    #[serde(default)]
    pub(crate) exam_type: Option<ExamType>,
    #[serde(default)]
    pub(crate) max_marks: Option<i32>,
    #[serde(default)]
    pub(crate) exam_date: Option<String>,
}

impl ExamUpdate {
    pub(crate) fn is_empty(&self) -> bool {
        self.prof_id.is_none()
            && self.exam_type.is_none()
            && self.max_marks.is_none()
            && self.exam_date.is_none()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamEnvelope {
    pub(crate) message: String,
    pub(crate) data: Exam,
}
