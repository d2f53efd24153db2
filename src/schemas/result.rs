use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::types::Grade;

/// Body for both grade recording and grade correction. Omitted marks default
/// to zero.
#[derive(Debug, Deserialize, Validate)]
pub(crate) struct GradeAssign {
    pub(crate) subject_id: i64,
    #[validate(length(min = 1, message = "prof_id must not be empty"))]
    pub(crate) prof_id: String,
    #[validate(range(min = 1, message = "semester must be positive"))]
    pub(crate) semester: i32,
    #[validate(length(min = 1, message = "reg_no must not be empty"))]
    pub(crate) reg_no: String,
    #[serde(default)]
    pub(crate) midsem_marks: f64,
    #[serde(default)]
    pub(crate) endsem_marks: f64,
    #[serde(default)]
    pub(crate) classtest_marks: f64,
    pub(crate) grade: Grade,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsQuery {
    #[serde(default)]
    pub(crate) reg_no: Option<String>,
    #[serde(default)]
    pub(crate) subject_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StudentResultsQuery {
    pub(crate) reg_no: String,
    pub(crate) semester: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectGradesQuery {
    pub(crate) subject_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubjectGradeRow {
    pub(crate) reg_no: String,
    pub(crate) grade: Grade,
}
