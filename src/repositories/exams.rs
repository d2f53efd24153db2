use async_trait::async_trait;

use crate::db::models::Exam;
use crate::db::types::ExamType;
use crate::repositories::{InsertOutcome, StoreResult};

pub(crate) struct NewExam<'a> {
    pub(crate) subject_id: i64,
    pub(crate) prof_id: &'a str,
    pub(crate) exam_type: ExamType,
    pub(crate) semester: i32,
    pub(crate) max_marks: i32,
    pub(crate) exam_date: &'a str,
}

pub(crate) struct ExamChanges {
    pub(crate) prof_id: Option<String>,
    pub(crate) exam_type: Option<ExamType>,
    pub(crate) max_marks: Option<i32>,
    pub(crate) exam_date: Option<String>,
}

/// Exam definitions (`exams` table), unique per (subject, type, semester).
#[async_trait]
pub(crate) trait ExamStore: Send + Sync {
    /// Atomic conditional insert against the (subject, type, semester)
    /// uniqueness constraint.
    async fn insert_if_absent(&self, exam: NewExam<'_>) -> StoreResult<InsertOutcome<Exam>>;

    async fn list(&self) -> StoreResult<Vec<Exam>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Exam>>;

    async fn update(&self, id: i64, changes: ExamChanges) -> StoreResult<Exam>;

    async fn delete(&self, id: i64) -> StoreResult<()>;
}
