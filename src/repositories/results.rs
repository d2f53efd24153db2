use async_trait::async_trait;

use crate::db::models::ExamResult;
use crate::db::types::Grade;
use crate::repositories::StoreResult;

pub(crate) struct ResultUpsert<'a> {
    pub(crate) subject_id: i64,
    pub(crate) prof_id: &'a str,
    pub(crate) reg_no: &'a str,
    pub(crate) midsem_marks: f64,
    pub(crate) endsem_marks: f64,
    pub(crate) classtest_marks: f64,
    pub(crate) grade: Grade,
}

#[derive(Default)]
pub(crate) struct ResultFilter<'a> {
    pub(crate) reg_no: Option<&'a str>,
    pub(crate) subject_id: Option<i64>,
}

/// Exam results (`exam_results` table), keyed (subject_id, reg_no).
#[async_trait]
pub(crate) trait ResultStore: Send + Sync {
    /// Grade currently on record for (subject, student), if any. Read before
    /// an upsert to detect fail-to-pass corrections.
    async fn find_grade(&self, subject_id: i64, reg_no: &str) -> StoreResult<Option<Grade>>;

    /// Insert-or-update keyed by (subject_id, reg_no).
    async fn upsert(&self, result: ResultUpsert<'_>) -> StoreResult<()>;

    async fn list(&self, filter: ResultFilter<'_>) -> StoreResult<Vec<ExamResult>>;

    /// A student's results restricted to the given subject set.
    async fn list_for_student_in(
        &self,
        reg_no: &str,
        subject_ids: &[i64],
    ) -> StoreResult<Vec<ExamResult>>;

    /// Among `among`, the subjects this student holds a failing grade in.
    async fn failed_subject_ids(&self, reg_no: &str, among: &[i64]) -> StoreResult<Vec<i64>>;

    async fn delete(&self, subject_id: i64, reg_no: &str) -> StoreResult<()>;
}
