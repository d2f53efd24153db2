use async_trait::async_trait;

use crate::db::models::StudentCourse;
use crate::repositories::{InsertOutcome, StoreResult};

pub(crate) struct NewEnrollment<'a> {
    pub(crate) reg_no: &'a str,
    pub(crate) semester: i32,
    pub(crate) subject_ids: &'a [i64],
}

/// Per-semester enrollment records (`student_course` table), unique per
/// (reg_no, semester).
#[async_trait]
pub(crate) trait EnrollmentStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<StudentCourse>>;

    async fn find(&self, reg_no: &str, semester: i32) -> StoreResult<Option<StudentCourse>>;

    /// Atomic conditional insert: creates the record unless one already exists
    /// for (reg_no, semester). Existing records are never touched.
    async fn insert_if_absent(
        &self,
        enrollment: NewEnrollment<'_>,
    ) -> StoreResult<InsertOutcome<StudentCourse>>;

    async fn set_subjects(&self, id: i64, subject_ids: &[i64]) -> StoreResult<StudentCourse>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Registration numbers of students whose semester enrollment includes the
    /// subject.
    async fn students_with_subject(
        &self,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<Vec<String>>;
}
