use async_trait::async_trait;

use crate::db::models::Subject;
use crate::repositories::StoreResult;

/// Read-only view of the curriculum (`subjects` table).
#[async_trait]
pub(crate) trait SubjectStore: Send + Sync {
    /// Whether the curriculum lists this subject for the given semester.
    async fn exists(&self, subject_id: i64, semester: i32) -> StoreResult<bool>;

    /// Whether any semester's curriculum lists this subject.
    async fn exists_anywhere(&self, subject_id: i64) -> StoreResult<bool>;

    async fn list_for_semester(&self, semester: i32) -> StoreResult<Vec<Subject>>;

    async fn fetch_by_ids(&self, subject_ids: &[i64]) -> StoreResult<Vec<Subject>>;
}
